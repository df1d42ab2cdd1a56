//! Read/write layout snapshots.

use crate::layout::{LAYOUT_VERSION, Layout};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Serialize a layout to a pretty-printed JSON string.
pub fn to_json(layout: &Layout) -> Result<String> {
    serde_json::to_string_pretty(layout).context("failed to serialize layout to JSON")
}

/// Deserialize a layout from JSON and check its version.
pub fn from_json(json: &str) -> Result<Layout> {
    let layout: Layout =
        serde_json::from_str(json).context("failed to deserialize layout from JSON")?;
    if layout.version != LAYOUT_VERSION {
        anyhow::bail!(
            "layout version mismatch: expected {}, found {}",
            LAYOUT_VERSION,
            layout.version
        );
    }
    Ok(layout)
}

/// Write a layout to `path`, creating parent directories if needed.
pub fn save_layout(path: &Path, layout: &Layout) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    let json = to_json(layout)?;
    fs::write(path, json).with_context(|| format!("failed to write layout to {}", path.display()))
}

pub fn load_layout(path: &Path) -> Result<Layout> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout from {}", path.display()))?;
    from_json(&json)
}
