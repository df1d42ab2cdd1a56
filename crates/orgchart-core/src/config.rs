//! Configuration for decomposition and layout hints.
//!
//! Load order: `.orgchart/config.toml` → environment variables → defaults.

use crate::groups::GroupStrategy;
use crate::model::{LayoutHints, NodeKind};
use crate::rank::RankStrategy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_DIR: &str = ".orgchart";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrgConfig {
    pub decompose: DecomposeConfig,
    pub layout: LayoutConfig,
}

/// Path, group and rank settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposeConfig {
    pub rank_strategy: RankStrategy,
    pub grouping: GroupStrategy,
    /// Path count above which enumeration logs a warning. Enumeration is never cut.
    pub path_warn_threshold: usize,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            rank_strategy: RankStrategy::Long,
            grouping: GroupStrategy::Sweep,
            path_warn_threshold: 10_000,
        }
    }
}

/// Layout hints copied onto every node of the matching kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub unit: LayoutHints,
    pub role: LayoutHints,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unit: LayoutHints::default(),
            role: LayoutHints {
                radius: 30.0,
                ..LayoutHints::default()
            },
        }
    }
}

impl LayoutConfig {
    pub fn hints(&self, kind: NodeKind) -> LayoutHints {
        match kind {
            NodeKind::Unit => self.unit,
            NodeKind::Role => self.role,
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl OrgConfig {
    /// Load config from `.orgchart/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override(
            "ORGCHART_RANK_STRATEGY",
            &mut config.decompose.rank_strategy,
        );
        env_override("ORGCHART_GROUPING", &mut config.decompose.grouping);
        env_override(
            "ORGCHART_PATH_WARN_THRESHOLD",
            &mut config.decompose.path_warn_threshold,
        );

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for kind in NodeKind::ALL {
            let hints = self.layout.hints(kind);
            if !(hints.radius > 0.0) {
                anyhow::bail!("layout.{}.radius must be positive, got {}", kind, hints.radius);
            }
            if !(hints.spacing > 0.0) {
                anyhow::bail!(
                    "layout.{}.spacing must be positive, got {}",
                    kind,
                    hints.spacing
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrgConfig::default();
        assert_eq!(config.decompose.rank_strategy, RankStrategy::Long);
        assert_eq!(config.decompose.grouping, GroupStrategy::Sweep);
        assert_eq!(config.decompose.path_warn_threshold, 10_000);
        assert_eq!(config.layout.unit.radius, 40.0);
        assert_eq!(config.layout.role.radius, 30.0);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[decompose]
rank_strategy = "short"
grouping = "union_find"

[layout.role]
radius = 12.5
"#;
        let config: OrgConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.decompose.rank_strategy, RankStrategy::Short);
        assert_eq!(config.decompose.grouping, GroupStrategy::UnionFind);
        assert_eq!(config.layout.role.radius, 12.5);
        // Defaults for unspecified fields
        assert_eq!(config.layout.role.spacing, 1.0);
        assert_eq!(config.layout.unit.radius, 40.0);
        assert_eq!(config.decompose.path_warn_threshold, 10_000);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = OrgConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert_eq!(config.decompose.grouping, GroupStrategy::Sweep);
    }

    #[test]
    fn test_env_override_unset_keeps_value() {
        let mut threshold = 42usize;
        env_override("ORGCHART_TEST_UNSET_THRESHOLD_VAR", &mut threshold);
        assert_eq!(threshold, 42);
    }

    #[test]
    fn test_load_rejects_non_positive_radius() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE), "[layout.unit]\nradius = 0.0\n").unwrap();

        let err = OrgConfig::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("layout.unit.radius"));
    }
}
