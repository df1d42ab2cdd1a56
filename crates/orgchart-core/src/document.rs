//! JSON hierarchy documents.

use crate::model::{NodeKind, Skill};
use crate::source::{HierarchySource, QueryError, RawEntity, RawSubject};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A parsed hierarchy document: two typed entity collections, subjects and skills.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyDocument {
    pub unit: Vec<RawEntity>,
    pub role: Vec<RawEntity>,
    pub subjects: Vec<RawSubject>,
    pub skills: Vec<Skill>,
}

impl HierarchyDocument {
    pub fn entities(&self, kind: NodeKind) -> &[RawEntity] {
        match kind {
            NodeKind::Unit => &self.unit,
            NodeKind::Role => &self.role,
        }
    }
}

impl HierarchySource for HierarchyDocument {
    fn select_entities(&self, kind: NodeKind) -> Result<Vec<RawEntity>, QueryError> {
        Ok(self.entities(kind).to_vec())
    }

    fn select_subjects_naming(
        &self,
        kind: NodeKind,
        id: &str,
    ) -> Result<Vec<RawSubject>, QueryError> {
        Ok(self
            .subjects
            .iter()
            .filter(|s| s.relations.iter().any(|r| r.names(kind) == id))
            .cloned()
            .collect())
    }

    fn subjects(&self) -> Result<Vec<RawSubject>, QueryError> {
        Ok(self.subjects.clone())
    }

    fn skills(&self) -> Vec<Skill> {
        self.skills.clone()
    }
}

/// Deserialize a hierarchy document from a JSON string.
pub fn from_json(json: &str) -> Result<HierarchyDocument> {
    serde_json::from_str(json).context("failed to parse hierarchy document")
}

/// Read a hierarchy document from disk.
pub fn load(path: &Path) -> Result<HierarchyDocument> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read hierarchy document {}", path.display()))?;
    from_json(&json).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_collections_default_to_empty() {
        let doc = from_json(r#"{ "unit": [{ "id": "U1" }] }"#).unwrap();
        assert_eq!(doc.unit.len(), 1);
        assert!(doc.unit[0].parents.is_empty());
        assert!(doc.role.is_empty());
        assert!(doc.subjects.is_empty());
    }

    #[test]
    fn test_select_subjects_naming_matches_axis() {
        let doc = from_json(
            r#"{
                "subjects": [
                    { "id": "a", "uid": "1", "relations": [{ "unit": "X", "role": "R" }] },
                    { "id": "b", "uid": "2", "relations": [{ "unit": "Y", "role": "X" }] }
                ]
            }"#,
        )
        .unwrap();
        let units = doc.select_subjects_naming(NodeKind::Unit, "X").unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].id, "a");
        let roles = doc.select_subjects_naming(NodeKind::Role, "X").unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].id, "b");
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(from_json("{ not json").is_err());
    }
}
