//! Capabilities the builder needs from an external hierarchy representation.
//!
//! The core never parses a document itself. It asks a [`HierarchySource`] for
//! the typed entity collections and for subjects naming a given node, and it
//! lets a caller-supplied [`SchemaValidator`] decide whether the input is
//! acceptable at all.

use crate::model::{NodeKind, Skill};
use serde::{Deserialize, Serialize};

/// An unresolved unit or role as it appears in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEntity {
    pub id: String,
    pub parents: Vec<String>,
}

/// An unresolved (unit-id, role-id) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRelation {
    pub unit: String,
    pub role: String,
}

impl RawRelation {
    /// The id this relation names on the given axis.
    pub fn names(&self, kind: NodeKind) -> &str {
        match kind {
            NodeKind::Unit => &self.unit,
            NodeKind::Role => &self.role,
        }
    }
}

/// An unresolved subject record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSubject {
    pub id: String,
    pub uid: String,
    pub relations: Vec<RawRelation>,
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("query for {kind} entities failed: {reason}")]
    Entities { kind: NodeKind, reason: String },
    #[error("query for subjects naming {kind} '{id}' failed: {reason}")]
    Subjects {
        kind: NodeKind,
        id: String,
        reason: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{kind} entity at position {position} has an empty id")]
    EmptyId { kind: NodeKind, position: usize },
    #[error("subject at position {position} has no relations")]
    NoRelations { position: usize },
    #[error("source could not be inspected: {0}")]
    Query(#[from] QueryError),
}

/// Query capability over a parsed hierarchy document.
pub trait HierarchySource {
    /// All entities of one kind, in document order.
    fn select_entities(&self, kind: NodeKind) -> Result<Vec<RawEntity>, QueryError>;

    /// Subjects with at least one relation naming `id` on the `kind` axis.
    fn select_subjects_naming(
        &self,
        kind: NodeKind,
        id: &str,
    ) -> Result<Vec<RawSubject>, QueryError>;

    /// All subjects, in document order.
    fn subjects(&self) -> Result<Vec<RawSubject>, QueryError>;

    fn skills(&self) -> Vec<Skill> {
        Vec::new()
    }
}

/// Decides whether a source is acceptable input for a build.
pub trait SchemaValidator {
    fn validate(&self, source: &dyn HierarchySource) -> Result<(), ValidationError>;
}

/// Accepts every source.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SchemaValidator for AcceptAll {
    fn validate(&self, _source: &dyn HierarchySource) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Rejects entities without an id and subjects without any relation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl SchemaValidator for Strict {
    fn validate(&self, source: &dyn HierarchySource) -> Result<(), ValidationError> {
        for kind in NodeKind::ALL {
            let entities = source.select_entities(kind)?;
            if let Some(position) = entities.iter().position(|e| e.id.trim().is_empty()) {
                return Err(ValidationError::EmptyId { kind, position });
            }
        }
        let subjects = source.subjects()?;
        if let Some(position) = subjects.iter().position(|s| s.relations.is_empty()) {
            return Err(ValidationError::NoRelations { position });
        }
        Ok(())
    }
}
