//! Graph Builder: resolve a [`HierarchySource`] into a [`Hierarchy`].
//!
//! Malformed input never fails a build. Unknown parent ids, relations naming
//! missing nodes and failing queries are dropped (and logged) so a
//! hand-edited, partially inconsistent hierarchy still yields a valid graph.
//! The only fatal path is a rejecting [`SchemaValidator`].

use crate::config::LayoutConfig;
use crate::model::{Hierarchy, Node, NodeIdx, NodeKind, Relation, Subject};
use crate::source::{AcceptAll, HierarchySource, SchemaValidator, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("hierarchy rejected by validator: {0}")]
    Validation(#[from] ValidationError),
}

/// Builds a [`Hierarchy`]. Owns the subject sequence counter, which restarts
/// at 1 on every [`GraphBuilder::build`] call.
pub struct GraphBuilder {
    layout: LayoutConfig,
    validator: Box<dyn SchemaValidator>,
    next_seq: u64,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl GraphBuilder {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            validator: Box::new(AcceptAll),
            next_seq: 1,
        }
    }

    pub fn with_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn build(&mut self, source: &dyn HierarchySource) -> Result<Hierarchy, BuildError> {
        self.validator.validate(source)?;
        self.next_seq = 1;

        let mut hierarchy = Hierarchy::new();
        let mut pending_parents: Vec<(NodeIdx, Vec<String>)> = Vec::new();

        for kind in NodeKind::ALL {
            let entities = match source.select_entities(kind) {
                Ok(entities) => entities,
                Err(e) => {
                    tracing::warn!("{}; treating as no {} entities", e, kind);
                    Vec::new()
                }
            };
            for raw in entities {
                let node = Node {
                    id: raw.id.clone(),
                    kind,
                    parents: Vec::new(),
                    subject_count: 0,
                    subjects: Vec::new(),
                    hints: self.layout.hints(kind),
                };
                match hierarchy.insert_node(node) {
                    Some(idx) => pending_parents.push((idx, raw.parents)),
                    None => tracing::warn!("duplicate {} id '{}' dropped", kind, raw.id),
                }
            }
        }

        for (idx, parent_ids) in pending_parents {
            let kind = hierarchy.node(idx).kind;
            let mut parents = Vec::with_capacity(parent_ids.len());
            for pid in &parent_ids {
                match hierarchy.lookup(kind, pid) {
                    Some(p) => parents.push(p),
                    None => tracing::debug!(
                        "{} '{}': unknown parent '{}' dropped",
                        kind,
                        hierarchy.node(idx).id,
                        pid
                    ),
                }
            }
            hierarchy.node_mut(idx).parents = parents;
        }

        let indices: Vec<NodeIdx> = hierarchy.node_indices().collect();
        for idx in indices {
            let node = hierarchy.node(idx);
            let count = match source.select_subjects_naming(node.kind, &node.id) {
                Ok(subjects) => subjects.len(),
                Err(e) => {
                    tracing::warn!("{}; counting no subjects", e);
                    0
                }
            };
            hierarchy.node_mut(idx).subject_count = count;
        }
        hierarchy.refresh_max_subject_count();

        let raw_subjects = match source.subjects() {
            Ok(subjects) => subjects,
            Err(e) => {
                tracing::warn!("{}; treating as no subjects", e);
                Vec::new()
            }
        };
        for raw in raw_subjects {
            let seq = self.next_seq();
            let relations = raw
                .relations
                .iter()
                .filter_map(|rel| {
                    let unit = hierarchy.lookup(NodeKind::Unit, &rel.unit);
                    let role = hierarchy.lookup(NodeKind::Role, &rel.role);
                    match (unit, role) {
                        (Some(unit), Some(role)) => Some(Relation { unit, role }),
                        _ => {
                            tracing::debug!(
                                "subject '{}': relation ({}, {}) names a missing node",
                                raw.id,
                                rel.unit,
                                rel.role
                            );
                            None
                        }
                    }
                })
                .collect();
            hierarchy.insert_subject(Subject {
                seq,
                id: raw.id,
                uid: raw.uid,
                relations,
            });
        }

        hierarchy.skills = source.skills();

        tracing::info!(
            "built hierarchy: {} units, {} roles, {} subjects, {} skills",
            hierarchy.nodes_of_kind(NodeKind::Unit).count(),
            hierarchy.nodes_of_kind(NodeKind::Role).count(),
            hierarchy.subjects.len(),
            hierarchy.skills.len()
        );

        Ok(hierarchy)
    }
}
