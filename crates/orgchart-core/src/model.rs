//! Entity model for the organizational hierarchy.
//!
//! Nodes live in an arena owned by [`Hierarchy`] and refer to each other by
//! [`NodeIdx`]. Parent links are identity links, never owning references, so
//! the ownership stays acyclic even though the domain graph is a DAG.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Index of a node in the [`Hierarchy`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIdx(pub usize);

/// Index of a subject in the [`Hierarchy`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectIdx(pub usize);

/// Which hierarchy axis a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Unit,
    Role,
}

impl NodeKind {
    pub const ALL: [NodeKind; 2] = [NodeKind::Unit, NodeKind::Role];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Unit => "unit",
            NodeKind::Role => "role",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind layout hints handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutHints {
    /// Base radius of the node glyph.
    pub radius: f64,
    /// Multiplier applied to the ring spacing around this node.
    pub spacing: f64,
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self {
            radius: 40.0,
            spacing: 1.0,
        }
    }
}

/// A unit or role in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Resolved parents, in document order. Unknown ids are already dropped.
    pub parents: Vec<NodeIdx>,
    /// Number of subjects with at least one relation naming this node.
    pub subject_count: usize,
    /// Subjects attached through a fully resolved relation.
    pub subjects: Vec<SubjectIdx>,
    pub hints: LayoutHints,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// A (unit, role) pair joining a subject to both hierarchy axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub unit: NodeIdx,
    pub role: NodeIdx,
}

/// A person or record attached to the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    /// Builder-local sequence number. Display only.
    pub seq: u64,
    /// External short id.
    pub id: String,
    /// External unique id.
    pub uid: String,
    pub relations: Vec<Relation>,
}

/// A skill record, carried for the filtering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: String,
    pub subject_count: usize,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    /// Relation type → related skill ids.
    pub related: BTreeMap<String, Vec<String>>,
}

/// The resolved hierarchy: node and subject arenas plus the id lookup.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    pub nodes: Vec<Node>,
    pub subjects: Vec<Subject>,
    pub skills: Vec<Skill>,
    /// Largest `subject_count` across all nodes.
    pub max_subject_count: usize,
    index: HashMap<(NodeKind, String), NodeIdx>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the arena. Returns `None` if the (kind, id) pair is taken.
    pub fn insert_node(&mut self, node: Node) -> Option<NodeIdx> {
        let key = (node.kind, node.id.clone());
        if self.index.contains_key(&key) {
            return None;
        }
        let idx = NodeIdx(self.nodes.len());
        self.index.insert(key, idx);
        self.nodes.push(node);
        Some(idx)
    }

    pub fn insert_subject(&mut self, subject: Subject) -> SubjectIdx {
        let idx = SubjectIdx(self.subjects.len());
        for rel in &subject.relations {
            for node in [rel.unit, rel.role] {
                let subjects = &mut self.nodes[node.0].subjects;
                if !subjects.contains(&idx) {
                    subjects.push(idx);
                }
            }
        }
        self.subjects.push(subject);
        idx
    }

    pub fn lookup(&self, kind: NodeKind, id: &str) -> Option<NodeIdx> {
        self.index.get(&(kind, id.to_string())).copied()
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.0]
    }

    pub fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.0]
    }

    pub fn subject(&self, idx: SubjectIdx) -> &Subject {
        &self.subjects[idx.0]
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.nodes.len()).map(NodeIdx)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.node_indices().filter(|&i| self.node(i).is_root())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Recompute `max_subject_count` from the current nodes.
    pub fn refresh_max_subject_count(&mut self) {
        self.max_subject_count = self
            .nodes
            .iter()
            .map(|n| n.subject_count)
            .max()
            .unwrap_or(0);
    }
}
