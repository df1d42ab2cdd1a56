//! Serializable snapshot of a decomposition, consumed by the rendering layer.

use crate::decompose::Decomposition;
use crate::model::{Hierarchy, LayoutHints, NodeIdx, NodeKind};
use crate::rank::RankStrategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const LAYOUT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_strategy: Option<RankStrategy>,
    pub max_subject_count: usize,
    pub group_count: usize,
    /// Nodes in (group, rank) order.
    pub nodes: Vec<LayoutNode>,
    pub paths: Vec<LayoutPath>,
    pub roots: Vec<LayoutRoot>,
    pub subjects: Vec<LayoutSubject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub group: usize,
    pub parents: Vec<String>,
    pub subject_count: usize,
    /// External ids of attached subjects.
    pub subjects: Vec<String>,
    pub hints: LayoutHints,
}

/// Leaf-first node ids; a path never crosses kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPath {
    pub kind: NodeKind,
    pub group: usize,
    pub nodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRoot {
    pub group: usize,
    pub kind: NodeKind,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSubject {
    pub seq: u64,
    pub id: String,
    pub uid: String,
    /// (unit id, role id) pairs that resolved.
    pub relations: Vec<(String, String)>,
}

impl Layout {
    pub fn new(hierarchy: &Hierarchy, decomposition: &Decomposition) -> Self {
        let id_of = |idx: NodeIdx| hierarchy.node(idx).id.clone();

        let nodes = decomposition
            .ordered_nodes()
            .iter()
            .map(|&idx| {
                let node = hierarchy.node(idx);
                LayoutNode {
                    id: node.id.clone(),
                    kind: node.kind,
                    rank: decomposition.rank_of(idx),
                    group: decomposition.group_of(idx),
                    parents: node.parents.iter().map(|&p| id_of(p)).collect(),
                    subject_count: node.subject_count,
                    subjects: node
                        .subjects
                        .iter()
                        .map(|&s| hierarchy.subject(s).id.clone())
                        .collect(),
                    hints: node.hints,
                }
            })
            .collect();

        let paths = decomposition
            .paths
            .iter()
            .zip(&decomposition.groups.path_group)
            .filter_map(|(path, &group)| {
                let leaf = path.leaf()?;
                Some(LayoutPath {
                    kind: hierarchy.node(leaf).kind,
                    group,
                    nodes: path.nodes.iter().map(|&n| id_of(n)).collect(),
                })
            })
            .collect();

        let roots = decomposition
            .roots
            .iter()
            .map(|r| LayoutRoot {
                group: r.group,
                kind: hierarchy.node(r.node).kind,
                id: id_of(r.node),
            })
            .collect();

        let subjects = hierarchy
            .subjects
            .iter()
            .map(|s| LayoutSubject {
                seq: s.seq,
                id: s.id.clone(),
                uid: s.uid.clone(),
                relations: s
                    .relations
                    .iter()
                    .map(|r| (id_of(r.unit), id_of(r.role)))
                    .collect(),
            })
            .collect();

        Self {
            version: LAYOUT_VERSION.to_string(),
            generated_at: Utc::now(),
            rank_strategy: decomposition.rank_strategy(),
            max_subject_count: hierarchy.max_subject_count,
            group_count: decomposition.groups.count,
            nodes,
            paths,
            roots,
            subjects,
        }
    }
}
