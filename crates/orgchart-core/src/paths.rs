//! Root-ward path enumeration over the parent DAG.

use crate::model::{Hierarchy, NodeIdx};

/// A walk from a node upward through its parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Node indices, leaf first.
    pub nodes: Vec<NodeIdx>,
}

impl Path {
    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf(&self) -> Option<NodeIdx> {
        self.nodes.first().copied()
    }

    /// The last node reached; a root unless the cycle guard cut the walk short.
    pub fn terminal(&self) -> Option<NodeIdx> {
        self.nodes.last().copied()
    }

    pub fn contains(&self, node: NodeIdx) -> bool {
        self.nodes.contains(&node)
    }

    /// Nodes in root-to-leaf order.
    pub fn root_to_leaf(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.nodes.iter().rev().copied()
    }
}

enum Work {
    /// Continue `path` upward from `node`, which is its current tail.
    Extend { path: usize, node: NodeIdx },
    /// Open a new path from `prefix` plus `parent`, then continue from `parent`.
    Spawn {
        prefix: Vec<NodeIdx>,
        parent: NodeIdx,
    },
}

/// Enumerate every root-ward path of every node, in arena order.
///
/// The first parent of a node extends the current path in place; every later
/// parent spawns a copy of the path as it stood at that node. The first
/// parent's subtree is fully enumerated before later siblings are spawned, so
/// related paths come out next to each other. A parent already on the path is
/// not followed.
pub fn enumerate_paths(hierarchy: &Hierarchy) -> Vec<Path> {
    let mut paths: Vec<Path> = Vec::new();
    let mut stack: Vec<Work> = Vec::new();

    for start in hierarchy.node_indices() {
        paths.push(Path { nodes: vec![start] });
        stack.push(Work::Extend {
            path: paths.len() - 1,
            node: start,
        });

        while let Some(work) = stack.pop() {
            let (path, node) = match work {
                Work::Extend { path, node } => (path, node),
                Work::Spawn { prefix, parent } => {
                    let mut nodes = prefix;
                    nodes.push(parent);
                    paths.push(Path { nodes });
                    (paths.len() - 1, parent)
                }
            };

            let parents = &hierarchy.node(node).parents;
            let Some((&first, rest)) = parents.split_first() else {
                continue;
            };

            if !rest.is_empty() {
                let snapshot = paths[path].nodes.clone();
                for &parent in rest.iter().rev() {
                    if snapshot.contains(&parent) {
                        continue;
                    }
                    stack.push(Work::Spawn {
                        prefix: snapshot.clone(),
                        parent,
                    });
                }
            }

            if !paths[path].contains(first) {
                paths[path].nodes.push(first);
                stack.push(Work::Extend { path, node: first });
            }
        }
    }

    paths
}
