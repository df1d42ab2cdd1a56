//! Root Finder: the terminal nodes of each group's longest paths.

use crate::groups::Groups;
use crate::model::NodeIdx;
use crate::paths::Path;
use std::collections::HashSet;

/// A root candidate and the group it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    pub group: usize,
    pub node: NodeIdx,
}

/// Select the terminal nodes of the longest path(s) of every group.
///
/// Paths are ordered by the group of their first node, then by length
/// descending (stable, so ties keep enumeration order). The first path of a
/// group fixes its target length. Ties are kept; each node appears once.
pub fn find_roots(paths: &[Path], groups: &Groups) -> Vec<Root> {
    let group_of = |p: &Path| p.leaf().map_or(0, |n| groups.node_group[n.0]);

    let mut order: Vec<&Path> = paths.iter().filter(|p| !p.is_empty()).collect();
    order.sort_by(|a, b| {
        group_of(*a)
            .cmp(&group_of(*b))
            .then_with(|| b.len().cmp(&a.len()))
    });

    let mut roots = Vec::new();
    let mut seen: HashSet<NodeIdx> = HashSet::new();
    let mut target: Option<(usize, usize)> = None;

    for path in order {
        let group = group_of(path);
        let len = match target {
            Some((g, len)) if g == group => len,
            _ => {
                target = Some((group, path.len()));
                path.len()
            }
        };
        if path.len() != len {
            continue;
        }
        if let Some(node) = path.terminal()
            && seen.insert(node)
        {
            roots.push(Root { group, node });
        }
    }

    roots
}
