//! Decomposition of a built hierarchy into paths, groups, roots and ranks.

use crate::config::DecomposeConfig;
use crate::groups::{Groups, assign_groups};
use crate::model::{Hierarchy, NodeIdx};
use crate::paths::{Path, enumerate_paths};
use crate::rank::{RankError, RankStrategy, Ranking};
use crate::roots::{Root, find_roots};

/// Paths, groups and roots of one hierarchy, plus its ranking once requested.
///
/// Node-keyed state (`group`, `rank`) lives here, indexed by [`NodeIdx`],
/// rather than on the node records.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub paths: Vec<Path>,
    pub groups: Groups,
    pub roots: Vec<Root>,
    ranking: Ranking,
}

impl Decomposition {
    pub fn new(hierarchy: &Hierarchy, config: &DecomposeConfig) -> Self {
        let paths = enumerate_paths(hierarchy);
        if paths.len() > config.path_warn_threshold {
            tracing::warn!(
                "{} paths enumerated for {} nodes (threshold {}); multi-parent fan-out is high",
                paths.len(),
                hierarchy.len(),
                config.path_warn_threshold
            );
        }

        let groups = assign_groups(hierarchy.len(), &paths, config.grouping);
        let roots = find_roots(&paths, &groups);

        tracing::info!(
            "decomposed {} nodes: {} paths, {} groups, {} roots",
            hierarchy.len(),
            paths.len(),
            groups.count,
            roots.len()
        );

        Self {
            paths,
            groups,
            roots,
            ranking: Ranking::new(hierarchy.len()),
        }
    }

    pub fn group_of(&self, node: NodeIdx) -> usize {
        self.groups.node_group.get(node.0).copied().unwrap_or(0)
    }

    pub fn rank_of(&self, node: NodeIdx) -> Option<u32> {
        self.ranking.rank(node)
    }

    pub fn rank_strategy(&self) -> Option<RankStrategy> {
        self.ranking.strategy()
    }

    /// Rank every node with `strategy` and return nodes in (group, rank) order.
    pub fn rank(&mut self, strategy: RankStrategy) -> Result<&[NodeIdx], RankError> {
        self.ranking
            .assign(strategy, &self.paths, &self.groups.node_group)
    }

    /// Nodes in (group, rank) order, or arena order before ranking.
    pub fn ordered_nodes(&self) -> &[NodeIdx] {
        self.ranking.order()
    }

    /// Root nodes of one group.
    pub fn roots_of(&self, group: usize) -> impl Iterator<Item = NodeIdx> + '_ {
        self.roots
            .iter()
            .filter(move |r| r.group == group)
            .map(|r| r.node)
    }
}
