//! Rank Assigner: integer depth ranks for the radial layout.

use crate::model::NodeIdx;
use crate::paths::Path;
use serde::{Deserialize, Serialize};

/// Which ranking heuristic to run. The two are never combined on one graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankStrategy {
    /// Paths as long as the first path pull their nodes toward the root.
    Short,
    /// Every node keeps the first rank it is given.
    #[default]
    Long,
}

impl std::str::FromStr for RankStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            other => Err(format!("unknown rank strategy: {}", other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("ranks were assigned with the {existing:?} strategy; refusing to apply {requested:?}")]
    StrategyConflict {
        existing: RankStrategy,
        requested: RankStrategy,
    },
}

/// Per-node ranks and the (group, rank) ordering they induce.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    ranks: Vec<Option<u32>>,
    strategy: Option<RankStrategy>,
    order: Vec<NodeIdx>,
}

impl Ranking {
    pub fn new(node_count: usize) -> Self {
        Self {
            ranks: vec![None; node_count],
            strategy: None,
            order: (0..node_count).map(NodeIdx).collect(),
        }
    }

    pub fn rank(&self, node: NodeIdx) -> Option<u32> {
        self.ranks.get(node.0).copied().flatten()
    }

    pub fn strategy(&self) -> Option<RankStrategy> {
        self.strategy
    }

    /// Nodes sorted by (group, rank). Arena order until ranks are assigned.
    pub fn order(&self) -> &[NodeIdx] {
        &self.order
    }

    /// Run `strategy` over `paths` and reorder nodes by (group, rank).
    ///
    /// Calling again with the same strategy leaves every rank unchanged.
    pub fn assign(
        &mut self,
        strategy: RankStrategy,
        paths: &[Path],
        node_group: &[usize],
    ) -> Result<&[NodeIdx], RankError> {
        if let Some(existing) = self.strategy
            && existing != strategy
        {
            return Err(RankError::StrategyConflict {
                existing,
                requested: strategy,
            });
        }

        match strategy {
            RankStrategy::Short => short_rank(&mut self.ranks, paths),
            RankStrategy::Long => long_rank(&mut self.ranks, paths),
        }
        self.strategy = Some(strategy);

        let ranks = &self.ranks;
        let group = |n: NodeIdx| node_group.get(n.0).copied().unwrap_or(0);
        self.order.sort_by_key(|&n| (group(n), ranks[n.0].unwrap_or(u32::MAX)));

        tracing::debug!(
            "assigned {:?} ranks to {} nodes over {} paths",
            strategy,
            self.ranks.iter().filter(|r| r.is_some()).count(),
            paths.len()
        );
        Ok(&self.order)
    }
}

fn short_rank(ranks: &mut [Option<u32>], paths: &[Path]) {
    let Some(first_len) = paths.first().map(Path::len) else {
        return;
    };
    for path in paths {
        if path.len() == first_len {
            for (depth, node) in (1u32..).zip(path.root_to_leaf()) {
                let slot = &mut ranks[node.0];
                *slot = Some(slot.map_or(depth, |r| r.min(depth)));
            }
        } else {
            number_unranked(ranks, path);
        }
    }
}

fn long_rank(ranks: &mut [Option<u32>], paths: &[Path]) {
    for path in paths {
        number_unranked(ranks, path);
    }
}

/// Walk root-to-leaf giving unranked nodes consecutive numbers. A node that
/// already has a rank restarts the count at that rank + 1.
fn number_unranked(ranks: &mut [Option<u32>], path: &Path) {
    let mut next = 1;
    for node in path.root_to_leaf() {
        match ranks[node.0] {
            Some(r) => next = r + 1,
            None => {
                ranks[node.0] = Some(next);
                next += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(nodes: &[usize]) -> Path {
        Path {
            nodes: nodes.iter().map(|&n| NodeIdx(n)).collect(),
        }
    }

    fn ranks_of(r: &Ranking, n: usize) -> Vec<Option<u32>> {
        (0..n).map(|i| r.rank(NodeIdx(i))).collect()
    }

    fn scenario() -> Vec<Path> {
        // 0 root; 1 -> 0; 2 -> (0, 1)
        vec![path(&[0]), path(&[1, 0]), path(&[2, 0]), path(&[2, 1, 0])]
    }

    #[test]
    fn test_long_rank_keeps_first_rank() {
        let mut r = Ranking::new(3);
        r.assign(RankStrategy::Long, &scenario(), &[0, 0, 0]).unwrap();
        // Node 2 is first reached through [2, 0] and stays at depth 2.
        assert_eq!(ranks_of(&r, 3), vec![Some(1), Some(2), Some(2)]);
        assert_eq!(r.order(), &[NodeIdx(0), NodeIdx(1), NodeIdx(2)]);
    }

    #[test]
    fn test_short_rank_uses_first_path_length() {
        // First path has length 2, so [2, 0] and [1, 0] take the min branch.
        let paths = vec![path(&[1, 0]), path(&[3, 2, 1, 0]), path(&[3, 0]), path(&[2, 1, 0])];
        let mut r = Ranking::new(4);
        r.assign(RankStrategy::Short, &paths, &[0; 4]).unwrap();
        assert_eq!(ranks_of(&r, 4), vec![Some(1), Some(2), Some(3), Some(2)]);
    }

    #[test]
    fn test_short_rank_min_lowers_existing_rank() {
        let paths = vec![path(&[1, 0]), path(&[2, 1, 0]), path(&[2, 3])];
        let mut r = Ranking::new(4);
        r.assign(RankStrategy::Short, &paths, &[0; 4]).unwrap();
        // [2, 1, 0] ranks 2 at 3; [2, 3] has the first path's length and lowers it to 2.
        assert_eq!(r.rank(NodeIdx(2)), Some(2));
        assert_eq!(r.rank(NodeIdx(3)), Some(1));
    }

    #[test]
    fn test_resume_after_ranked_node() {
        let mut ranks = vec![None, Some(5), None];
        number_unranked(&mut ranks, &path(&[2, 1, 0]));
        assert_eq!(ranks, vec![Some(1), Some(5), Some(6)]);
    }

    #[test]
    fn test_idempotent() {
        for strategy in [RankStrategy::Short, RankStrategy::Long] {
            let paths = vec![path(&[1, 0]), path(&[3, 2, 1, 0]), path(&[3, 0]), path(&[2, 1, 0])];
            let mut r = Ranking::new(4);
            r.assign(strategy, &paths, &[0; 4]).unwrap();
            let first = ranks_of(&r, 4);
            let first_order = r.order().to_vec();
            r.assign(strategy, &paths, &[0; 4]).unwrap();
            assert_eq!(ranks_of(&r, 4), first);
            assert_eq!(r.order(), first_order.as_slice());
        }
    }

    #[test]
    fn test_strategies_not_combined() {
        let mut r = Ranking::new(3);
        r.assign(RankStrategy::Long, &scenario(), &[0; 3]).unwrap();
        let err = r
            .assign(RankStrategy::Short, &scenario(), &[0; 3])
            .unwrap_err();
        assert!(matches!(
            err,
            RankError::StrategyConflict {
                existing: RankStrategy::Long,
                requested: RankStrategy::Short
            }
        ));
    }

    #[test]
    fn test_order_by_group_then_rank() {
        let paths = vec![path(&[1, 0]), path(&[3, 2])];
        let mut r = Ranking::new(4);
        let order = r
            .assign(RankStrategy::Long, &paths, &[1, 1, 0, 0])
            .unwrap()
            .to_vec();
        assert_eq!(order, vec![NodeIdx(2), NodeIdx(3), NodeIdx(0), NodeIdx(1)]);
    }

    #[test]
    fn test_no_paths() {
        let mut r = Ranking::new(0);
        assert!(r.assign(RankStrategy::Short, &[], &[]).unwrap().is_empty());
    }
}
