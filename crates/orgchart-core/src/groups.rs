//! Group Calculator: partition paths into connected groups.

use crate::paths::Path;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How paths are merged into groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStrategy {
    /// Single left-to-right sweep that only merges a path into the group
    /// currently open. Related paths discovered far apart stay separate.
    #[default]
    Sweep,
    /// Disjoint-set over node identity. A true connected-component partition.
    UnionFind,
}

impl std::str::FromStr for GroupStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sweep" => Ok(Self::Sweep),
            "union_find" | "union-find" => Ok(Self::UnionFind),
            other => Err(format!("unknown grouping strategy: {}", other)),
        }
    }
}

/// Group indices for nodes and paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
    /// Group of each node, indexed by `NodeIdx.0`.
    pub node_group: Vec<usize>,
    /// Group of each path, parallel to the path list.
    pub path_group: Vec<usize>,
    pub count: usize,
}

impl Groups {
    /// Node indices per group, each group in arena order.
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.count];
        for (node, &group) in self.node_group.iter().enumerate() {
            if let Some(m) = members.get_mut(group) {
                m.push(node);
            }
        }
        members
    }
}

pub fn assign_groups(node_count: usize, paths: &[Path], strategy: GroupStrategy) -> Groups {
    match strategy {
        GroupStrategy::Sweep => sweep(node_count, paths),
        GroupStrategy::UnionFind => union_find(node_count, paths),
    }
}

fn sweep(node_count: usize, paths: &[Path]) -> Groups {
    let mut stamped: Vec<Option<usize>> = vec![None; node_count];
    let mut path_group = Vec::with_capacity(paths.len());
    let mut current: HashSet<usize> = HashSet::new();
    let mut group = 0;

    for (i, path) in paths.iter().enumerate() {
        let touches = path.nodes.iter().any(|n| current.contains(&n.0));
        if i > 0 && !touches {
            group += 1;
            current.clear();
        }
        current.extend(path.nodes.iter().map(|n| n.0));
        for n in &path.nodes {
            stamped[n.0].get_or_insert(group);
        }
        path_group.push(group);
    }

    Groups {
        node_group: stamped.into_iter().map(|g| g.unwrap_or(0)).collect(),
        path_group,
        count: if paths.is_empty() { 0 } else { group + 1 },
    }
}

struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
    }
}

fn union_find(node_count: usize, paths: &[Path]) -> Groups {
    let mut set = DisjointSet::new(node_count);
    for path in paths {
        for pair in path.nodes.windows(2) {
            set.union(pair[0].0, pair[1].0);
        }
    }

    let mut numbering: HashMap<usize, usize> = HashMap::new();
    let mut path_group = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(leaf) = path.leaf() else {
            path_group.push(0);
            continue;
        };
        let root = set.find(leaf.0);
        let next = numbering.len();
        path_group.push(*numbering.entry(root).or_insert(next));
    }

    let node_group = (0..node_count)
        .map(|n| {
            let root = set.find(n);
            numbering.get(&root).copied().unwrap_or(0)
        })
        .collect();

    Groups {
        node_group,
        path_group,
        count: numbering.len(),
    }
}
