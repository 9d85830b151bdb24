use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// Walks the parent links in `came_from` back from `goal` and returns the route from the first
/// node without a parent up to and including `goal`.
pub fn reconstruct_path<N, S>(came_from: &HashMap<N, N, S>, goal: N) -> Vec<N>
where
    N: Copy + Eq + Hash,
    S: BuildHasher,
{
    // Every node has at most one parent, a longer walk can only be a cycle.
    let mut path = std::iter::successors(Some(goal), |node| came_from.get(node).copied())
        .take(came_from.len() + 1)
        .collect::<Vec<N>>();
    path.reverse();
    path
}

/// A route found by a search, from start to goal inclusive, with its total cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<N, C> {
    nodes: Vec<N>,
    cost: C,
}

impl<N: Copy, C: Copy> Path<N, C> {
    pub(crate) fn new(nodes: Vec<N>, cost: C) -> Path<N, C> {
        debug_assert!(!nodes.is_empty());
        Path { nodes, cost }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn cost(&self) -> C {
        self.cost
    }

    /// Number of moves, one less than the number of nodes.
    pub fn steps(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn start(&self) -> N {
        self.nodes[0]
    }

    pub fn goal(&self) -> N {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}
