use core::fmt::Debug;
use num_traits::Zero;
use std::hash::Hash;

/// A read-only graph the search engine can walk.
///
/// Successors must be yielded in a deterministic order and with non-negative costs;
/// the frontier's insertion-order tie-break relies on the former, the optimality of
/// the returned path on the latter.
pub trait Graph {
    type Node: Copy + Eq + Hash + Debug;
    type Cost: Copy + Ord + Zero + Debug;
    type Successors: IntoIterator<Item = (Self::Node, Self::Cost)>;

    fn contains(&self, node: &Self::Node) -> bool;

    fn is_traversable(&self, node: &Self::Node) -> bool;

    /// Adjacent nodes together with the cost of the edge leading to them.
    fn successors(&self, node: &Self::Node) -> Self::Successors;
}
