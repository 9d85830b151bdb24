use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;

use crate::graph::Graph;

/// Undirected graph with labelled vertices and non-negative integer edge weights.
#[derive(Clone, Debug)]
pub struct WeightedGraph<L> {
    graph: UnGraph<L, u32>,
}

impl<L> Default for WeightedGraph<L> {
    fn default() -> WeightedGraph<L> {
        WeightedGraph {
            graph: UnGraph::default(),
        }
    }
}

impl<L> WeightedGraph<L> {
    pub fn new() -> WeightedGraph<L> {
        WeightedGraph::default()
    }

    pub fn add_vertex(&mut self, label: L) -> NodeIndex {
        self.graph.add_node(label)
    }

    /// Connects `a` and `b` in both directions.
    ///
    /// # Panics
    /// If either vertex does not exist.
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, weight: u32) {
        self.graph.add_edge(a, b, weight);
    }

    pub fn label(&self, vertex: NodeIndex) -> Option<&L> {
        self.graph.node_weight(vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl<L: PartialEq> WeightedGraph<L> {
    /// First vertex carrying `label`.
    pub fn vertex(&self, label: &L) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|ix| self.graph[*ix] == *label)
    }
}

impl<L> Graph for WeightedGraph<L> {
    type Node = NodeIndex;
    type Cost = u32;
    type Successors = SmallVec<[(NodeIndex, u32); 8]>;

    fn contains(&self, node: &NodeIndex) -> bool {
        node.index() < self.graph.node_count()
    }

    fn is_traversable(&self, node: &NodeIndex) -> bool {
        self.contains(node)
    }

    /// Neighbours in the order their edges were added.
    fn successors(&self, node: &NodeIndex) -> Self::Successors {
        self.graph
            .edges(*node)
            .sorted_by_key(|edge| edge.id())
            .map(|edge| {
                let other = if edge.source() == *node {
                    edge.target()
                } else {
                    edge.source()
                };
                (other, *edge.weight())
            })
            .collect()
    }
}
