use num_traits::Zero;

use crate::grid::Position;

/// An estimate of the remaining cost between two nodes.
///
/// For the search to return optimal paths the estimate must be admissible (it never
/// overestimates the true cost). If it is also consistent, that is
/// `h(u, goal) <= cost(u, v) + h(v, goal)` for every edge, no finalised node is ever reopened.
pub trait Heuristic<N, C> {
    fn estimate(&self, from: &N, to: &N) -> C;
}

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), admissible and
/// consistent on a 4-connected grid with unit step cost.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Heuristic<Position, u32> for Manhattan {
    fn estimate(&self, from: &Position, to: &Position) -> u32 {
        from.manhattan_distance(to) as u32
    }
}

/// Always zero, which turns A* into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHeuristic;

impl<N, C: Zero> Heuristic<N, C> for NoHeuristic {
    fn estimate(&self, _: &N, _: &N) -> C {
        C::zero()
    }
}

impl<N, C, F> Heuristic<N, C> for F
where
    F: Fn(&N, &N) -> C,
{
    fn estimate(&self, from: &N, to: &N) -> C {
        self(from, to)
    }
}
