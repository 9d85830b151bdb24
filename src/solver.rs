use itertools::Itertools;
use log::{info, warn};

use crate::error::SearchError;
use crate::grid::{Grid, Position, STEP_COST};
use crate::heuristic::Heuristic;
use crate::observer::{NoObserver, SearchObserver};
use crate::search::{SearchContext, SearchOutcome};

/// Pathfinding front-end for [Grid]s. A solver is its own heuristic; the provided methods run
/// the search engine with it.
pub trait GridSolver: Heuristic<Position, u32> {
    fn solve(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<SearchOutcome<Position, u32>, SearchError>
    where
        Self: Sized,
    {
        self.solve_with_observer(grid, start, goal, &mut NoObserver)
    }

    fn solve_with_observer<O>(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
        observer: &mut O,
    ) -> Result<SearchOutcome<Position, u32>, SearchError>
    where
        Self: Sized,
        O: SearchObserver<Position, u32> + ?Sized,
    {
        SearchContext::new().run(grid, start, goal, self, observer)
    }

    /// Computes a path from start to goal, or [None] if there is none or either endpoint is
    /// not an open cell of the grid.
    fn get_path_single_goal(
        &self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Option<Vec<Position>>
    where
        Self: Sized,
    {
        match self.solve(grid, start, goal) {
            Ok(outcome) => outcome.into_path().map(|path| path.into_nodes()),
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    /// Computes a path from start to one of the given goals and returns the selected goal in
    /// addition to the found path. Otherwise behaves similar to
    /// [get_path_single_goal](Self::get_path_single_goal).
    fn get_path_multiple_goals(
        &self,
        grid: &Grid,
        start: Position,
        goals: &[Position],
    ) -> Option<(Position, Vec<Position>)>
    where
        Self: Sized,
    {
        let outcome = SearchContext::new().run_multiple(grid, start, goals, self, &mut NoObserver);
        match outcome {
            Ok(outcome) => outcome
                .into_path()
                .map(|path| (path.goal(), path.into_nodes())),
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    /// Sums the step costs along `path`, or [None] if two consecutive positions are not adjacent.
    fn get_path_cost(&self, path: &[Position]) -> Option<u32> {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| (a.manhattan_distance(b) == 1).then_some(STEP_COST))
            .sum()
    }
}

/// A* with the Manhattan distance scaled by `heuristic_factor`.
///
/// A factor above 1.0 turns this into Weighted A*, which expands fewer nodes when the goal lies
/// behind few obstacles but no longer guarantees the cheapest path.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    pub fn with_heuristic_factor(heuristic_factor: f32) -> AstarSolver {
        if heuristic_factor < 1.0 {
            info!(
                "Heuristic factor {} below 1.0 only slows the search down",
                heuristic_factor
            );
        }
        AstarSolver { heuristic_factor }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl Heuristic<Position, u32> for AstarSolver {
    /// Just the distance times the heuristic factor.
    fn estimate(&self, from: &Position, to: &Position) -> u32 {
        (from.manhattan_distance(to) as f32 * self.heuristic_factor) as u32
    }
}

impl GridSolver for AstarSolver {}

/// Uninformed search, expanding nodes in order of their distance from the start.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl Heuristic<Position, u32> for DijkstraSolver {
    fn estimate(&self, _: &Position, _: &Position) -> u32 {
        0
    }
}

impl GridSolver for DijkstraSolver {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = Grid::new(1, 1).unwrap();
        let solver = AstarSolver::new();
        let start = p(0, 0);
        let path = solver.get_path_single_goal(&grid, start, start).unwrap();
        assert!(path.len() == 1);
    }

    /// Asserts that the optimal 4 step solution is found.
    #[test]
    fn solve_simple_problem() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_barrier(p(1, 1), true).unwrap();
        let astar = AstarSolver::new();
        let dijkstra = DijkstraSolver;
        for path in [
            astar.get_path_single_goal(&grid, p(0, 0), p(2, 2)),
            dijkstra.get_path_single_goal(&grid, p(0, 0), p(2, 2)),
        ] {
            let path = path.unwrap();
            assert_eq!(path.len(), 5);
            assert_eq!(astar.get_path_cost(&path), Some(4));
        }
    }

    #[test]
    fn test_multiple_goals() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_barrier(p(1, 1), true).unwrap();
        let solver = AstarSolver::new();
        let (selected_goal, path) = solver
            .get_path_multiple_goals(&grid, p(0, 0), &[p(4, 4), p(3, 3)])
            .unwrap();
        assert_eq!(selected_goal, p(3, 3));
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn test_complex() {
        let mut grid = Grid::new(10, 10).unwrap();
        for pos in [p(1, 1), p(5, 0), p(0, 5), p(8, 8)] {
            grid.set_barrier(pos, true).unwrap();
        }
        let solver = AstarSolver::new();
        let path = solver.get_path_single_goal(&grid, p(0, 0), p(7, 7)).unwrap();
        assert_eq!(path.len(), 15);
    }

    #[test]
    fn invalid_endpoints_give_no_path() {
        let grid = Layout::parse("S#\n.#").unwrap().grid;
        let solver = DijkstraSolver;
        assert_eq!(solver.get_path_single_goal(&grid, p(0, 0), p(0, 1)), None);
        assert_eq!(solver.get_path_single_goal(&grid, p(0, 0), p(9, 9)), None);
        assert_eq!(solver.get_path_multiple_goals(&grid, p(0, 0), &[]), None);
    }

    #[test]
    fn unreachable_goal() {
        let layout = Layout::parse("S#.\n.#E").unwrap();
        let solver = AstarSolver::new();
        let start = layout.start.unwrap();
        let end = layout.end.unwrap();
        assert!(!layout.grid.reachable(start, end));
        assert_eq!(
            solver.solve(&layout.grid, start, end).unwrap(),
            SearchOutcome::NotFound
        );
    }

    #[test]
    fn weighted_heuristic_still_finds_a_path() {
        let layout = Layout::parse(
            "
            S.........
            .########.
            .#......#.
            .#.####.#.
            ...#E.....
            ",
        )
        .unwrap();
        let start = layout.start.unwrap();
        let end = layout.end.unwrap();
        let optimal = AstarSolver::new()
            .get_path_single_goal(&layout.grid, start, end)
            .unwrap();
        let weighted = AstarSolver::with_heuristic_factor(2.0)
            .get_path_single_goal(&layout.grid, start, end)
            .unwrap();
        assert!(weighted.len() >= optimal.len());
        assert_eq!(weighted.last(), Some(&end));
    }

    #[test]
    fn path_cost_rejects_gaps() {
        let solver = DijkstraSolver;
        assert_eq!(solver.get_path_cost(&[p(0, 0), p(0, 1), p(1, 1)]), Some(2));
        assert_eq!(solver.get_path_cost(&[p(0, 0), p(2, 0)]), None);
        assert_eq!(solver.get_path_cost(&[p(0, 0)]), Some(0));
    }
}
