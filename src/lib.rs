//! # grid_astar
//!
//! Minimum-cost paths on 2-D grids using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm), with
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) as the
//! zero-heuristic special case of the same engine.
//!
//! The engine works on anything implementing [Graph]: the 4-connected unit-cost [Grid] and the
//! labelled, weighted [WeightedGraph] are provided. Ties between equally promising nodes are
//! broken by insertion order, so a search always returns the same path for the same input.
//! Progress can be followed through a [SearchObserver], which may also cancel the search.
//!
//! ```
//! use grid_astar::{astar, Layout, Manhattan};
//!
//! let layout: Layout = "S....\n##...\n...#.\n.###.\n....E".parse().unwrap();
//! let start = layout.start.unwrap();
//! let end = layout.end.unwrap();
//! let outcome = astar(&layout.grid, start, end, &Manhattan).unwrap();
//! assert_eq!(outcome.path().unwrap().cost(), 8);
//! ```
pub mod error;
pub mod frontier;
pub mod graph;
pub mod grid;
pub mod heuristic;
pub mod layout;
pub mod observer;
pub mod path;
pub mod search;
pub mod solver;
pub mod weighted;

pub use error::{EndpointFault, EndpointRole, GridError, SearchError};
pub use graph::Graph;
pub use grid::{Cell, Direction, Grid, Position, STEP_COST};
pub use heuristic::{Heuristic, Manhattan, NoHeuristic};
pub use layout::Layout;
pub use observer::{from_fn, Control, Expansion, NoObserver, SearchObserver};
pub use path::{reconstruct_path, Path};
pub use search::{
    astar, astar_with_observer, dijkstra, shortest_distances, NodeStatus, SearchContext,
    SearchOutcome,
};
pub use solver::{AstarSolver, DijkstraSolver, GridSolver};
pub use weighted::WeightedGraph;
