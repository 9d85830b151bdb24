//! Best-first search over any [Graph].
//!
//! The engine is a variant of A* that re-inserts a node into the frontier every time a cheaper
//! way to reach it is found and discards outdated entries when they surface. Passing
//! [NoHeuristic] makes it Dijkstra's algorithm, with no separate code path.
use fxhash::{FxBuildHasher, FxHashMap};
use indexmap::IndexMap;
use log::{debug, trace};
use num_traits::Zero;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{EndpointFault, EndpointRole, SearchError};
use crate::frontier::Frontier;
use crate::graph::Graph;
use crate::heuristic::{Heuristic, NoHeuristic};
use crate::observer::{Control, Expansion, NoObserver, SearchObserver};
use crate::path::{reconstruct_path, Path};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Where a node stands in the current search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    #[default]
    Unseen,
    /// Reached and waiting on the frontier.
    Open,
    /// Expanded.
    Closed,
}

#[derive(Clone, Copy, Debug)]
struct NodeRecord<C> {
    g: C,
    f: C,
    status: NodeStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome<N, C> {
    Found(Path<N, C>),
    /// The frontier ran dry without reaching the goal.
    NotFound,
    /// The observer asked the search to stop.
    Cancelled,
}

impl<N, C> SearchOutcome<N, C> {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&Path<N, C>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path<N, C>> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }
}

/// Bookkeeping of a single search: scores, parent links and the frontier.
///
/// A context is reset at the start of every run and can be inspected once the run returns.
/// Reusing one context avoids reallocating its tables; searches running at the same time need
/// a context each, while the graph itself can be shared.
pub struct SearchContext<N, C> {
    records: FxIndexMap<N, NodeRecord<C>>,
    came_from: FxHashMap<N, N>,
    frontier: Frontier<N, C>,
    opened: Vec<(N, C)>,
    expansions: usize,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Copy + Eq + Hash + Debug,
    C: Copy + Ord + Zero + Debug,
{
    fn default() -> SearchContext<N, C> {
        SearchContext::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Copy + Eq + Hash + Debug,
    C: Copy + Ord + Zero + Debug,
{
    pub fn new() -> SearchContext<N, C> {
        SearchContext {
            records: FxIndexMap::default(),
            came_from: FxHashMap::default(),
            frontier: Frontier::new(),
            opened: Vec::new(),
            expansions: 0,
        }
    }

    /// Searches a cheapest path from `start` to `goal`, calling `observer` after every
    /// expansion.
    pub fn run<G, H, O>(
        &mut self,
        graph: &G,
        start: N,
        goal: N,
        heuristic: &H,
        observer: &mut O,
    ) -> Result<SearchOutcome<N, C>, SearchError>
    where
        G: Graph<Node = N, Cost = C>,
        H: Heuristic<N, C> + ?Sized,
        O: SearchObserver<N, C> + ?Sized,
    {
        validate_endpoint(graph, &start, EndpointRole::Start)?;
        validate_endpoint(graph, &goal, EndpointRole::Goal)?;
        debug!("Searching path from {:?} to {:?}", start, goal);
        Ok(self.search(
            graph,
            start,
            |node| heuristic.estimate(node, &goal),
            |node| *node == goal,
            observer,
        ))
    }

    /// Searches a cheapest path from `start` to whichever of `goals` is reached first. The
    /// heuristic value of a node is its estimate to the closest goal.
    pub fn run_multiple<G, H, O>(
        &mut self,
        graph: &G,
        start: N,
        goals: &[N],
        heuristic: &H,
        observer: &mut O,
    ) -> Result<SearchOutcome<N, C>, SearchError>
    where
        G: Graph<Node = N, Cost = C>,
        H: Heuristic<N, C> + ?Sized,
        O: SearchObserver<N, C> + ?Sized,
    {
        validate_endpoint(graph, &start, EndpointRole::Start)?;
        for goal in goals {
            validate_endpoint(graph, goal, EndpointRole::Goal)?;
        }
        if goals.is_empty() {
            debug!("No goals given, nothing to search for");
            self.clear();
            return Ok(SearchOutcome::NotFound);
        }
        debug!("Searching path from {:?} to any of {:?}", start, goals);
        Ok(self.search(
            graph,
            start,
            |node| {
                goals
                    .iter()
                    .map(|goal| heuristic.estimate(node, goal))
                    .min()
                    .unwrap_or_else(C::zero)
            },
            |node| goals.contains(node),
            observer,
        ))
    }

    /// Expands everything reachable from `start` and returns the cheapest cost of each node,
    /// in the order the nodes were discovered.
    pub fn distances_from<G>(
        &mut self,
        graph: &G,
        start: N,
    ) -> Result<FxIndexMap<N, C>, SearchError>
    where
        G: Graph<Node = N, Cost = C>,
    {
        validate_endpoint(graph, &start, EndpointRole::Start)?;
        debug!("Computing distances from {:?}", start);
        self.search(
            graph,
            start,
            |_| C::zero(),
            |_| false,
            &mut NoObserver,
        );
        Ok(self
            .records
            .iter()
            .map(|(node, record)| (*node, record.g))
            .collect())
    }

    fn search<G, FH, FS, O>(
        &mut self,
        graph: &G,
        start: N,
        mut heuristic: FH,
        mut success: FS,
        observer: &mut O,
    ) -> SearchOutcome<N, C>
    where
        G: Graph<Node = N, Cost = C>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
        O: SearchObserver<N, C> + ?Sized,
    {
        self.clear();
        let estimate = heuristic(&start);
        self.records.insert(
            start,
            NodeRecord {
                g: Zero::zero(),
                f: estimate,
                status: NodeStatus::Open,
            },
        );
        self.frontier.push(start, estimate);

        while let Some((current, estimate)) = self.frontier.pop() {
            let Some(&record) = self.records.get(&current) else {
                continue;
            };
            // We may have inserted a node several times into the frontier if we found a better
            // way to access it. Only the entry carrying its current estimate counts.
            if record.status == NodeStatus::Closed || estimate != record.f {
                trace!("Skipping stale frontier entry for {:?}", current);
                continue;
            }
            if success(&current) {
                let nodes = reconstruct_path(&self.came_from, current);
                debug!(
                    "Found path of {} nodes with cost {:?} after {} expansions",
                    nodes.len(),
                    record.g,
                    self.expansions
                );
                return SearchOutcome::Found(Path::new(nodes, record.g));
            }

            self.opened.clear();
            for (successor, move_cost) in graph.successors(&current) {
                if !graph.is_traversable(&successor) {
                    continue;
                }
                let new_cost = record.g + move_cost;
                if let Some(known) = self.records.get(&successor) {
                    if known.g <= new_cost {
                        continue;
                    }
                }
                let estimate = new_cost + heuristic(&successor);
                self.records.insert(
                    successor,
                    NodeRecord {
                        g: new_cost,
                        f: estimate,
                        status: NodeStatus::Open,
                    },
                );
                self.came_from.insert(successor, current);
                self.frontier.push(successor, estimate);
                self.opened.push((successor, new_cost));
            }
            if let Some(record) = self.records.get_mut(&current) {
                record.status = NodeStatus::Closed;
            }
            self.expansions += 1;

            let step = Expansion {
                current,
                cost: record.g,
                opened: &self.opened,
                frontier_len: self.frontier.len(),
            };
            if observer.on_expand(&step) == Control::Cancel {
                debug!("Search cancelled after {} expansions", self.expansions);
                return SearchOutcome::Cancelled;
            }
        }
        debug!(
            "Frontier exhausted after {} expansions without reaching a goal",
            self.expansions
        );
        SearchOutcome::NotFound
    }

    /// Forgets everything about the previous run.
    pub fn clear(&mut self) {
        self.records.clear();
        self.came_from.clear();
        self.frontier.clear();
        self.opened.clear();
        self.expansions = 0;
    }

    /// Best known cost from the start, [None] meaning unreached.
    pub fn g_score(&self, node: &N) -> Option<C> {
        self.records.get(node).map(|r| r.g)
    }

    /// Best known cost plus heuristic estimate, [None] meaning unreached.
    pub fn f_score(&self, node: &N) -> Option<C> {
        self.records.get(node).map(|r| r.f)
    }

    pub fn status(&self, node: &N) -> NodeStatus {
        self.records.get(node).map_or(NodeStatus::Unseen, |r| r.status)
    }

    /// Every node reached so far with its status, in discovery order.
    pub fn reached(&self) -> impl Iterator<Item = (N, NodeStatus)> + '_ {
        self.records.iter().map(|(node, r)| (*node, r.status))
    }

    pub fn came_from(&self) -> &FxHashMap<N, N> {
        &self.came_from
    }

    pub fn in_frontier(&self, node: &N) -> bool {
        self.frontier.contains(node)
    }

    /// Number of nodes expanded by the last run.
    pub fn expansions(&self) -> usize {
        self.expansions
    }
}

fn validate_endpoint<G: Graph>(
    graph: &G,
    node: &G::Node,
    role: EndpointRole,
) -> Result<(), SearchError> {
    if !graph.contains(node) {
        return Err(SearchError::endpoint(role, node, EndpointFault::Missing));
    }
    if !graph.is_traversable(node) {
        return Err(SearchError::endpoint(role, node, EndpointFault::Blocked));
    }
    Ok(())
}

/// Cheapest path from `start` to `goal` guided by `heuristic`.
pub fn astar<G, H>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    heuristic: &H,
) -> Result<SearchOutcome<G::Node, G::Cost>, SearchError>
where
    G: Graph,
    H: Heuristic<G::Node, G::Cost> + ?Sized,
{
    SearchContext::new().run(graph, start, goal, heuristic, &mut NoObserver)
}

/// Like [astar], reporting every expansion to `observer`.
pub fn astar_with_observer<G, H, O>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    heuristic: &H,
    observer: &mut O,
) -> Result<SearchOutcome<G::Node, G::Cost>, SearchError>
where
    G: Graph,
    H: Heuristic<G::Node, G::Cost> + ?Sized,
    O: SearchObserver<G::Node, G::Cost> + ?Sized,
{
    SearchContext::new().run(graph, start, goal, heuristic, observer)
}

/// Cheapest path from `start` to `goal` without a heuristic.
pub fn dijkstra<G: Graph>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
) -> Result<SearchOutcome<G::Node, G::Cost>, SearchError> {
    astar(graph, start, goal, &NoHeuristic)
}

/// Cheapest cost from `start` to every node reachable from it.
pub fn shortest_distances<G: Graph>(
    graph: &G,
    start: G::Node,
) -> Result<FxIndexMap<G::Node, G::Cost>, SearchError> {
    SearchContext::new().distances_from(graph, start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Position};
    use crate::heuristic::Manhattan;
    use crate::observer::from_fn;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn grid_with_barriers(rows: usize, cols: usize, barriers: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for &(row, col) in barriers {
            grid.set_barrier(p(row, col), true).unwrap();
        }
        grid
    }

    fn maze() -> Grid {
        // S....
        // ##...
        // ...#.
        // .###.
        // ....E
        grid_with_barriers(5, 5, &[(1, 0), (1, 1), (2, 3), (3, 1), (3, 2), (3, 3)])
    }

    struct Recorder {
        expanded: Vec<Position>,
        opened: Vec<(Position, u32)>,
        cancel_after: Option<usize>,
    }

    impl Recorder {
        fn new() -> Recorder {
            Recorder {
                expanded: Vec::new(),
                opened: Vec::new(),
                cancel_after: None,
            }
        }
    }

    impl SearchObserver<Position, u32> for Recorder {
        fn on_expand(&mut self, step: &Expansion<'_, Position, u32>) -> Control {
            self.expanded.push(step.current);
            self.opened.extend_from_slice(step.opened);
            match self.cancel_after {
                Some(n) if self.expanded.len() >= n => Control::Cancel,
                _ => Control::Continue,
            }
        }
    }

    #[test]
    fn solves_maze_around_barriers() {
        let grid = maze();
        let path = astar(&grid, p(0, 0), p(4, 4), &Manhattan)
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(path.cost(), 8);
        assert_eq!(path.steps(), 8);
        assert_eq!(path.start(), p(0, 0));
        assert_eq!(path.goal(), p(4, 4));
        for pos in path.nodes() {
            assert!(grid.is_traversable(*pos));
        }
    }

    #[test]
    fn equal_start_goal() {
        let grid = maze();
        let mut recorder = Recorder::new();
        let mut ctx = SearchContext::new();
        let outcome = ctx
            .run(&grid, p(2, 2), p(2, 2), &Manhattan, &mut recorder)
            .unwrap();
        let path = outcome.into_path().unwrap();
        assert_eq!(path.nodes(), &[p(2, 2)]);
        assert_eq!(path.cost(), 0);
        assert_eq!(ctx.expansions(), 0);
        assert!(recorder.expanded.is_empty());
    }

    #[test]
    fn enclosed_goal_is_not_found() {
        let grid = grid_with_barriers(5, 5, &[(1, 2), (3, 2), (2, 1), (2, 3)]);
        let mut ctx = SearchContext::new();
        let outcome = ctx
            .run(&grid, p(0, 0), p(2, 2), &Manhattan, &mut NoObserver)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::NotFound);
        // Every open cell outside the enclosure was expanded.
        assert_eq!(ctx.expansions(), 25 - 4 - 1);
        assert_eq!(ctx.status(&p(2, 2)), NodeStatus::Unseen);
    }

    #[test]
    fn invalid_endpoints() {
        let grid = maze();
        assert_eq!(
            astar(&grid, p(5, 0), p(4, 4), &Manhattan).unwrap_err(),
            SearchError::InvalidEndpoint {
                role: EndpointRole::Start,
                node: format!("{:?}", p(5, 0)),
                fault: EndpointFault::Missing,
            }
        );
        assert!(matches!(
            astar(&grid, p(0, 0), p(1, 1), &Manhattan),
            Err(SearchError::InvalidEndpoint {
                role: EndpointRole::Goal,
                fault: EndpointFault::Blocked,
                ..
            })
        ));
    }

    /// Ties are broken by insertion order, and neighbours are inserted up, down, left, right.
    #[test]
    fn tie_break_is_deterministic() {
        let grid = Grid::new(3, 3).unwrap();
        let mut ctx = SearchContext::new();
        let path = ctx
            .run(&grid, p(0, 0), p(2, 2), &Manhattan, &mut NoObserver)
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(path.nodes(), &[p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(2, 2)]);
        assert_eq!(ctx.expansions(), 8);
    }

    #[test]
    fn repeated_runs_agree() {
        let grid = maze();
        let first = astar(&grid, p(0, 0), p(4, 4), &Manhattan).unwrap();
        let second = astar(&grid, p(0, 0), p(4, 4), &Manhattan).unwrap();
        let mut recorder = Recorder::new();
        let observed =
            astar_with_observer(&grid, p(0, 0), p(4, 4), &Manhattan, &mut recorder).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, observed);
        assert!(!recorder.expanded.is_empty());
    }

    #[test]
    fn dijkstra_agrees_on_cost() {
        let grid = maze();
        let astar_cost = astar(&grid, p(0, 0), p(4, 4), &Manhattan)
            .unwrap()
            .into_path()
            .unwrap()
            .cost();
        let dijkstra_cost = dijkstra(&grid, p(0, 0), p(4, 4))
            .unwrap()
            .into_path()
            .unwrap()
            .cost();
        assert_eq!(astar_cost, dijkstra_cost);
    }

    #[test]
    fn cancel_after_first_expansion() {
        let grid = maze();
        let mut recorder = Recorder::new();
        recorder.cancel_after = Some(1);
        let mut ctx = SearchContext::new();
        let outcome = ctx
            .run(&grid, p(0, 0), p(4, 4), &Manhattan, &mut recorder)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(ctx.expansions(), 1);
        assert_eq!(recorder.expanded, vec![p(0, 0)]);
        // Only the start and its single open neighbour were ever touched.
        assert_eq!(ctx.reached().count(), 2);
        assert_eq!(ctx.status(&p(0, 1)), NodeStatus::Open);
        assert!(ctx.in_frontier(&p(0, 1)));
    }

    #[test]
    fn closure_observer_counts_expansions() {
        let grid = maze();
        let mut count = 0;
        let mut ctx = SearchContext::new();
        let mut observer = from_fn(|_: &Expansion<'_, Position, u32>| {
            count += 1;
            Control::Continue
        });
        ctx.run(&grid, p(0, 0), p(4, 4), &Manhattan, &mut observer)
            .unwrap();
        drop(observer);
        assert_eq!(count, ctx.expansions());
    }

    #[test]
    fn context_records_scores() {
        let grid = maze();
        let mut ctx = SearchContext::new();
        ctx.run(&grid, p(0, 0), p(4, 4), &Manhattan, &mut NoObserver)
            .unwrap();
        assert_eq!(ctx.g_score(&p(0, 0)), Some(0));
        assert_eq!(ctx.f_score(&p(0, 0)), Some(8));
        assert_eq!(ctx.g_score(&p(4, 4)), Some(8));
        assert_eq!(ctx.status(&p(0, 0)), NodeStatus::Closed);
        assert!(!ctx.came_from().contains_key(&p(0, 0)));
        assert_eq!(ctx.g_score(&p(1, 1)), None);
    }

    #[test]
    fn multiple_goals_take_the_closest() {
        let grid = maze();
        let mut ctx = SearchContext::new();
        let path = ctx
            .run_multiple(&grid, p(0, 0), &[p(4, 4), p(2, 2)], &Manhattan, &mut NoObserver)
            .unwrap()
            .into_path()
            .unwrap();
        assert_eq!(path.goal(), p(2, 2));
        assert_eq!(path.cost(), 4);
        assert_eq!(
            ctx.run_multiple(&grid, p(0, 0), &[], &Manhattan, &mut NoObserver)
                .unwrap(),
            SearchOutcome::NotFound
        );
    }

    #[test]
    fn distances_cover_reachable_cells() {
        let grid = maze();
        let distances = shortest_distances(&grid, p(0, 0)).unwrap();
        assert_eq!(distances.len(), 25 - 6);
        assert_eq!(distances[&p(0, 0)], 0);
        assert_eq!(distances[&p(2, 0)], 6);
        assert_eq!(distances[&p(4, 4)], 8);
        assert_eq!(distances[&p(4, 0)], 8);
    }
}
