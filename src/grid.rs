use core::fmt;
use itertools::iproduct;
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::GridError;
use crate::graph::Graph;

/// Cost of a single move between two adjacent cells.
pub const STEP_COST: u32 = 1;

/// Identity of a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The adjacent position in `dir`, or [None] when that would leave the first row or column.
    /// Does not check the far bounds of any grid.
    pub fn step(&self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::Up => self.row.checked_sub(1).map(|row| Position::new(row, self.col)),
            Direction::Down => Some(Position::new(self.row + 1, self.col)),
            Direction::Left => self.col.checked_sub(1).map(|col| Position::new(self.row, col)),
            Direction::Right => Some(Position::new(self.row, self.col + 1)),
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Position {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four moves of a grid. [Direction::ALL] is the order in which neighbours are reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Open,
    Barrier,
}

impl Cell {
    pub fn from_blocked(blocked: bool) -> Cell {
        if blocked {
            Cell::Barrier
        } else {
            Cell::Open
        }
    }

    pub fn is_barrier(self) -> bool {
        self == Cell::Barrier
    }
}

/// [Grid] is a rectangular, 4-connected, unit-cost graph. Besides the raw [Cell] values it
/// records the open neighbours of every cell as a [u8] mask for fast lookups during search,
/// and maintains connected components using a [UnionFind] structure.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    neighbours: Vec<u8>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Creates a grid of open cells.
    pub fn new(rows: usize, cols: usize) -> Result<Grid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::TooLarge { rows, cols })?;
        Ok(Grid::with_cells(rows, cols, vec![Cell::Open; len]))
    }

    /// Creates a grid from rows of cells. All rows must have the same length.
    pub fn from_rows<I, R>(rows: I) -> Result<Grid, GridError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Cell>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<Vec<Cell>>())
            .collect::<Vec<_>>();
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != cols)
        {
            return Err(GridError::RaggedRow {
                row,
                expected: cols,
                found,
            });
        }
        if rows.is_empty() || cols == 0 {
            return Err(GridError::Empty);
        }
        let n_rows = rows.len();
        Ok(Grid::with_cells(
            n_rows,
            cols,
            rows.into_iter().flatten().collect(),
        ))
    }

    /// `cells` holds `rows * cols` entries in row-major order.
    fn with_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Grid {
        let len = cells.len();
        let mut grid = Grid {
            rows,
            cols,
            cells,
            neighbours: vec![0; len],
            components: UnionFind::new(len),
            components_dirty: false,
        };
        for pos in grid.positions() {
            let mask = grid.open_mask(pos);
            let ix = grid.ix(pos);
            grid.neighbours[ix] = mask;
        }
        grid.generate_components();
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|ix| self.cells[ix])
    }

    pub fn is_traversable(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    pub fn barrier_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_barrier()).count()
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        iproduct!(0..self.rows, 0..self.cols).map(|(row, col)| Position::new(row, col))
    }

    /// Open neighbours of `pos`, in [Direction::ALL] order. Barriers have no neighbours.
    pub fn neighbors(&self, pos: Position) -> SmallVec<[Position; 4]> {
        let Some(ix) = self.index(pos).filter(|ix| !self.cells[*ix].is_barrier()) else {
            return SmallVec::new();
        };
        let mask = self.neighbours[ix];
        Direction::ALL
            .into_iter()
            .filter(|dir| mask & dir.bit() != 0)
            .filter_map(|dir| pos.step(dir))
            .collect()
    }

    /// Places or removes a barrier. Joins newly connected components and flags the components
    /// as dirty if they are (potentially) broken apart into multiple.
    pub fn set_barrier(&mut self, pos: Position, blocked: bool) -> Result<(), GridError> {
        let ix = self.index(pos).ok_or(GridError::OutOfBounds {
            pos,
            rows: self.rows,
            cols: self.cols,
        })?;
        if self.cells[ix].is_barrier() == blocked {
            return Ok(());
        }
        self.cells[ix] = Cell::from_blocked(blocked);
        for dir in Direction::ALL {
            if let Some(n_ix) = pos.step(dir).and_then(|p| self.index(p)) {
                let bit = dir.opposite().bit();
                if blocked {
                    self.neighbours[n_ix] &= !bit;
                } else {
                    self.neighbours[n_ix] |= bit;
                }
            }
        }
        if blocked {
            self.components_dirty = true;
        } else {
            for n in self.neighbors(pos) {
                let n_ix = self.ix(n);
                self.components.union(ix, n_ix);
            }
        }
        Ok(())
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for pos in self.positions() {
            if !self.is_traversable(pos) {
                continue;
            }
            let ix = self.ix(pos);
            // Adjacency is symmetric, looking down and right covers every edge once.
            for dir in [Direction::Down, Direction::Right] {
                if let Some(n) = pos.step(dir).filter(|p| self.is_traversable(*p)) {
                    let n_ix = self.ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Retrieves the component id a given [Position] belongs to.
    pub fn component(&self, pos: Position) -> Option<usize> {
        self.index(pos).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are open cells on the same component.
    pub fn reachable(&self, start: Position, goal: Position) -> bool {
        if self.components_dirty {
            warn!("Reachability queried on dirty components, call update() first");
        }
        if !self.is_traversable(start) || !self.is_traversable(goal) {
            return false;
        }
        self.components.equiv(self.ix(start), self.ix(goal))
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| self.ix(pos))
    }

    fn ix(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    fn open_mask(&self, pos: Position) -> u8 {
        Direction::ALL
            .into_iter()
            .filter(|dir| pos.step(*dir).map_or(false, |p| self.is_traversable(p)))
            .fold(0, |mask, dir| mask | dir.bit())
    }
}

impl Graph for Grid {
    type Node = Position;
    type Cost = u32;
    type Successors = SmallVec<[(Position, u32); 4]>;

    fn contains(&self, node: &Position) -> bool {
        self.in_bounds(*node)
    }

    fn is_traversable(&self, node: &Position) -> bool {
        Grid::is_traversable(self, *node)
    }

    fn successors(&self, node: &Position) -> Self::Successors {
        self.neighbors(*node)
            .into_iter()
            .map(|p| (p, STEP_COST))
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line = row
                .iter()
                .map(|c| if c.is_barrier() { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
