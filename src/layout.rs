//! Text description of a grid.
//!
//! ```text
//! S....
//! ##.#.
//! ...#.
//! .###.
//! ....E
//! ```
//!
//! Each non-blank line is a row. `.` is an open cell, `#` a barrier, `S` and `E` mark the
//! start and end cells, which are open. Whitespace inside a line is ignored, so `S . # E`
//! describes the same row as `S.#E`.
use std::str::FromStr;

use crate::error::GridError;
use crate::grid::{Cell, Grid, Position};

const OPEN: char = '.';
const BARRIER: char = '#';
const START: char = 'S';
const END: char = 'E';

/// A grid together with the endpoints marked in its description.
#[derive(Clone, Debug)]
pub struct Layout {
    pub grid: Grid,
    pub start: Option<Position>,
    pub end: Option<Position>,
}

impl Layout {
    pub fn parse(text: &str) -> Result<Layout, GridError> {
        let mut start = None;
        let mut end = None;
        let mut rows = Vec::new();
        let lines = text.lines().filter(|line| !line.trim().is_empty());
        for (row, line) in lines.enumerate() {
            let mut cells = Vec::new();
            for (col, symbol) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let pos = Position::new(row, col);
                let cell = match symbol {
                    OPEN => Cell::Open,
                    BARRIER => Cell::Barrier,
                    START => {
                        mark(&mut start, START, pos)?;
                        Cell::Open
                    }
                    END => {
                        mark(&mut end, END, pos)?;
                        Cell::Open
                    }
                    symbol => return Err(GridError::UnknownSymbol { row, col, symbol }),
                };
                cells.push(cell);
            }
            rows.push(cells);
        }
        Ok(Layout {
            grid: Grid::from_rows(rows)?,
            start,
            end,
        })
    }
}

fn mark(slot: &mut Option<Position>, marker: char, pos: Position) -> Result<(), GridError> {
    match slot.replace(pos) {
        Some(first) => Err(GridError::DuplicateMarker {
            marker,
            first,
            second: pos,
        }),
        None => Ok(()),
    }
}

impl FromStr for Layout {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Layout, GridError> {
        Layout::parse(s)
    }
}
