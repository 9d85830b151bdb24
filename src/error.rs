use core::fmt;
use thiserror::Error;

use crate::grid::Position;

/// Errors raised while building or editing a [Grid](crate::grid::Grid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,

    #[error("a {rows}x{cols} grid has more cells than can be addressed")]
    TooLarge { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown layout symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },

    #[error("layout marker {marker:?} appears at both {first} and {second}")]
    DuplicateMarker {
        marker: char,
        first: Position,
        second: Position,
    },

    #[error("{pos} lies outside a {rows}x{cols} grid")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },
}

/// Which end of a search an [EndpointFault] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointRole {
    Start,
    Goal,
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EndpointRole::Start => write!(f, "start"),
            EndpointRole::Goal => write!(f, "goal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    /// The node is not part of the graph.
    Missing,
    /// The node exists but cannot be entered.
    Blocked,
}

impl fmt::Display for EndpointFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EndpointFault::Missing => write!(f, "not in the graph"),
            EndpointFault::Blocked => write!(f, "not traversable"),
        }
    }
}

/// Errors raised before a search starts. An unreachable goal is not an error, see
/// [SearchOutcome::NotFound](crate::search::SearchOutcome::NotFound).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid {role} node {node}: {fault}")]
    InvalidEndpoint {
        role: EndpointRole,
        node: String,
        fault: EndpointFault,
    },
}

impl SearchError {
    pub(crate) fn endpoint<N: fmt::Debug>(
        role: EndpointRole,
        node: &N,
        fault: EndpointFault,
    ) -> Self {
        SearchError::InvalidEndpoint {
            role,
            node: format!("{:?}", node),
            fault,
        }
    }
}
