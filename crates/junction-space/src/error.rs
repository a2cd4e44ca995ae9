//! Error types for grid construction.

use std::fmt;

/// Errors arising from grid construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero intersections.
    EmptySpace,
    /// `rows * cols` does not fit in an intersection id.
    TooManyIntersections {
        /// Requested rows.
        rows: u32,
        /// Requested columns.
        cols: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "grid must have at least one intersection"),
            Self::TooManyIntersections { rows, cols } => {
                write!(f, "{rows}x{cols} grid exceeds u32::MAX intersections")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
