//! Errors raised by grid construction and editing.

use std::fmt;

use crate::cell::Cell;

/// Contract violations rejected by [`Grid`](crate::Grid) before they can
/// corrupt its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A dimension is zero or does not fit a `Cell` coordinate.
    InvalidDimensions { rows: usize, cols: usize },
    /// A cell lies outside `[0, rows) × [0, cols)`.
    OutOfBounds { cell: Cell, rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "grid: invalid dimensions {rows}x{cols}")
            }
            Self::OutOfBounds { cell, rows, cols } => {
                write!(f, "grid: cell {cell} is outside a {rows}x{cols} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}
