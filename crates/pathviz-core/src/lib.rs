//! **pathviz-core** — grid model for observable pathfinding.
//!
//! This crate holds the data a search runs over and the state it leaves
//! behind: cell coordinates, a rectangular grid of passable/blocked cells
//! with a designated start and goal, and the [`Snapshot`] of the most
//! recent search (open set, closed set, final path and per-cell scores).
//!
//! It has no notion of rendering. A front-end edits the grid between runs
//! and re-reads the snapshot whenever a search reports progress.

pub mod cell;
pub mod error;
pub mod grid;
pub mod snapshot;

pub use cell::Cell;
pub use error::GridError;
pub use grid::{Grid, INITIAL_WALL_DENSITY, RANDOM_WALL_DENSITY};
pub use snapshot::{Score, Snapshot};
