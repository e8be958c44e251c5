//! Incremental, cancellable A* over a [`pathviz_core::Grid`].
//!
//! The search is split in two layers:
//!
//! - [`Search`] is a step machine. Each call to [`Search::step`] expands
//!   exactly one cell and updates the grid's [`Snapshot`](pathviz_core::Snapshot).
//!   It knows nothing about time, threads or cancellation.
//! - [`run_search`] drives a `Search` to completion, publishing the snapshot
//!   through a callback, optionally pausing between expansions, and stopping
//!   as soon as its [`CancelToken`] is signalled.
//!
//! A run ends in exactly one of three [`SearchOutcome`]s: a path was found,
//! the goal is unreachable, or the run was cancelled.
//!
//! # Expansion order
//!
//! The frontier pops the smallest `f = g + h`. Entries with equal `f` pop in
//! insertion order, so a given grid and configuration always expands cells
//! in the same sequence.

mod cancel;
mod config;
mod cost;
mod driver;
mod engine;
mod frontier;
mod movement;
mod session;

pub use cancel::CancelToken;
pub use config::SearchConfig;
pub use cost::{heuristic, manhattan, octile, step_cost};
pub use driver::{RunStats, SearchOutcome, run_search};
pub use engine::{Finish, Search, Step};
pub use movement::Movement;
pub use session::Session;
