//! The observable state of a search: [`Snapshot`] and [`Score`].

use std::collections::{HashMap, HashSet};

use crate::cell::Cell;

/// Cost breakdown recorded for a cell when a search last improved it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    /// Cost from start along the best known path.
    pub g: f64,
    /// Heuristic estimate of the remaining cost to goal.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
}

impl Score {
    /// Build a score from `g` and `h`, deriving `f`.
    #[inline]
    pub fn new(g: f64, h: f64) -> Self {
        Self { g, h, f: g + h }
    }
}

/// Search state published after every step of a run.
///
/// A snapshot is owned by the run that is currently executing on its grid;
/// nothing else writes to it until that run returns. `scores` is purely
/// diagnostic and never consulted by the search itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    /// Frontier: discovered but not yet expanded.
    pub open: HashSet<Cell>,
    /// Cells already expanded.
    pub closed: HashSet<Cell>,
    /// Cells on the most recent solution path.
    pub path: HashSet<Cell>,
    pub scores: HashMap<Cell, Score>,
    /// `g(goal)` of the most recent successful run. Survives [`clear`](Self::clear).
    pub last_cost: Option<f64>,
}

impl Snapshot {
    /// Forget the open/closed/path/score state, keeping `last_cost`.
    pub fn clear(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.path.clear();
        self.scores.clear();
    }

    /// Whether no search state is recorded.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
            && self.closed.is_empty()
            && self.path.is_empty()
            && self.scores.is_empty()
    }

    #[inline]
    pub fn is_open(&self, c: Cell) -> bool {
        self.open.contains(&c)
    }

    #[inline]
    pub fn is_closed(&self, c: Cell) -> bool {
        self.closed.contains(&c)
    }

    #[inline]
    pub fn on_path(&self, c: Cell) -> bool {
        self.path.contains(&c)
    }

    #[inline]
    pub fn score(&self, c: Cell) -> Option<Score> {
        self.scores.get(&c).copied()
    }

    /// Number of cells expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.closed.len()
    }
}
