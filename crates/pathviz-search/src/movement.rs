use pathviz_core::{Cell, Grid};

use crate::cost;

static CARDINAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

static OCTILE: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Movement model of a run: which neighbours a cell has and which
/// heuristic matches them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Up, down, left, right. Manhattan heuristic.
    #[default]
    Cardinal,
    /// Cardinal moves plus the four diagonals. Octile heuristic.
    Octile,
}

impl Movement {
    #[inline]
    pub fn from_diagonal(diagonal: bool) -> Self {
        if diagonal { Self::Octile } else { Self::Cardinal }
    }

    #[inline]
    pub fn allows_diagonal(self) -> bool {
        self == Self::Octile
    }

    /// Row/column offsets, cardinal directions first.
    #[inline]
    pub fn directions(self) -> &'static [(i32, i32)] {
        match self {
            Self::Cardinal => &CARDINAL[..],
            Self::Octile => &OCTILE[..],
        }
    }

    /// Estimated remaining cost from `c` to `goal`.
    #[inline]
    pub fn heuristic(self, c: Cell, goal: Cell) -> f64 {
        cost::heuristic(c, goal, self.allows_diagonal())
    }

    /// Append the in-bounds, passable neighbours of `c` into `buf`. The
    /// caller clears `buf` before calling.
    pub fn neighbors(self, grid: &Grid, c: Cell, buf: &mut Vec<Cell>) {
        for &(dr, dc) in self.directions() {
            let n = c.shift(dr, dc);
            if grid.in_bounds(n) && grid.passable(n) {
                buf.push(n);
            }
        }
    }
}
