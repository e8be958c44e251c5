//! The [`Grid`] type — passability flags, endpoints and search snapshot.
//!
//! The shape of a grid is fixed at construction. Walls, start and goal are
//! edited between runs; the [`Snapshot`] is rewritten by every run.

use rand::{Rng, RngExt};

use crate::cell::Cell;
use crate::error::GridError;
use crate::snapshot::Snapshot;

/// Wall density used when a grid is first populated at random.
pub const INITIAL_WALL_DENSITY: f64 = 0.22;

/// Wall density used when an existing grid is re-randomized.
pub const RANDOM_WALL_DENSITY: f64 = 0.28;

/// A rectangular grid of passable/blocked cells with a start and a goal.
///
/// `start` and `goal` are always inside the grid: every mutator checks
/// bounds. Keeping them passable is left to the editor (see
/// [`set_start`](Grid::set_start)).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
    start: Cell,
    goal: Cell,
    snapshot: Snapshot,
}

impl Grid {
    /// Create an all-passable grid with start at (0, 0) and goal at
    /// (rows − 1, cols − 1).
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let max = i32::MAX as usize;
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(GridError::InvalidDimensions { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            walls: vec![false; len],
            start: Cell::new(0, 0),
            goal: Cell::new(rows as i32 - 1, cols as i32 - 1),
            snapshot: Snapshot::default(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Flat row-major index of `c`, or `None` outside the grid.
    #[inline]
    fn index(&self, c: Cell) -> Option<usize> {
        if c.row >= 0 && c.col >= 0 && (c.row as usize) < self.rows && (c.col as usize) < self.cols
        {
            Some(c.row as usize * self.cols + c.col as usize)
        } else {
            None
        }
    }

    fn check(&self, c: Cell) -> Result<usize, GridError> {
        self.index(c).ok_or(GridError::OutOfBounds {
            cell: c,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Whether `c` lies inside `[0, rows) × [0, cols)`.
    #[inline]
    pub fn in_bounds(&self, c: Cell) -> bool {
        self.index(c).is_some()
    }

    /// Whether `c` can be walked on. Cells outside the grid are never
    /// passable.
    #[inline]
    pub fn passable(&self, c: Cell) -> bool {
        self.index(c).is_some_and(|i| !self.walls[i])
    }

    /// Whether `c` is a wall. Cells outside the grid are not walls.
    #[inline]
    pub fn is_wall(&self, c: Cell) -> bool {
        self.index(c).is_some_and(|i| self.walls[i])
    }

    /// Mark `c` as blocked (`true`) or passable (`false`).
    pub fn set_wall(&mut self, c: Cell, wall: bool) -> Result<(), GridError> {
        let i = self.check(c)?;
        self.walls[i] = wall;
        Ok(())
    }

    /// Move the start. The wall flag of `c` is left untouched: the caller
    /// clears it if `c` was blocked.
    pub fn set_start(&mut self, c: Cell) -> Result<(), GridError> {
        self.check(c)?;
        self.start = c;
        Ok(())
    }

    /// Move the goal. Same contract as [`set_start`](Grid::set_start).
    pub fn set_goal(&mut self, c: Cell) -> Result<(), GridError> {
        self.check(c)?;
        self.goal = c;
        Ok(())
    }

    /// Make every cell passable.
    pub fn clear_walls(&mut self) {
        self.walls.fill(false);
    }

    /// Number of blocked cells.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols as i32;
        (0..self.rows as i32).flat_map(move |r| (0..cols).map(move |c| Cell::new(r, c)))
    }

    /// Fill the grid with random walls.
    ///
    /// Each cell becomes a wall with probability `density` (clamped to
    /// `[0, 1]`). Start and goal are reset to the opposite corners and made
    /// passable, and the search state is cleared.
    pub fn randomize<R: Rng>(&mut self, density: f64, rng: &mut R) {
        let density = density.clamp(0.0, 1.0);
        for w in self.walls.iter_mut() {
            let r: f64 = rng.random();
            *w = r < density;
        }
        self.start = Cell::new(0, 0);
        self.goal = Cell::new(self.rows as i32 - 1, self.cols as i32 - 1);
        let (s, g) = (self.start, self.goal);
        if let Some(i) = self.index(s) {
            self.walls[i] = false;
        }
        if let Some(i) = self.index(g) {
            self.walls[i] = false;
        }
        self.snapshot.clear();
    }

    /// The state left by the most recent (or running) search.
    #[inline]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Mutable access to the snapshot, for the search run that currently
    /// owns this grid.
    #[inline]
    pub fn snapshot_mut(&mut self) -> &mut Snapshot {
        &mut self.snapshot
    }

    /// Forget open/closed/path/scores (the last path cost is kept).
    pub fn clear_search(&mut self) {
        self.snapshot.clear();
    }
}

// ---------------------------------------------------------------------------
// serde: only the editable content is persisted; the snapshot starts empty.
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridData {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
    start: Cell,
    goal: Cell,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Grid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GridData {
            rows: self.rows,
            cols: self.cols,
            walls: self.walls.clone(),
            start: self.start,
            goal: self.goal,
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let data = GridData::deserialize(deserializer)?;
        let mut grid = Grid::new(data.rows, data.cols).map_err(D::Error::custom)?;
        if data.walls.len() != grid.walls.len() {
            return Err(D::Error::custom(format!(
                "grid: expected {} wall flags, found {}",
                grid.walls.len(),
                data.walls.len()
            )));
        }
        grid.walls = data.walls;
        grid.set_start(data.start).map_err(D::Error::custom)?;
        grid.set_goal(data.goal).map_err(D::Error::custom)?;
        Ok(grid)
    }
}
