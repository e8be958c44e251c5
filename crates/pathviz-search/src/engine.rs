//! The A* step machine.

use std::collections::HashMap;

use pathviz_core::{Cell, Grid, Score};

use crate::cost::step_cost;
use crate::frontier::Frontier;
use crate::movement::Movement;

/// Terminal result of a search that ran to completion.
#[derive(Clone, Debug, PartialEq)]
pub enum Finish {
    /// Shortest path from start to goal (both included) and its cost.
    Found { path: Vec<Cell>, cost: f64 },
    /// The frontier emptied without reaching the goal.
    NotFound,
}

/// Result of a single [`Search::step`].
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// One cell was expanded; more work remains.
    Continue,
    /// The search finished; see [`Finish`].
    Done(Finish),
}

/// An A* search in progress.
///
/// `Search::new` resets the grid's snapshot and seeds the start cell; every
/// [`step`](Search::step) then expands exactly one cell, leaving the
/// snapshot consistent between calls. Holding `&mut Grid` for each step
/// keeps any other writer away from the snapshot while the search runs.
///
/// Entries left behind in the frontier by a cheaper re-push are skipped
/// without counting as an expansion. A cell that is improved after it was
/// closed is pushed again and re-expanded; with the consistent heuristics
/// used here that never happens in practice.
#[derive(Debug)]
pub struct Search {
    movement: Movement,
    start: Cell,
    goal: Cell,
    frontier: Frontier,
    g: HashMap<Cell, f64>,
    came_from: HashMap<Cell, Cell>,
    nbuf: Vec<Cell>,
    expansions: usize,
    finish: Option<Finish>,
}

impl Search {
    /// Start a search from `grid.start()` to `grid.goal()`.
    pub fn new(grid: &mut Grid, diagonal: bool) -> Self {
        let movement = Movement::from_diagonal(diagonal);
        let (start, goal) = (grid.start(), grid.goal());
        let h = movement.heuristic(start, goal);

        let snap = grid.snapshot_mut();
        snap.clear();
        snap.open.insert(start);
        snap.scores.insert(start, Score::new(0.0, h));

        let mut frontier = Frontier::default();
        frontier.push(start, 0.0, h);

        Self {
            movement,
            start,
            goal,
            frontier,
            g: HashMap::from([(start, 0.0)]),
            came_from: HashMap::new(),
            nbuf: Vec::with_capacity(8),
            expansions: 0,
            finish: None,
        }
    }

    #[inline]
    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// Cells expanded so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Entries waiting in the priority queue, stale ones included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finish.is_some()
    }

    /// Expand the best frontier cell.
    ///
    /// Once a search has finished, further calls return the same
    /// [`Step::Done`] without touching the grid.
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        if let Some(finish) = &self.finish {
            return Step::Done(finish.clone());
        }

        let (current, current_g) = loop {
            let Some(entry) = self.frontier.pop() else {
                return self.done(Finish::NotFound);
            };
            // Skip stale entries.
            let best = self.g.get(&entry.cell).copied().unwrap_or(f64::INFINITY);
            if entry.g <= best {
                break (entry.cell, entry.g);
            }
        };
        self.expansions += 1;

        {
            let snap = grid.snapshot_mut();
            snap.open.remove(&current);
            snap.closed.insert(current);
        }

        if current == self.goal {
            let path = self.reconstruct();
            let snap = grid.snapshot_mut();
            snap.path = path.iter().copied().collect();
            snap.last_cost = Some(current_g);
            return self.done(Finish::Found {
                path,
                cost: current_g,
            });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.movement.neighbors(grid, current, &mut nbuf);

        for &n in nbuf.iter() {
            let tentative = current_g + step_cost(current, n);
            if self.g.get(&n).is_some_and(|&old| tentative >= old) {
                continue;
            }

            let h = self.movement.heuristic(n, self.goal);
            self.g.insert(n, tentative);
            self.came_from.insert(n, current);
            self.frontier.push(n, tentative, tentative + h);

            let snap = grid.snapshot_mut();
            if !snap.closed.contains(&n) {
                snap.open.insert(n);
            }
            snap.scores.insert(n, Score::new(tentative, h));
        }

        self.nbuf = nbuf;
        Step::Continue
    }

    fn done(&mut self, finish: Finish) -> Step {
        self.finish = Some(finish.clone());
        Step::Done(finish)
    }

    /// Walk `came_from` back from the goal, then reverse.
    fn reconstruct(&self) -> Vec<Cell> {
        let mut path = vec![self.goal];
        let mut cur = self.goal;
        while cur != self.start {
            let Some(&prev) = self.came_from.get(&cur) else {
                break;
            };
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    fn run(grid: &mut Grid, diagonal: bool) -> (Finish, usize) {
        let mut s = Search::new(grid, diagonal);
        loop {
            if let Step::Done(f) = s.step(grid) {
                return (f, s.expansions());
            }
        }
    }

    #[test]
    fn seeds_start() {
        let mut g = Grid::new(3, 3).unwrap();
        g.snapshot_mut().closed.insert(Cell::new(2, 2));
        let s = Search::new(&mut g, false);
        let snap = g.snapshot();
        assert_eq!(snap.open.len(), 1);
        assert!(snap.is_open(Cell::new(0, 0)));
        assert!(snap.closed.is_empty());
        assert_eq!(snap.score(Cell::new(0, 0)), Some(Score::new(0.0, 4.0)));
        assert_eq!(s.expansions(), 0);
        assert_eq!(s.frontier_len(), 1);
    }

    #[test]
    fn three_by_three_cardinal() {
        let mut g = Grid::new(3, 3).unwrap();
        let (finish, _) = run(&mut g, false);
        let Finish::Found { path, cost } = finish else {
            panic!("expected a path");
        };
        assert_eq!(cost, 4.0);
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Cell::new(0, 0));
        assert_eq!(path[4], Cell::new(2, 2));
        assert_eq!(g.snapshot().last_cost, Some(4.0));
        assert_eq!(g.snapshot().path.len(), 5);
    }

    #[test]
    fn three_by_three_diagonal() {
        let mut g = Grid::new(3, 3).unwrap();
        let (finish, expansions) = run(&mut g, true);
        assert_eq!(
            finish,
            Finish::Found {
                path: vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)],
                cost: 2.0 * SQRT_2,
            }
        );
        assert_eq!(expansions, 3);
    }

    #[test]
    fn start_equals_goal() {
        let mut g = Grid::new(4, 4).unwrap();
        g.set_goal(Cell::new(0, 0)).unwrap();
        let (finish, expansions) = run(&mut g, false);
        assert_eq!(
            finish,
            Finish::Found {
                path: vec![Cell::new(0, 0)],
                cost: 0.0,
            }
        );
        assert_eq!(expansions, 1);
        assert!(g.snapshot().is_closed(Cell::new(0, 0)));
        assert!(g.snapshot().open.is_empty());
    }

    #[test]
    fn walled_off_goal() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_wall(Cell::new(1, 2), true).unwrap();
        g.set_wall(Cell::new(2, 1), true).unwrap();
        g.snapshot_mut().last_cost = Some(9.0);
        let (finish, expansions) = run(&mut g, false);
        assert_eq!(finish, Finish::NotFound);
        // Everything but the two walls and the goal is reachable.
        assert_eq!(expansions, 6);
        assert_eq!(g.snapshot().closed.len(), 6);
        assert!(g.snapshot().open.is_empty());
        assert!(g.snapshot().path.is_empty());
        assert_eq!(g.snapshot().last_cost, Some(9.0));
    }

    #[test]
    fn diagonal_squeezes_between_walls() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set_wall(Cell::new(1, 2), true).unwrap();
        g.set_wall(Cell::new(2, 1), true).unwrap();
        let (finish, _) = run(&mut g, true);
        let Finish::Found { path, .. } = finish else {
            panic!("expected a path");
        };
        assert_eq!(path.last(), Some(&Cell::new(2, 2)));
        assert_eq!(path[path.len() - 2], Cell::new(1, 1));
    }

    #[test]
    fn detour_around_wall() {
        // .....
        // .###.
        // S#G#.
        // .###.
        // .....
        let mut g = Grid::new(5, 5).unwrap();
        for (r, c) in [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)] {
            g.set_wall(Cell::new(r, c), true).unwrap();
        }
        g.set_start(Cell::new(2, 0)).unwrap();
        g.set_goal(Cell::new(2, 2)).unwrap();
        let (finish, _) = run(&mut g, true);
        assert_eq!(finish, Finish::NotFound);

        g.set_wall(Cell::new(1, 2), false).unwrap();
        let (finish, _) = run(&mut g, false);
        let Finish::Found { path, cost } = finish else {
            panic!("expected a path");
        };
        // (2,0) (1,0) (0,0) (0,1) (0,2) (1,2) (2,2)
        assert_eq!(cost, 6.0);
        assert_eq!(path.len(), 7);
    }

    #[test]
    fn step_after_finish_is_stable() {
        let mut g = Grid::new(2, 2).unwrap();
        let mut s = Search::new(&mut g, false);
        let first = loop {
            if let Step::Done(f) = s.step(&mut g) {
                break f;
            }
        };
        let n = s.expansions();
        assert!(s.is_finished());
        assert_eq!(s.step(&mut g), Step::Done(first));
        assert_eq!(s.expansions(), n);
    }

    #[test]
    fn each_step_expands_one_cell() {
        let mut g = Grid::new(6, 6).unwrap();
        let mut s = Search::new(&mut g, false);
        let mut steps = 0;
        while s.step(&mut g) == Step::Continue {
            steps += 1;
            assert_eq!(g.snapshot().closed.len(), steps);
            assert_eq!(s.expansions(), steps);
            // Open and closed never overlap between steps.
            assert!(g.snapshot().open.is_disjoint(&g.snapshot().closed));
        }
    }

    #[test]
    fn scores_track_best_cost() {
        let mut g = Grid::new(1, 4).unwrap();
        run(&mut g, false);
        for c in 0..4 {
            let s = g.snapshot().score(Cell::new(0, c)).unwrap();
            assert_eq!(s.g, c as f64);
            assert_eq!(s.h, (3 - c) as f64);
            assert_eq!(s.f, 3.0);
        }
    }

    #[test]
    fn improved_closed_cell_is_reexpanded() {
        // S . # G
        let mut g = Grid::new(1, 4).unwrap();
        g.set_wall(Cell::new(0, 2), true).unwrap();
        let start = Cell::new(0, 0);
        let mut s = Search::new(&mut g, false);

        assert_eq!(s.step(&mut g), Step::Continue);
        assert!(g.snapshot().is_closed(start));
        // Pretend the start was closed with a worse cost than it really has.
        s.g.insert(start, 10.0);

        // Expanding (0, 1) improves the closed start to 2 and pushes it
        // again, without putting it back in the open set.
        assert_eq!(s.step(&mut g), Step::Continue);
        assert!(!g.snapshot().is_open(start));
        assert_eq!(g.snapshot().score(start).map(|sc| sc.g), Some(2.0));
        assert_eq!(s.came_from.get(&start), Some(&Cell::new(0, 1)));

        // The re-pushed start is expanded a second time.
        assert_eq!(s.step(&mut g), Step::Continue);
        assert_eq!(s.expansions(), 3);
        assert_eq!(g.snapshot().closed.len(), 2);

        assert_eq!(s.step(&mut g), Step::Done(Finish::NotFound));
        assert_eq!(s.expansions(), 3);
    }

    #[test]
    fn movement_is_recorded() {
        let mut g = Grid::new(2, 2).unwrap();
        assert_eq!(Search::new(&mut g, true).movement(), Movement::Octile);
        assert_eq!(Search::new(&mut g, false).movement(), Movement::Cardinal);
    }
}
