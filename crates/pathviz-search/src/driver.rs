//! Runs a [`Search`] to completion: publishing, pacing and cancellation.

use std::fmt;

use pathviz_core::{Cell, Grid, Snapshot};

use crate::cancel::CancelToken;
use crate::config::SearchConfig;
use crate::engine::{Finish, Search, Step};

/// How a run ended. The three variants are disjoint: a cancelled run never
/// reports a path or its absence.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Shortest path from start to goal (both included) and its cost.
    Found { path: Vec<Cell>, cost: f64 },
    /// The goal is unreachable from the start.
    NotFound,
    /// The run was stopped through its [`CancelToken`].
    Cancelled,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            Self::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            Self::Found { cost, .. } => Some(*cost),
            _ => None,
        }
    }

    /// Summary of a successful run, read together with the snapshot the run
    /// left behind.
    pub fn stats(&self, snapshot: &Snapshot) -> Option<RunStats> {
        match self {
            Self::Found { path, cost } => Some(RunStats {
                steps: path.len().saturating_sub(1),
                cost: *cost,
                expanded: snapshot.expanded(),
            }),
            _ => None,
        }
    }
}

impl From<Finish> for SearchOutcome {
    fn from(f: Finish) -> Self {
        match f {
            Finish::Found { path, cost } => Self::Found { path, cost },
            Finish::NotFound => Self::NotFound,
        }
    }
}

/// Moves, path cost and number of expanded cells of a successful run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RunStats {
    pub steps: usize,
    pub cost: f64,
    pub expanded: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cost = format!("{:.3}", self.cost);
        let cost = cost.trim_end_matches('0').trim_end_matches('.');
        write!(
            f,
            "Steps: {}   g(n): {}   expanded: {}",
            self.steps, cost, self.expanded
        )
    }
}

/// Search `grid` from its start to its goal.
///
/// `on_step` is called whenever the grid's snapshot has changed and is
/// consistent: once after seeding, after every expansion when
/// [`config.suspends()`](SearchConfig::suspends), and once when the run
/// finishes. It is never called mid-expansion.
///
/// `cancel` is checked before every expansion and around every pause; once
/// it is signalled the run returns [`SearchOutcome::Cancelled`], leaving
/// the snapshot as it was at that point.
///
/// The run emits `log` diagnostics at debug and trace level only; it never
/// presents anything. Showing the outcome is up to the caller.
pub fn run_search<F>(
    grid: &mut Grid,
    config: &SearchConfig,
    mut on_step: F,
    cancel: &CancelToken,
) -> SearchOutcome
where
    F: FnMut(&Grid),
{
    log::debug!(
        "search {} -> {} on {}x{} grid ({config:?})",
        grid.start(),
        grid.goal(),
        grid.rows(),
        grid.cols()
    );

    let mut search = Search::new(grid, config.diagonal);
    on_step(grid);

    loop {
        if cancel.is_cancelled() {
            log::debug!("search cancelled after {} expansions", search.expansions());
            return SearchOutcome::Cancelled;
        }

        match search.step(grid) {
            Step::Continue => {
                if config.suspends() {
                    log::trace!(
                        "step {}: {} open, {} closed",
                        search.expansions(),
                        grid.snapshot().open.len(),
                        grid.snapshot().closed.len()
                    );
                    on_step(grid);
                    if cancel.sleep(config.delay) {
                        log::debug!("search cancelled after {} expansions", search.expansions());
                        return SearchOutcome::Cancelled;
                    }
                }
            }
            Step::Done(finish) => {
                on_step(grid);
                match &finish {
                    Finish::Found { path, cost } => log::debug!(
                        "path found: {} cells, cost {cost:.3}, {} expansions",
                        path.len(),
                        search.expansions()
                    ),
                    Finish::NotFound => {
                        log::debug!("no path after {} expansions", search.expansions())
                    }
                }
                return finish.into();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;
    use std::time::Duration;

    #[test]
    fn instant_run_publishes_twice() {
        let mut g = Grid::new(3, 3).unwrap();
        let mut calls = 0;
        let out = run_search(&mut g, &SearchConfig::new(), |_| calls += 1, &CancelToken::new());
        assert_eq!(out.cost(), Some(4.0));
        assert_eq!(out.path().map(<[Cell]>::len), Some(5));
        // seeded + final
        assert_eq!(calls, 2);
    }

    #[test]
    fn animated_run_publishes_every_expansion() {
        let mut g = Grid::new(3, 3).unwrap();
        let config = SearchConfig::new()
            .with_diagonal(true)
            .with_animate(true)
            .with_delay_ms(1);
        let mut seen = Vec::new();
        let out = run_search(
            &mut g,
            &config,
            |g| seen.push(g.snapshot().closed.len()),
            &CancelToken::new(),
        );
        assert_eq!(
            out,
            SearchOutcome::Found {
                path: vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)],
                cost: 2.0 * SQRT_2,
            }
        );
        // seeded, two intermediate expansions, final
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn animate_without_delay_does_not_pause() {
        let mut g = Grid::new(8, 8).unwrap();
        let config = SearchConfig::new().with_animate(true);
        let mut calls = 0;
        let out = run_search(&mut g, &config, |_| calls += 1, &CancelToken::new());
        assert!(out.is_found());
        assert_eq!(calls, 2);
    }

    #[test]
    fn cancelled_before_start() {
        let mut g = Grid::new(4, 4).unwrap();
        g.set_wall(Cell::new(1, 1), true).unwrap();
        let token = CancelToken::new();
        token.cancel();
        let out = run_search(&mut g, &SearchConfig::new(), |_| {}, &token);
        assert_eq!(out, SearchOutcome::Cancelled);
        assert!(out.is_cancelled());
        assert_eq!(out.path(), None);
        assert!(g.snapshot().closed.is_empty());
        assert!(g.is_wall(Cell::new(1, 1)));
        assert_eq!(g.wall_count(), 1);
    }

    #[test]
    fn cancelled_from_callback() {
        let mut g = Grid::new(10, 10).unwrap();
        let token = CancelToken::new();
        let config = SearchConfig::new().with_animate(true).with_delay_ms(1);
        let mut calls = 0;
        let out = run_search(
            &mut g,
            &config,
            |_| {
                calls += 1;
                if calls == 3 {
                    token.cancel();
                }
            },
            &token,
        );
        assert_eq!(out, SearchOutcome::Cancelled);
        assert_eq!(calls, 3);
        assert_eq!(g.snapshot().closed.len(), 2);
        assert!(g.snapshot().path.is_empty());
    }

    #[test]
    fn cancelled_during_pause() {
        let mut g = Grid::new(20, 20).unwrap();
        let token = CancelToken::new();
        let remote = token.clone();
        let config = SearchConfig::new().with_animate(true).with_delay(Duration::from_secs(30));
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            remote.cancel();
        });
        let out = run_search(&mut g, &config, |_| {}, &token);
        handle.join().unwrap();
        assert_eq!(out, SearchOutcome::Cancelled);
        assert_eq!(g.snapshot().closed.len(), 1);
    }

    #[test]
    fn unbounded_pause_waits_for_cancel() {
        let mut g = Grid::new(5, 5).unwrap();
        let token = CancelToken::new();
        let remote = token.clone();
        let config = SearchConfig::new().with_animate(true).with_delay(Duration::MAX);
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            remote.cancel();
        });
        let out = run_search(&mut g, &config, |_| {}, &token);
        handle.join().unwrap();
        assert_eq!(out, SearchOutcome::Cancelled);
        assert_eq!(g.snapshot().closed.len(), 1);
    }

    #[test]
    fn cancel_after_finish_is_harmless() {
        let mut g = Grid::new(3, 3).unwrap();
        let token = CancelToken::new();
        let out = run_search(&mut g, &SearchConfig::new(), |_| {}, &token);
        token.cancel();
        token.cancel();
        assert!(out.is_found());
    }

    #[test]
    fn not_found_is_distinct() {
        let mut g = Grid::new(1, 3).unwrap();
        g.set_wall(Cell::new(0, 1), true).unwrap();
        let out = run_search(&mut g, &SearchConfig::new(), |_| {}, &CancelToken::new());
        assert_eq!(out, SearchOutcome::NotFound);
        assert!(!out.is_found());
        assert!(!out.is_cancelled());
        assert_eq!(out.stats(g.snapshot()), None);
    }

    #[test]
    fn stats_and_display() {
        let mut g = Grid::new(3, 3).unwrap();
        let out = run_search(
            &mut g,
            &SearchConfig::new().with_diagonal(true),
            |_| {},
            &CancelToken::new(),
        );
        let stats = out.stats(g.snapshot()).unwrap();
        assert_eq!(stats.steps, 2);
        assert_eq!(stats.expanded, 3);
        assert_eq!(stats.to_string(), "Steps: 2   g(n): 2.828   expanded: 3");

        let whole = RunStats {
            steps: 4,
            cost: 4.0,
            expanded: 9,
        };
        assert_eq!(whole.to_string(), "Steps: 4   g(n): 4   expanded: 9");
    }
}
