//! Editor state for the terminal demo.
//!
//! Everything here is independent of the terminal: [`Demo`] owns the grid,
//! the run session and the settings, and turns [`Action`]s into edits. The
//! [`screen`] module draws it; the `pathviz` binary wires the two together.

pub mod screen;

use crossterm::event::KeyCode;
use rand::Rng;

use pathviz_core::{Cell, Grid, GridError, INITIAL_WALL_DENSITY, RANDOM_WALL_DENSITY};
use pathviz_search::{CancelToken, SearchConfig, SearchOutcome, Session};

pub const ROWS: usize = 22;
pub const COLS: usize = 34;

pub const DEFAULT_DELAY_MS: u64 = 20;
const DELAY_STEP_MS: u64 = 10;
const MAX_DELAY_MS: u64 = 500;

pub const HELP_TEXT: &str = "\
r run  s stop  c clear  n random  d diagonal  a animate  +/- speed  \
w/e/1/2 wall/erase/start/goal  f scores  q quit";

/// What a click or drag does to the cell under the pointer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Brush {
    #[default]
    Wall,
    Erase,
    Start,
    Goal,
}

impl Brush {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Erase => "erase",
            Self::Start => "start",
            Self::Goal => "goal",
        }
    }

    /// Paint `c`. Walls are never placed on the start or goal, and moving
    /// either endpoint clears the wall under its new position.
    pub fn apply(self, grid: &mut Grid, c: Cell) -> Result<(), GridError> {
        match self {
            Self::Wall => {
                if c != grid.start() && c != grid.goal() {
                    grid.set_wall(c, true)?;
                }
            }
            Self::Erase => grid.set_wall(c, false)?,
            Self::Start => {
                grid.set_start(c)?;
                grid.set_wall(c, false)?;
            }
            Self::Goal => {
                grid.set_goal(c)?;
                grid.set_wall(c, false)?;
            }
        }
        Ok(())
    }
}

/// A user command, decoupled from the key that triggered it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Run,
    Stop,
    Clear,
    Randomize,
    ToggleDiagonal,
    ToggleAnimate,
    ToggleScores,
    Faster,
    Slower,
    SetBrush(Brush),
    Quit,
}

impl Action {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        let a = match code {
            KeyCode::Char('r') | KeyCode::Enter => Self::Run,
            KeyCode::Char('s') | KeyCode::Char(' ') => Self::Stop,
            KeyCode::Char('c') => Self::Clear,
            KeyCode::Char('n') => Self::Randomize,
            KeyCode::Char('d') => Self::ToggleDiagonal,
            KeyCode::Char('a') => Self::ToggleAnimate,
            KeyCode::Char('f') => Self::ToggleScores,
            KeyCode::Char('+') | KeyCode::Char('=') => Self::Faster,
            KeyCode::Char('-') => Self::Slower,
            KeyCode::Char('w') => Self::SetBrush(Brush::Wall),
            KeyCode::Char('e') => Self::SetBrush(Brush::Erase),
            KeyCode::Char('1') => Self::SetBrush(Brush::Start),
            KeyCode::Char('2') => Self::SetBrush(Brush::Goal),
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(a)
    }
}

/// Read-only view of the settings the screen shows next to the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub brush: Brush,
    pub config: SearchConfig,
    pub show_scores: bool,
    pub hover: Option<Cell>,
    pub status: String,
}

/// The demo's editor state.
#[derive(Debug)]
pub struct Demo {
    pub grid: Grid,
    pub config: SearchConfig,
    pub brush: Brush,
    pub show_scores: bool,
    pub hover: Option<Cell>,
    pub status: String,
    session: Session,
}

impl Demo {
    /// A randomly walled grid with diagonal moves off and animation on.
    pub fn new<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self, GridError> {
        let mut grid = Grid::new(rows, cols)?;
        grid.randomize(INITIAL_WALL_DENSITY, rng);
        Ok(Self {
            grid,
            config: SearchConfig::new()
                .with_animate(true)
                .with_delay_ms(DEFAULT_DELAY_MS),
            brush: Brush::default(),
            show_scores: false,
            hover: None,
            status: String::new(),
            session: Session::new(),
        })
    }

    pub fn hud(&self) -> Hud {
        Hud {
            brush: self.brush,
            config: self.config,
            show_scores: self.show_scores,
            hover: self.hover,
            status: self.status.clone(),
        }
    }

    /// Cancel whatever run is live and hand out the token for a new one.
    pub fn begin_run(&mut self) -> CancelToken {
        let token = self.session.begin();
        self.grid.clear_search();
        self.status.clear();
        token
    }

    /// Record how a run ended.
    pub fn finish_run(&mut self, outcome: &SearchOutcome) {
        self.status = match outcome {
            SearchOutcome::Found { .. } => outcome
                .stats(self.grid.snapshot())
                .map(|s| s.to_string())
                .unwrap_or_default(),
            SearchOutcome::NotFound => "No path found.".to_string(),
            SearchOutcome::Cancelled => "Stopped.".to_string(),
        };
    }

    /// Paint `c` with the current brush. Any edit discards the last search.
    pub fn paint(&mut self, c: Cell) {
        if !self.grid.in_bounds(c) {
            return;
        }
        self.session.stop();
        if let Err(e) = self.brush.apply(&mut self.grid, c) {
            log::warn!("edit rejected: {e}");
            return;
        }
        self.grid.clear_search();
        self.status.clear();
    }

    /// Apply every action except [`Action::Run`] and [`Action::Quit`], which
    /// the event loop handles.
    pub fn apply<R: Rng>(&mut self, action: Action, rng: &mut R) {
        match action {
            Action::Stop => self.session.stop(),
            Action::Clear => {
                self.session.stop();
                self.grid.clear_walls();
                self.grid.clear_search();
                self.status.clear();
            }
            Action::Randomize => {
                self.session.stop();
                self.grid.randomize(RANDOM_WALL_DENSITY, rng);
                self.status.clear();
            }
            Action::ToggleDiagonal => self.config.diagonal = !self.config.diagonal,
            Action::ToggleAnimate => self.config.animate = !self.config.animate,
            Action::ToggleScores => self.show_scores = !self.show_scores,
            Action::Faster => {
                let ms = (self.config.delay.as_millis() as u64).saturating_sub(DELAY_STEP_MS);
                self.config = self.config.with_delay_ms(ms);
            }
            Action::Slower => {
                let ms = (self.config.delay.as_millis() as u64 + DELAY_STEP_MS).min(MAX_DELAY_MS);
                self.config = self.config.with_delay_ms(ms);
            }
            Action::SetBrush(b) => self.brush = b,
            Action::Run | Action::Quit => {}
        }
    }
}
