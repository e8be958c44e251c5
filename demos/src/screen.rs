//! Crossterm rendering of a grid and its search snapshot.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, event, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{Cell, Grid};

use crate::{HELP_TEXT, Hud};

/// Terminal columns per grid cell; two keeps cells roughly square.
const CELL_WIDTH: u16 = 2;
/// Terminal row of the first grid row (the help line sits above it).
const GRID_TOP: u16 = 1;

/// Colours, flattened onto a white background where the palette is
/// translucent.
pub const EMPTY: (u8, u8, u8) = (255, 255, 255);
pub const WALL: (u8, u8, u8) = (169, 169, 169);
pub const PATH: (u8, u8, u8) = (255, 215, 0);
pub const CLOSED: (u8, u8, u8) = (205, 211, 216);
pub const OPEN: (u8, u8, u8) = (201, 233, 253);
pub const START: (u8, u8, u8) = (34, 139, 34);
pub const GOAL: (u8, u8, u8) = (205, 92, 92);

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// Colour of `c`: endpoints first, then wall, path, closed, open.
pub fn cell_color(grid: &Grid, c: Cell) -> (u8, u8, u8) {
    let snap = grid.snapshot();
    if c == grid.start() {
        START
    } else if c == grid.goal() {
        GOAL
    } else if grid.is_wall(c) {
        WALL
    } else if snap.on_path(c) {
        PATH
    } else if snap.is_closed(c) {
        CLOSED
    } else if snap.is_open(c) {
        OPEN
    } else {
        EMPTY
    }
}

/// Grid cell under terminal position (`column`, `row`). May be out of
/// bounds.
pub fn cell_at(column: u16, row: u16) -> Cell {
    Cell::new(row as i32 - GRID_TOP as i32, (column / CELL_WIDTH) as i32)
}

/// Text of the settings line.
pub fn settings_line(hud: &Hud) -> String {
    let onoff = |b: bool| if b { "on" } else { "off" };
    format!(
        "brush: {}   diagonal: {}   animate: {}   delay: {}ms",
        hud.brush.name(),
        onoff(hud.config.diagonal),
        onoff(hud.config.animate),
        hud.config.delay.as_millis()
    )
}

/// Text of the status line: the last run's result, plus the score of the
/// hovered cell when scores are shown.
pub fn status_line(grid: &Grid, hud: &Hud) -> String {
    let mut line = hud.status.clone();
    if !hud.show_scores {
        return line;
    }
    let score = hud.hover.and_then(|c| grid.snapshot().score(c).map(|s| (c, s)));
    if let Some((c, s)) = score {
        if !line.is_empty() {
            line.push_str("   ");
        }
        line.push_str(&format!("{c} f:{:.1} g:{:.1} h:{:.1}", s.f, s.g, s.h));
    }
    line
}

/// The terminal the demo draws into.
pub struct Screen {
    out: Stdout,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    /// Enter raw mode and the alternate screen, with mouse capture.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        self.out.flush()
    }

    /// Restore the terminal. Errors are ignored: this runs on every exit
    /// path, including after a failed draw.
    pub fn close(&mut self) {
        let _ = queue!(
            self.out,
            ResetColor,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }

    pub fn draw(&mut self, grid: &Grid, hud: &Hud) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(0, 0), ResetColor, Print(HELP_TEXT))?;
        queue!(self.out, terminal::Clear(ClearType::UntilNewLine))?;

        for r in 0..grid.rows() {
            queue!(self.out, cursor::MoveTo(0, GRID_TOP + r as u16))?;
            for c in 0..grid.cols() {
                let cell = Cell::new(r as i32, c as i32);
                let mark = if cell == grid.start() {
                    "S "
                } else if cell == grid.goal() {
                    "G "
                } else {
                    "  "
                };
                queue!(
                    self.out,
                    SetBackgroundColor(rgb(cell_color(grid, cell))),
                    SetForegroundColor(Color::Black),
                    Print(mark)
                )?;
            }
            queue!(self.out, ResetColor)?;
        }

        let below = GRID_TOP + grid.rows() as u16;
        queue!(
            self.out,
            cursor::MoveTo(0, below),
            Print(status_line(grid, hud)),
            terminal::Clear(ClearType::UntilNewLine),
            cursor::MoveTo(0, below + 1),
            Print(settings_line(hud)),
            terminal::Clear(ClearType::UntilNewLine)
        )?;
        self.out.flush()
    }
}
