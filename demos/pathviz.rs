//! Terminal A* visualiser.
//!
//! Run: cargo run --bin pathviz

use std::error::Error;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use pathviz_demo::screen::{self, Screen};
use pathviz_demo::{Action, COLS, Demo, ROWS};
use pathviz_search::run_search;

fn main() {
    let mut screen = Screen::new();
    let res = screen.init().map_err(Into::into).and_then(|()| event_loop(&mut screen));
    screen.close();

    if let Err(e) = res {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn event_loop(screen: &mut Screen) -> Result<(), Box<dyn Error>> {
    let mut rng = rand::rng();
    let mut demo = Demo::new(ROWS, COLS, &mut rng)?;
    screen.draw(&demo.grid, &demo.hud())?;

    loop {
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(k) if k.kind == KeyEventKind::Press => match Action::from_key(k.code) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::Run) => {
                    if run(&mut demo, screen)? {
                        return Ok(());
                    }
                }
                Some(a) => demo.apply(a, &mut rng),
                None => {}
            },
            Event::Mouse(me) => {
                let c = screen::cell_at(me.column, me.row);
                match me.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => demo.paint(c),
                    MouseEventKind::Moved => {
                        demo.hover = demo.grid.in_bounds(c).then_some(c);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        screen.draw(&demo.grid, &demo.hud())?;
    }
}

/// Run one search, redrawing on every published step. Stop and quit keys
/// are read between steps. Returns `true` if the user asked to quit.
fn run(demo: &mut Demo, screen: &mut Screen) -> Result<bool, Box<dyn Error>> {
    let token = demo.begin_run();
    let config = demo.config;
    let hud = demo.hud();
    let mut quit = false;
    let mut failure: Option<Box<dyn Error>> = None;

    let outcome = run_search(
        &mut demo.grid,
        &config,
        |grid| {
            if let Err(e) = screen.draw(grid, &hud) {
                failure.get_or_insert(e.into());
                token.cancel();
                return;
            }
            while matches!(event::poll(Duration::ZERO), Ok(true)) {
                let Ok(Event::Key(k)) = event::read() else {
                    continue;
                };
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match Action::from_key(k.code) {
                    Some(Action::Stop) => token.cancel(),
                    Some(Action::Quit) => {
                        quit = true;
                        token.cancel();
                    }
                    _ => {}
                }
            }
        },
        &token,
    );

    if let Some(e) = failure {
        return Err(e);
    }
    demo.finish_run(&outcome);
    Ok(quit)
}
