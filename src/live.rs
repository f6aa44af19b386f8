use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use log::info;

use crate::error::Result;
use crate::game::{self, ScoreBoard, Tick};
use crate::input::Input;
use crate::session::Session;
use crate::synth::SoundOutput;
use crate::term::TerminalSurface;

/// How often to wake up for input once the session is over
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Run an interactive session in the terminal until it finishes and the
/// player quits, or the player quits early.
pub fn run(session: &mut Session, sound: &dyn SoundOutput) -> Result<()> {
    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;

    guarded(
        &mut stdout,
        |out| {
            execute!(out, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
            Ok(())
        },
        |out| {
            info!(
                "session started: {} notes, step {}, {} fps",
                session.total(),
                session.config().step,
                session.config().fps
            );
            event_loop(session, sound, out)
        },
        |out| {
            let _ = execute!(out, cursor::Show, DisableMouseCapture, LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        },
    )
}

/// Run `enter` then `body`, and always `restore` afterwards, even when
/// `enter` fails partway.
fn guarded<S>(
    state: &mut S,
    enter: impl FnOnce(&mut S) -> Result<()>,
    body: impl FnOnce(&mut S) -> Result<()>,
    restore: impl FnOnce(&mut S),
) -> Result<()> {
    let result = enter(state).and_then(|()| body(state));
    restore(state);
    result
}

fn event_loop(session: &mut Session, sound: &dyn SoundOutput, stdout: &mut impl Write) -> Result<()> {
    let frame = Duration::from_secs_f64(1.0 / session.config().fps as f64);
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(cols, rows);
    let mut board = ScoreBoard::default();
    let mut finished = false;
    let mut next_frame = Instant::now();

    loop {
        let now = Instant::now();
        if !finished && now >= next_frame {
            finished = game::tick(session, &mut surface, &mut board) == Tick::Finished;
            draw(&surface, stdout, &board, finished)?;
            next_frame += frame;
            if next_frame < now {
                // Fell behind; don't try to catch up with a burst of ticks.
                next_frame = now + frame;
            }
        }

        let timeout = if finished {
            IDLE_POLL
        } else {
            next_frame.saturating_duration_since(Instant::now())
        };
        if !event::poll(timeout)? {
            continue;
        }

        // Inputs are judged the moment they arrive, against the notes as
        // they stand between frames.
        match event::read()? {
            Event::Key(KeyEvent {
                code: KeyCode::Esc,
                kind: KeyEventKind::Press,
                ..
            }) => {
                return Ok(());
            }

            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(());
            }

            Event::Key(KeyEvent {
                code: KeyCode::Char('q'),
                kind: KeyEventKind::Press,
                ..
            }) if finished => {
                return Ok(());
            }

            // Held keys repeat; each repeat counts as a fresh press.
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                game::dispatch(session, sound, Input::Key(c));
            }

            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if let Some((x, y)) = TerminalSurface::cell_center(column, row) {
                    game::dispatch(session, sound, Input::Pointer { x, y });
                }
            }

            Event::Resize(cols, rows) => {
                surface.resize(cols, rows);
                if finished {
                    draw(&surface, stdout, &board, finished)?;
                }
            }

            _ => {}
        }
    }
}

fn draw(
    surface: &TerminalSurface,
    stdout: &mut impl Write,
    board: &ScoreBoard,
    finished: bool,
) -> Result<()> {
    let hint = if finished { "   [q/Esc] quit" } else { "   [Esc] quit" };
    surface.render(stdout, &format!("{}{}", board.text(), hint))?;
    Ok(())
}
