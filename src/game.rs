//! One frame of the game: draw, advance, score, decide whether to go on.

use log::info;

use crate::input::{self, Input};
use crate::note::NoteName;
use crate::session::Session;
use crate::surface::{self, Rect, Surface};
use crate::synth::{NoteSequence, SoundOutput};

/// Appended to the score text once the last note has left the surface.
pub const FINISHED_MARKER: &str = " ✅ Finished!";

/// Text sink for the running score.
#[derive(Debug, Default, Clone)]
pub struct ScoreBoard {
    text: String,
}

impl ScoreBoard {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: String) {
        self.text = text;
    }

    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

/// Whether the driver should schedule another frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Finished,
}

/// Run one frame.
///
/// Clears the surface, draws the keyboard and notes as they are now, then
/// advances the notes and refreshes the score. Returns `Tick::Finished`
/// (after appending the marker) once every note has left the surface.
pub fn tick<S: Surface + ?Sized>(
    session: &mut Session,
    surface: &mut S,
    board: &mut ScoreBoard,
) -> Tick {
    surface.clear();
    draw_keyboard(session, surface);
    draw_notes(session, surface);

    session.advance();

    board.set(format!("Score: {} / {}", session.score(), session.total()));

    if session.is_complete() {
        board.append(FINISHED_MARKER);
        info!("session finished: {} / {}", session.score(), session.total());
        Tick::Finished
    } else {
        Tick::Continue
    }
}

/// Draw the hit band and one key per natural note along the bottom edge,
/// and hand the new key layout to the session for click lookups.
fn draw_keyboard<S: Surface + ?Sized>(session: &mut Session, surface: &mut S) {
    let width = surface.width();
    let height = surface.height();
    let key_height = session.config().key_height;
    let regions = input::layout_keyboard(width, height, key_height);
    session.set_layout(height, regions.clone());

    let window = session.hit_window();
    surface.fill_rect(
        Rect::new(0.0, window.top, width, window.bottom - window.top),
        surface::WINDOW_TINT,
    );

    for key in &regions {
        let rect = Rect::new(key.x, key.y, key.width, key.height);
        surface.fill_rect(rect, surface::WHITE);
        surface.stroke_rect(rect, surface::BLACK);
        let mut label = [0u8; 4];
        surface.fill_text(
            key.name.letter().encode_utf8(&mut label),
            key.x + key.width / 2.0 - 4.0,
            height - 30.0,
            surface::BLACK,
        );
    }
}

fn draw_notes<S: Surface + ?Sized>(session: &Session, surface: &mut S) {
    let key_width = surface.width() / NoteName::KEYBOARD.len() as f32;
    let config = session.config();
    for note in session.notes() {
        let x = note.name.column() as f32 * key_width;
        let color = if note.hit {
            surface::LIGHT_GREEN
        } else {
            surface::SKY_BLUE
        };
        surface.fill_rect(
            Rect::new(
                x + config.note_inset,
                note.position,
                key_width - 2.0 * config.note_inset,
                config.note_height,
            ),
            color,
        );
    }
}

/// Handle one input as it arrives: judge it, then sound the resolved note
/// whether or not it scored.
pub fn dispatch(session: &mut Session, sound: &dyn SoundOutput, event: Input) -> Option<NoteName> {
    let name = session.handle(event)?;
    sound.start(&NoteSequence::single(
        name.pitch(),
        session.config().note_duration,
    ));
    Some(name)
}

/// Result of a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoplayReport {
    pub score: u32,
    pub total: usize,
    pub ticks: u64,
    pub text: String,
}

/// Play a whole session without a player: before every frame, press the key
/// of whatever note is in the hit window.
pub fn autoplay<S: Surface + ?Sized>(
    session: &mut Session,
    surface: &mut S,
    sound: &dyn SoundOutput,
) -> AutoplayReport {
    let mut board = ScoreBoard::default();
    let mut ticks = 0u64;

    loop {
        if let Some(name) = session.active_note().map(|n| n.name) {
            dispatch(session, sound, Input::Key(name.letter()));
        }
        ticks += 1;
        if tick(session, surface, &mut board) == Tick::Finished {
            break;
        }
    }

    AutoplayReport {
        score: session.score(),
        total: session.total(),
        ticks,
        text: board.text().to_string(),
    }
}
