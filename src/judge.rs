//! Matching a played note against the falling note in the hit window.

use crate::config::GameConfig;
use crate::note::NoteName;
use crate::scheduler::FallingNote;

/// The band of positions in which a note can be hit.
///
/// Both ends are open: a note exactly on either edge is outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    pub top: f32,
    pub bottom: f32,
}

impl HitWindow {
    pub fn for_surface(surface_height: f32, config: &GameConfig) -> Self {
        Self {
            top: surface_height - config.window_top,
            bottom: surface_height - config.window_bottom,
        }
    }

    pub fn contains(&self, position: f32) -> bool {
        position > self.top && position < self.bottom
    }
}

/// Outcome of one hit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    /// The note at this index was marked hit.
    Hit(usize),
    /// The note at this index is in the window but is a different note.
    WrongNote(usize),
    /// Nothing unhit is in the window.
    Empty,
}

/// Index of the first unhit note, in melody order, inside the window.
///
/// If spacing lets several notes share the window, the earliest one is the
/// only candidate; later ones wait their turn.
pub fn active_note(notes: &[FallingNote], window: HitWindow) -> Option<usize> {
    notes
        .iter()
        .position(|n| !n.hit && window.contains(n.position))
}

/// Check a played note against the active note. On a match the note is
/// marked hit and `score` goes up by one; otherwise nothing changes.
pub fn check_hit(
    played: NoteName,
    notes: &mut [FallingNote],
    window: HitWindow,
    score: &mut u32,
) -> Judgement {
    match active_note(notes, window) {
        Some(idx) if notes[idx].name == played => {
            notes[idx].hit = true;
            *score += 1;
            Judgement::Hit(idx)
        }
        Some(idx) => Judgement::WrongNote(idx),
        None => Judgement::Empty,
    }
}
