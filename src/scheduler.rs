//! Falling notes: one per melody entry, staggered above the surface and
//! advanced a fixed step every tick.

use crate::melody::Melody;
use crate::note::NoteName;

/// One melody entry on its way down the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingNote {
    pub name: NoteName,
    pub pitch: u8,
    /// Vertical offset from the top edge. Negative while still above the surface.
    pub position: f32,
    pub hit: bool,
}

/// Build the falling notes for a melody. Note `i` starts at `-(i * spacing)`.
pub fn initialize(melody: &Melody, spacing: f32) -> Vec<FallingNote> {
    melody
        .notes()
        .iter()
        .enumerate()
        .map(|(i, &name)| FallingNote {
            name,
            pitch: name.pitch(),
            position: 0.0 - i as f32 * spacing,
            hit: false,
        })
        .collect()
}

/// Move every note down by `step`. Call once per tick.
pub fn advance(notes: &mut [FallingNote], step: f32) {
    for note in notes.iter_mut() {
        note.position += step;
    }
}

/// True once every note has scrolled past the bottom edge.
pub fn is_session_complete(notes: &[FallingNote], surface_height: f32) -> bool {
    notes.iter().all(|n| n.position > surface_height)
}

/// Number of advances until a note at `start` is strictly below `target`.
pub fn ticks_to_pass(start: f32, target: f32, step: f32) -> u64 {
    if start > target {
        return 0;
    }
    ((target - start) / step).floor() as u64 + 1
}
