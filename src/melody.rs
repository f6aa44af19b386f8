//! The fixed melody a session asks the player to perform.

use crate::error::{GameError, Result};
use crate::note::NoteName;

/// Twinkle Twinkle Little Star, first phrase
pub const TWINKLE: [NoteName; 14] = [
    NoteName::C,
    NoteName::C,
    NoteName::G,
    NoteName::G,
    NoteName::A,
    NoteName::A,
    NoteName::G,
    NoteName::F,
    NoteName::F,
    NoteName::E,
    NoteName::E,
    NoteName::D,
    NoteName::D,
    NoteName::C,
];

/// An ordered, non-empty sequence of notes. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Melody {
    notes: Vec<NoteName>,
}

impl Melody {
    pub fn new(notes: Vec<NoteName>) -> Result<Self> {
        if notes.is_empty() {
            return Err(GameError::Melody("melody has no notes".into()));
        }
        Ok(Self { notes })
    }

    pub fn twinkle() -> Self {
        Self {
            notes: TWINKLE.to_vec(),
        }
    }

    pub fn notes(&self) -> &[NoteName] {
        &self.notes
    }

    /// Number of notes, which is also the best achievable score
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for Melody {
    fn default() -> Self {
        Self::twinkle()
    }
}

/// Parse a melody written as note letters, e.g. `"C C G G A A G"` or `"ccggaag"`.
///
/// Whitespace, commas and bar lines (`|`) separate notes and are otherwise
/// ignored. Letters are case-insensitive. Any other character is rejected.
pub fn parse(input: &str) -> Result<Melody> {
    let mut notes = Vec::new();

    for (pos, c) in input.chars().enumerate() {
        match c {
            ' ' | '\t' | '\n' | '\r' | ',' | '|' => continue,
            _ => {
                let name = NoteName::from_letter(c.to_ascii_uppercase()).ok_or_else(|| {
                    GameError::Melody(format!("unknown note '{}' at position {}", c, pos + 1))
                })?;
                notes.push(name);
            }
        }
    }

    Melody::new(notes)
}
