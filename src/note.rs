/// Natural note names, in keyboard order (C through B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Every natural note, left to right as laid out on the keyboard
    pub const KEYBOARD: [NoteName; 7] = [
        NoteName::C,
        NoteName::D,
        NoteName::E,
        NoteName::F,
        NoteName::G,
        NoteName::A,
        NoteName::B,
    ];

    /// MIDI pitch in the octave starting at middle C (C4 = 60)
    pub fn pitch(self) -> u8 {
        match self {
            NoteName::C => 60,
            NoteName::D => 62,
            NoteName::E => 64,
            NoteName::F => 65,
            NoteName::G => 67,
            NoteName::A => 69,
            NoteName::B => 71,
        }
    }

    /// Column of this note on the keyboard (C=0, B=6)
    pub fn column(self) -> usize {
        match self {
            NoteName::C => 0,
            NoteName::D => 1,
            NoteName::E => 2,
            NoteName::F => 3,
            NoteName::G => 4,
            NoteName::A => 5,
            NoteName::B => 6,
        }
    }

    pub fn letter(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }

    /// Look up an uppercase note letter. Lowercase letters are not accepted
    /// here; callers normalize first.
    pub fn from_letter(c: char) -> Option<NoteName> {
        match c {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }
}

/// Frequency in Hz of a MIDI pitch (A4 = 440 Hz)
pub fn pitch_to_freq(pitch: u8) -> f64 {
    440.0 * 2.0_f64.powf((pitch as f64 - 69.0) / 12.0)
}
