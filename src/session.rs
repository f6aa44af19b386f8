//! All mutable game state for one play-through.

use log::{debug, trace};

use crate::config::GameConfig;
use crate::error::Result;
use crate::input::{self, Input, KeyRegion};
use crate::judge::{self, HitWindow, Judgement};
use crate::melody::Melody;
use crate::note::NoteName;
use crate::scheduler::{self, FallingNote};

/// The melody, its falling notes, the score and the last keyboard layout.
///
/// Owned by whoever drives ticks. Input handlers borrow it mutably between
/// ticks and must not tick themselves.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    melody: Melody,
    notes: Vec<FallingNote>,
    score: u32,
    key_regions: Vec<KeyRegion>,
    surface_height: f32,
}

impl Session {
    /// Start a session. `surface_height` positions the hit window until the
    /// first frame reports the real size.
    ///
    /// Fails if the config is invalid or could never let this melody finish
    /// on a surface of that height.
    pub fn new(melody: Melody, config: GameConfig, surface_height: f32) -> Result<Self> {
        config.validate()?;
        config.check_session(melody.len(), surface_height)?;
        let notes = scheduler::initialize(&melody, config.spacing);
        Ok(Self {
            config,
            melody,
            notes,
            score: 0,
            key_regions: Vec::new(),
            surface_height,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn melody(&self) -> &Melody {
        &self.melody
    }

    pub fn notes(&self) -> &[FallingNote] {
        &self.notes
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best achievable score
    pub fn total(&self) -> usize {
        self.melody.len()
    }

    pub fn key_regions(&self) -> &[KeyRegion] {
        &self.key_regions
    }

    pub fn hit_window(&self) -> HitWindow {
        HitWindow::for_surface(self.surface_height, &self.config)
    }

    /// The note that would be judged if an input arrived now.
    pub fn active_note(&self) -> Option<&FallingNote> {
        judge::active_note(&self.notes, self.hit_window()).map(|i| &self.notes[i])
    }

    pub fn is_complete(&self) -> bool {
        scheduler::is_session_complete(&self.notes, self.surface_height)
    }

    /// Record the surface size and keyboard layout of the current frame.
    pub fn set_layout(&mut self, surface_height: f32, key_regions: Vec<KeyRegion>) {
        self.surface_height = surface_height;
        self.key_regions = key_regions;
    }

    /// Move every note one step down.
    pub fn advance(&mut self) {
        scheduler::advance(&mut self.notes, self.config.step);
    }

    /// Map an input to a note using the current keyboard layout.
    pub fn resolve(&self, event: Input) -> Option<NoteName> {
        input::resolve(event, &self.key_regions)
    }

    /// Judge a played note against the note in the hit window right now.
    pub fn judge(&mut self, name: NoteName) -> Judgement {
        let window = self.hit_window();
        let judgement = judge::check_hit(name, &mut self.notes, window, &mut self.score);
        match judgement {
            Judgement::Hit(idx) => {
                debug!("hit {:?} (note {}), score {}", name, idx, self.score);
            }
            Judgement::WrongNote(idx) => {
                trace!("played {:?}, expected {:?}", name, self.notes[idx].name);
            }
            Judgement::Empty => {
                trace!("played {:?} with nothing in the window", name);
            }
        }
        judgement
    }

    /// Resolve an input and judge it immediately against the current state.
    ///
    /// Returns the resolved note, hit or not.
    pub fn handle(&mut self, event: Input) -> Option<NoteName> {
        let Some(name) = self.resolve(event) else {
            trace!("ignored input {:?}", event);
            return None;
        };
        self.judge(name);
        Some(name)
    }
}
