//! Tuning constants for a session, optionally loaded from a config file.
//!
//! The defaults are tuned by feel for a surface a few hundred pixels tall.
//! Changing `step` or the hit window offsets changes how the game plays, so
//! re-tune them together.

use std::fs;
use std::path::Path;

use crate::error::{GameError, Result};

/// Smallest accepted `step`. Smaller steps feel frozen and, far enough
/// from zero, no longer move an f32 position at all.
pub const MIN_STEP: f32 = 0.01;

/// Timing and layout constants, all in surface pixels unless noted.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Position advance of every falling note per tick
    pub step: f32,
    /// Initial gap between consecutive notes of the melody
    pub spacing: f32,
    /// Hit window opens this far above the bottom edge
    pub window_top: f32,
    /// Hit window closes this far above the bottom edge
    pub window_bottom: f32,
    /// Height of the keyboard strip along the bottom edge
    pub key_height: f32,
    /// Drawn height of a falling note
    pub note_height: f32,
    /// Horizontal inset of a falling note inside its key column
    pub note_inset: f32,
    /// Seconds each triggered pitch sounds
    pub note_duration: f64,
    /// Ticks per second of the terminal loop
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            step: 2.0,
            spacing: 100.0,
            window_top: 150.0,
            window_bottom: 60.0,
            key_height: 80.0,
            note_height: 20.0,
            note_inset: 5.0,
            note_duration: 0.3,
            fps: 60,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        let floats = [
            ("step", self.step),
            ("spacing", self.spacing),
            ("window_top", self.window_top),
            ("window_bottom", self.window_bottom),
            ("key_height", self.key_height),
            ("note_height", self.note_height),
            ("note_inset", self.note_inset),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(GameError::InvalidConfig(format!("{} must be a finite number", name)));
            }
        }
        if !self.note_duration.is_finite() {
            return Err(GameError::InvalidConfig("note_duration must be a finite number".into()));
        }
        if self.step < MIN_STEP {
            return Err(GameError::InvalidConfig(format!("step must be at least {}", MIN_STEP)));
        }
        if !(self.spacing >= 0.0) {
            return Err(GameError::InvalidConfig("spacing must not be negative".into()));
        }
        if !(self.window_top > self.window_bottom) {
            return Err(GameError::InvalidConfig(
                "window_top must be greater than window_bottom".into(),
            ));
        }
        if !(self.key_height > 0.0 && self.note_height > 0.0 && self.note_duration > 0.0) {
            return Err(GameError::InvalidConfig(
                "key_height, note_height and note_duration must be positive".into(),
            ));
        }
        if self.note_inset < 0.0 {
            return Err(GameError::InvalidConfig("note_inset must not be negative".into()));
        }
        if !(1..=240).contains(&self.fps) {
            return Err(GameError::InvalidConfig("fps must be between 1 and 240".into()));
        }
        Ok(())
    }

    /// Check that a melody of `melody_len` notes on a surface `surface_height`
    /// pixels tall can actually finish: every note must move on each tick and
    /// the bottom edge must be reachable.
    pub fn check_session(&self, melody_len: usize, surface_height: f32) -> Result<()> {
        if !surface_height.is_finite() || surface_height <= self.key_height {
            return Err(GameError::InvalidConfig(format!(
                "surface height {} must be finite and taller than the keyboard ({})",
                surface_height, self.key_height
            )));
        }
        let furthest = 0.0 - melody_len.saturating_sub(1) as f32 * self.spacing;
        if furthest + self.step == furthest || surface_height + self.step == surface_height {
            return Err(GameError::InvalidConfig(format!(
                "step {} is too small to move notes {} pixels apart",
                self.step, self.spacing
            )));
        }
        Ok(())
    }
}

/// Parse a single "key: value" line. Returns (key, value) or None.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let colon = trimmed.find(':')?;
    let key = trimmed[..colon].trim();
    let value = trimmed[colon + 1..].trim();
    Some((key, value))
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, line: usize) -> Result<T> {
    value.parse::<T>().map_err(|_| GameError::Config {
        line,
        message: format!("invalid value '{}' for {}", value, key),
    })
}

/// Parse config text, starting from the defaults.
///
/// Format (one per line, optional comments with #):
/// ```text
/// # pixels per tick
/// step: 2
/// window_top: 150
/// window_bottom: 60
/// fps: 60
/// ```
pub fn parse(content: &str) -> Result<GameConfig> {
    let mut config = GameConfig::default();

    for (line_idx, line) in content.lines().enumerate() {
        let line_num = line_idx + 1;
        let (key, value) = match parse_line(line) {
            Some(p) => p,
            None => {
                if !line.trim().is_empty() && !line.trim().starts_with('#') {
                    return Err(GameError::Config {
                        line: line_num,
                        message: format!("expected 'key: value', found '{}'", line.trim()),
                    });
                }
                continue;
            }
        };
        match key {
            "step" => config.step = parse_value(key, value, line_num)?,
            "spacing" => config.spacing = parse_value(key, value, line_num)?,
            "window_top" => config.window_top = parse_value(key, value, line_num)?,
            "window_bottom" => config.window_bottom = parse_value(key, value, line_num)?,
            "key_height" => config.key_height = parse_value(key, value, line_num)?,
            "note_height" => config.note_height = parse_value(key, value, line_num)?,
            "note_inset" => config.note_inset = parse_value(key, value, line_num)?,
            "note_duration" => config.note_duration = parse_value(key, value, line_num)?,
            "fps" => config.fps = parse_value(key, value, line_num)?,
            _ => {
                return Err(GameError::Config {
                    line: line_num,
                    message: format!("unknown key '{}'", key),
                });
            }
        }
    }

    config.validate()?;
    Ok(config)
}

/// Load a config file.
pub fn load(path: &Path) -> Result<GameConfig> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}
