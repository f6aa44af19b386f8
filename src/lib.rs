//! Keyfall: a falling-notes rhythm game for the terminal.
//!
//! A melody scrolls down toward an on-screen keyboard; playing each note
//! (by typing its letter or clicking its key) while it is inside the hit
//! window scores a point.

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod judge;
pub mod live;
pub mod melody;
pub mod note;
pub mod scheduler;
pub mod session;
pub mod surface;
pub mod synth;
pub mod term;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{AutoplayReport, ScoreBoard, Tick};
pub use melody::Melody;
pub use note::NoteName;
pub use session::Session;
