use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("config error at line {line}: {message}")]
    Config { line: usize, message: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid melody: {0}")]
    Melody(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
