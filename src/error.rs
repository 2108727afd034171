//! Error type shared by the review session and its collaborators.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("invalid grade {0}: grades range from 0 to 5")]
    InvalidGrade(i32),

    #[error("{operation} requires a current card")]
    NoCurrentCard { operation: &'static str },

    #[error("stored {key} is not a timestamp: {value:?}")]
    CorruptAppState { key: &'static str, value: String },

    #[error("card not found: {0}")]
    CardNotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("user interface error: {0}")]
    Ui(String),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
