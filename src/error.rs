//! Error types for the Cricbuzz analytics CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, CricketError>;

#[derive(Error, Debug)]
pub enum CricketError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Snapshot {path} is corrupt: {message}")]
    CorruptSnapshot { path: String, message: String },

    #[error("Cricbuzz API returned no data")]
    NoData,

    #[error("Cricbuzz API rate limit reached")]
    RateLimited,

    #[error("Player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("No roster player with id {id}")]
    RosterPlayerNotFound { id: i64 },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unknown query number: {number} (expected 1-25)")]
    UnknownQuery { number: u8 },
}

impl CricketError {
    /// Business-rule violations are reported as warnings rather than failures.
    pub fn is_user_warning(&self) -> bool {
        matches!(
            self,
            CricketError::PlayerNotFound { .. }
                | CricketError::RosterPlayerNotFound { .. }
                | CricketError::InvalidInput { .. }
                | CricketError::NoData
                | CricketError::RateLimited
        )
    }
}
