use crate::scoring::{Game, LookupMiss};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Credential Signing Error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Authentication Error: {0}")]
    Auth(String),

    /// The scoring table has no entry for the requested combination.
    #[error("Scoring configuration error: {0}")]
    ScoringConfig(#[from] LookupMiss),

    /// The combination exists but resolves to zero points.
    #[error("Scoring configuration error: {game} / {players} / {position} awards no points")]
    ZeroAward {
        game: Game,
        players: String,
        position: String,
    },

    /// The store failed to open; every operation is refused.
    #[error("Scoreboard not connected: {0}")]
    NotConnected(String),

    #[error("Player '{0}' not found in the scoreboard")]
    UnknownPlayer(String),

    #[error("Game column '{0}' not found in the scoreboard")]
    UnknownGameColumn(String),

    #[error("Scoreboard read failed: {0}")]
    StoreRead(String),

    #[error("Scoreboard write failed: {0}")]
    StoreWrite(String),

    /// The game cell was written but the Total cell was not. Nothing is rolled back.
    #[error("Game cell updated to {game_value} but Total was not written: {reason}")]
    TotalNotUpdated { game_value: u32, reason: String },
}

pub type ScoreResult<T> = Result<T, ScoreError>;
