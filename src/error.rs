//! Error types for the NBA Intel forecast CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, IntelError>;

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Configuration error in `{field}`: {message}")]
    Config { field: String, message: String },

    #[error("NBA stats API returned no data for {what}")]
    NoData { what: String },

    #[error("Result set `{set}` is missing column `{column}`")]
    MissingColumn { set: String, column: String },

    #[error("Invalid season: {season} (expected e.g. 2025-26 or 2025)")]
    InvalidSeason { season: String },

    #[error("Invalid stat category: {stat}")]
    InvalidStat { stat: String },

    #[error("Invalid prediction {value}: must be a finite, non-negative number")]
    InvalidPrediction { value: f64 },

    #[error("Team not found: {query}")]
    TeamNotFound { query: String },

    #[error("Team query `{query}` is ambiguous: {candidates}")]
    AmbiguousTeam { query: String, candidates: String },

    #[error("Player not found on roster: {name}")]
    PlayerNotFound { name: String },

    #[error("Player query `{query}` is ambiguous: {candidates}")]
    AmbiguousPlayer { query: String, candidates: String },
}

impl From<anyhow::Error> for IntelError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<rusqlite::Error>() {
            Ok(db) => IntelError::Database(db),
            Err(other) => IntelError::Cache {
                message: other.to_string(),
            },
        }
    }
}
