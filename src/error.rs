//! Error types for the tracker library.

use thiserror::Error;

use crate::db::models::GameHistoryEntry;

/// Failure talking to the key-value store that holds game history.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("history encoding error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum TrackerError {
    /// The game finished but could not be written. The entry is handed back
    /// so the caller can report or retry it.
    #[error("failed to persist game with score {}: {source}", entry.score)]
    Persist {
        entry: Box<GameHistoryEntry>,
        #[source]
        source: StoreError,
    },
}
