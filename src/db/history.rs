//! Append-only game history kept under a single key.

use tracing::{debug, info};

use super::{kv::KeyValueStore, models::GameHistoryEntry};
use crate::error::StoreError;

pub const DEFAULT_HISTORY_KEY: &str = "gameHistory";

/// History of completed games, oldest first.
pub struct HistoryStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_HISTORY_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load all stored games in insertion order. A missing key is an empty history.
    pub async fn read_all(&self) -> Result<Vec<GameHistoryEntry>, StoreError> {
        match self.store.get(&self.key).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Append a finished game. Zero-score games are refused and leave history unchanged.
    ///
    /// Returns whether the entry was written.
    pub async fn append(&self, entry: &GameHistoryEntry) -> Result<bool, StoreError> {
        if entry.is_false_start() {
            debug!("not storing zero-score game");
            return Ok(false);
        }

        let mut history = self.read_all().await?;
        history.push(entry.clone());
        self.write_all(&history).await?;

        info!(
            score = entry.score,
            solved = entry.solved.len(),
            games = history.len(),
            "game appended to history"
        );
        Ok(true)
    }

    /// Remove zero-score entries. Returns how many were removed.
    pub async fn sweep_zero_scores(&self) -> Result<usize, StoreError> {
        let history = self.read_all().await?;
        let before = history.len();

        let kept: Vec<GameHistoryEntry> = history
            .into_iter()
            .filter(|entry| !entry.is_false_start())
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            self.write_all(&kept).await?;
            info!(removed, remaining = kept.len(), "swept zero-score games");
        }

        Ok(removed)
    }

    async fn write_all(&self, history: &[GameHistoryEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(history)?;
        self.store.set(&self.key, &json).await
    }
}
