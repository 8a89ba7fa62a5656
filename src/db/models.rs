use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recorder::{Session, SolvedRecord};

/// A finished game as stored in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    #[serde(default)]
    pub solved: Vec<SolvedRecord>,
    pub duration: f64,
    #[serde(default)]
    pub avg_time: Option<f64>,
}

impl GameHistoryEntry {
    pub fn from_session(session: Session, score: u32, timestamp: DateTime<Utc>) -> Self {
        let duration = session.duration();
        let avg_time = session.average_time();

        Self {
            timestamp,
            score,
            solved: session.into_records(),
            duration,
            avg_time,
        }
    }

    /// Zero-score games are false starts and never kept.
    pub fn is_false_start(&self) -> bool {
        self.score == 0
    }
}
