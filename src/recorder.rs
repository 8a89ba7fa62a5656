//! Problem-change recording for a single game.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    classify::{ClassifiedFact, classify},
    problem::parse,
};

/// A fact together with the time the player took to answer it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedRecord {
    #[serde(flatten)]
    pub fact: ClassifiedFact,
    pub elapsed_seconds: f64,
}

/// Ordered records for one game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    records: Vec<SolvedRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SolvedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all elapsed times in seconds.
    pub fn duration(&self) -> f64 {
        self.records.iter().map(|r| r.elapsed_seconds).sum()
    }

    /// Average seconds per question, `None` before the first answer.
    pub fn average_time(&self) -> Option<f64> {
        if self.records.is_empty() {
            None
        } else {
            Some(self.duration() / self.records.len() as f64)
        }
    }

    pub fn into_records(self) -> Vec<SolvedRecord> {
        self.records
    }

    fn push(&mut self, record: SolvedRecord) {
        self.records.push(record);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RecorderState {
    Idle,
    Watching { text: String, since: Duration },
}

/// Watches the displayed problem text and turns each change into a solved record.
///
/// Timestamps are offsets from an arbitrary origin (page load, tracker start).
#[derive(Debug)]
pub struct SessionRecorder {
    state: RecorderState,
    session: Session,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            session: Session::new(),
        }
    }

    /// Process the problem text current at `now`.
    ///
    /// Empty text and repeats of the tracked text are ignored. Otherwise the
    /// previous problem (if any) is recorded with the time since it appeared,
    /// and the new text becomes the tracked problem.
    pub fn observe(&mut self, text: &str, now: Duration) -> Option<&SolvedRecord> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let previous = match &self.state {
            RecorderState::Watching { text: current, .. } if current == text => return None,
            RecorderState::Watching { text, since } => Some((text.clone(), *since)),
            RecorderState::Idle => None,
        };

        self.state = RecorderState::Watching {
            text: text.to_string(),
            since: now,
        };

        let Some((previous_text, since)) = previous else {
            info!(problem = %text, "first problem observed");
            return None;
        };

        let elapsed_seconds = now.saturating_sub(since).as_secs_f64();

        match parse(&previous_text) {
            Some(parsed) => {
                let record = SolvedRecord {
                    fact: classify(parsed),
                    elapsed_seconds,
                };
                debug!(
                    problem = %parsed,
                    property = ?record.fact.property,
                    elapsed_seconds,
                    "problem solved"
                );
                self.session.push(record);
                self.session.records.last()
            }
            None => {
                debug!(problem = %previous_text, "could not parse problem, skipping");
                None
            }
        }
    }

    /// True once any problem text has been seen.
    pub fn has_seen_problem(&self) -> bool {
        matches!(self.state, RecorderState::Watching { .. })
    }

    pub fn current_problem(&self) -> Option<&str> {
        match &self.state {
            RecorderState::Watching { text, .. } => Some(text),
            RecorderState::Idle => None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hand the recorded session over, leaving the recorder idle and empty.
    pub fn take_session(&mut self) -> Session {
        self.state = RecorderState::Idle;
        std::mem::take(&mut self.session)
    }
}

impl Default for SessionRecorder {
    fn default() -> Self {
        Self::new()
    }
}
