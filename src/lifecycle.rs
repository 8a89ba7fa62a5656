//! Game end detection and the monitor that ties recording to it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    db::models::GameHistoryEntry,
    page::PageSignals,
    recorder::{SessionRecorder, SolvedRecord},
};

/// How a game finished.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEnd {
    /// Scored game, ready to be appended to history.
    Completed(GameHistoryEntry),
    /// Zero-score game, treated as a false start and not kept.
    Discarded { solved: usize },
}

/// Decides when a game is over. Fires at most once.
#[derive(Debug, Default)]
pub struct GameEndDetector {
    ended: bool,
}

impl GameEndDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// True when the countdown is at or below zero or the problem is gone.
    ///
    /// A missing or unreadable timer never counts as expired.
    pub fn end_condition(signals: &PageSignals) -> bool {
        let timer_expired = signals.seconds_left().is_some_and(|left| left <= 0);
        let problem_gone = signals.problem_text().is_none();
        timer_expired || problem_gone
    }

    /// Check the page once. On the first poll that sees the game over (after at
    /// least one problem has been shown), take the recorder's session and
    /// build the finished game.
    pub fn poll(
        &mut self,
        signals: &PageSignals,
        recorder: &mut SessionRecorder,
        finished_at: DateTime<Utc>,
    ) -> Option<GameEnd> {
        if self.ended || !recorder.has_seen_problem() || !Self::end_condition(signals) {
            return None;
        }

        self.ended = true;

        let score = match signals.score() {
            Some(score) => score,
            None => {
                warn!(score_text = ?signals.score, "unable to read final score, treating as 0");
                0
            }
        };

        let session = recorder.take_session();
        let solved = session.len();
        info!(
            score,
            solved,
            avg_time = ?session.average_time(),
            "game finished"
        );

        if score == 0 {
            info!("zero-score game discarded");
            return Some(GameEnd::Discarded { solved });
        }

        Some(GameEnd::Completed(GameHistoryEntry::from_session(
            session,
            score,
            finished_at,
        )))
    }
}

/// Recorder plus end detector for one game.
#[derive(Debug, Default)]
pub struct GameMonitor {
    recorder: SessionRecorder,
    detector: GameEndDetector,
}

impl GameMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Problem-change notification. Ignored once the game has ended.
    pub fn on_problem_changed(&mut self, text: Option<&str>, now: Duration) -> Option<&SolvedRecord> {
        if self.detector.has_ended() {
            return None;
        }
        self.recorder.observe(text.unwrap_or_default(), now)
    }

    /// Per-frame poll.
    pub fn on_frame(&mut self, signals: &PageSignals, finished_at: DateTime<Utc>) -> Option<GameEnd> {
        self.detector.poll(signals, &mut self.recorder, finished_at)
    }

    pub fn has_ended(&self) -> bool {
        self.detector.has_ended()
    }

    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }
}
