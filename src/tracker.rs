//! The tracking loop: page notifications in, finished games out to history.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    db::{HistoryStore, KeyValueStore, models::GameHistoryEntry},
    error::TrackerError,
    lifecycle::{GameEnd, GameMonitor},
    page::{CaptureFrame, PageSignals},
    scheduler::{CancellationToken, DEFAULT_FRAME_INTERVAL, FrameTicker},
};

/// What became of a tracked game.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerOutcome {
    /// Scored game, written to history.
    Saved(GameHistoryEntry),
    /// Zero-score game, not written.
    Discarded { solved: usize },
    /// Stopped before the game ended.
    Cancelled,
    /// Capture ran out before the game ended.
    Incomplete { solved: usize },
}

/// Running totals for the game in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveProgress {
    pub solved: usize,
    pub avg_time: Option<f64>,
}

/// Watches one game on the page and writes it to history when it ends.
///
/// The tracker is the only writer of history.
pub struct Tracker {
    monitor: GameMonitor,
    frame_interval: Duration,
    progress: Option<watch::Sender<LiveProgress>>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self {
            monitor: GameMonitor::new(),
            frame_interval,
            progress: None,
        }
    }

    /// Publish live progress after every solved problem.
    pub fn with_progress(mut self, progress: watch::Sender<LiveProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run until the game ends or `cancel` fires.
    ///
    /// Problem text is read whenever `page` changes; several rapid changes
    /// may arrive as one, and only the latest text counts. End detection runs
    /// once per frame.
    pub async fn run<S: KeyValueStore>(
        mut self,
        mut page: watch::Receiver<PageSignals>,
        history: &HistoryStore<S>,
        cancel: &CancellationToken,
    ) -> Result<TrackerOutcome, TrackerError> {
        let mut frames = FrameTicker::new(self.frame_interval);
        let mut page_open = true;

        info!("waiting for game to start");
        let initial = page.borrow_and_update().problem.clone();
        self.observe(initial.as_deref(), frames.elapsed());

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!("tracker cancelled");
                    return Ok(TrackerOutcome::Cancelled);
                }

                changed = page.changed(), if page_open => {
                    if changed.is_err() {
                        warn!("page signal source closed");
                        page_open = false;
                        continue;
                    }
                    let problem = page.borrow_and_update().problem.clone();
                    self.observe(problem.as_deref(), frames.elapsed());
                }

                _ = frames.tick() => {
                    let signals = page.borrow().clone();
                    if let Some(end) = self.monitor.on_frame(&signals, Utc::now()) {
                        return finish(end, history).await;
                    }
                }
            }
        }
    }

    /// Feed a captured trace through the recorder and end detector.
    ///
    /// Each frame counts as both a change notification and an animation frame.
    /// The game is stamped from the capture's `started_at` when present,
    /// otherwise with the current time.
    pub async fn replay<S: KeyValueStore>(
        mut self,
        frames: &[CaptureFrame],
        history: &HistoryStore<S>,
    ) -> Result<TrackerOutcome, TrackerError> {
        let origin = frames.iter().find_map(|f| f.started_at);

        for frame in frames {
            self.observe(frame.problem.as_deref(), frame.at());

            let finished_at = origin
                .and_then(|origin| frame.wall_clock(origin))
                .unwrap_or_else(Utc::now);
            if let Some(end) = self.monitor.on_frame(&frame.signals(), finished_at) {
                return finish(end, history).await;
            }
        }

        let solved = self.monitor.recorder().session().len();
        warn!(solved, "capture ended before the game finished");
        Ok(TrackerOutcome::Incomplete { solved })
    }

    fn observe(&mut self, problem: Option<&str>, now: Duration) {
        if self.monitor.on_problem_changed(problem, now).is_none() {
            return;
        }

        if let Some(progress) = &self.progress {
            let session = self.monitor.recorder().session();
            progress.send_replace(LiveProgress {
                solved: session.len(),
                avg_time: session.average_time(),
            });
        }
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

async fn finish<S: KeyValueStore>(
    end: GameEnd,
    history: &HistoryStore<S>,
) -> Result<TrackerOutcome, TrackerError> {
    match end {
        GameEnd::Discarded { solved } => Ok(TrackerOutcome::Discarded { solved }),
        GameEnd::Completed(entry) => match history.append(&entry).await {
            Ok(_) => Ok(TrackerOutcome::Saved(entry)),
            Err(source) => {
                error!(score = entry.score, error = %source, "failed to save finished game");
                Err(TrackerError::Persist {
                    entry: Box::new(entry),
                    source,
                })
            }
        },
    }
}
