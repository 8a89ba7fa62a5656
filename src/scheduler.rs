//! Frame ticking and cooperative cancellation for the tracker loop.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    time::{Instant, Interval, MissedTickBehavior},
};

/// Default poll period, one 60 Hz animation frame.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Cloneable cancellation flag shared between the tracker and its owner.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    sender: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once `cancel` has been called.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this only returns once cancelled.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Ticks once per frame and measures time since the tracker started.
///
/// Built on `tokio::time`, so tests running with paused time advance it
/// deterministically.
#[derive(Debug)]
pub struct FrameTicker {
    interval: Interval,
    started: Instant,
}

impl FrameTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            started: Instant::now(),
        }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Time since the ticker was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
