//! Think-time measurement for the card currently on screen.
use std::time::{Duration, Instant};

/// Start/stop timer owned by a review session.
pub trait ElapsedTimeTracker {
    /// Resets the timer and starts measuring.
    fn start(&mut self);
    /// Freezes the measurement. Does nothing when the timer is not running.
    fn stop(&mut self);
    /// Time measured so far, or the frozen measurement after `stop`.
    fn elapsed(&self) -> Duration;
}

#[derive(Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    measured: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}

impl ElapsedTimeTracker for Stopwatch {
    fn start(&mut self) {
        self.measured = Duration::ZERO;
        self.started_at = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.measured = started_at.elapsed();
        }
    }

    fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => started_at.elapsed(),
            None => self.measured,
        }
    }
}
