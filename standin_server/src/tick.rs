//! Tick gate.
//!
//! Rate-limits simulation steps to at most one per interval. The clock starts
//! on first use and is reset each time a step is released. A caller that
//! shows up late is released immediately and the missed time is dropped, so
//! there is never a burst of catch-up steps.

use std::time::{Duration, Instant};

/// Fixed-interval gate in front of the simulation step.
#[derive(Debug, Clone)]
pub struct TickGate {
    interval: Duration,
    last_release: Option<Instant>,
}

impl TickGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_release: None,
        }
    }

    /// True until the clock has been started.
    pub fn is_idle(&self) -> bool {
        self.last_release.is_none()
    }

    /// When the gate last let a step through (or was started).
    pub fn last_release(&self) -> Option<Instant> {
        self.last_release
    }

    /// Starts the clock if needed and returns how long the caller still has
    /// to wait, or `None` if the interval has already elapsed.
    pub fn remaining(&mut self) -> Option<Duration> {
        let since = *self.last_release.get_or_insert_with(Instant::now);
        let elapsed = since.elapsed();
        (elapsed < self.interval).then(|| self.interval - elapsed)
    }

    /// Restarts the interval from now.
    pub fn release(&mut self) {
        self.last_release = Some(Instant::now());
    }

    /// Sleeps the current thread until the interval has elapsed, then
    /// restarts it.
    pub fn wait_blocking(&mut self) {
        while let Some(left) = self.remaining() {
            std::thread::sleep(left);
        }
        self.release();
    }

    /// Async form of [`wait_blocking`](Self::wait_blocking).
    ///
    /// If the future is dropped before it completes the interval is not
    /// restarted; the next wait picks up where this one left off.
    pub async fn wait(&mut self) {
        while let Some(left) = self.remaining() {
            tokio::time::sleep(left).await;
        }
        self.release();
    }
}
