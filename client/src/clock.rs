//! Timed-step scheduler.
//!
//! Flows that pace themselves (auto-solve playback, the render loop) sleep
//! through a [`Clock`] instead of calling tokio directly, so tests can swap in
//! a [`ManualClock`] that records the requested delays and returns at once.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

#[async_trait::async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real time through `tokio::time::sleep`. Honors `tokio::time::pause`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait::async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Virtual clock: records every sleep, advances a counter, yields once.
#[derive(Debug, Default)]
pub struct ManualClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration slept so far, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Virtual time elapsed.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.sleeps.lock().unwrap_or_else(PoisonError::into_inner).iter().sum()
    }
}

#[async_trait::async_trait]
impl Clock for ManualClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap_or_else(PoisonError::into_inner).push(duration);
        tokio::task::yield_now().await;
    }
}
