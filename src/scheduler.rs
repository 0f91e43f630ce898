//! One-shot tick timer for the game loop
//!
//! Unlike `tokio::time::interval`, nothing fires again until the loop calls
//! [`TickScheduler::schedule_in`] after finishing the previous tick, so ticks
//! can never stack up or overlap. The delay is chosen per tick, which lets the
//! speed power-up change the pace on the fly.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Default)]
pub struct TickScheduler {
    deadline: Option<Instant>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `delay` from now, replacing any pending deadline
    pub fn schedule_in(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }

    /// Disarm the timer; `fired` will not complete until rescheduled
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    /// Wait for the pending deadline, then disarm.
    ///
    /// Cancel-safe: if the future is dropped early the deadline stays armed.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}
