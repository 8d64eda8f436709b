//! Repeating timer with explicit arm/disarm.
//!
//! At most one timer is live per [`PollScheduler`]: [`PollScheduler::arm`]
//! always tears down the previous timer before starting a new one, and
//! dropping the scheduler disarms it. Each tick spawns the callback's future
//! as its own task, so a slow tick never delays or blocks the next one.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

struct ArmedTimer {
    period: Duration,
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owner of zero or one repeating timer.
///
/// Must be armed from within a Tokio runtime.
#[derive(Default)]
pub struct PollScheduler {
    active: Option<ArmedTimer>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start calling `callback` every `period`, first after one full period.
    ///
    /// Any timer armed earlier is cancelled first.
    pub fn arm<F, Fut>(&mut self, period: Duration, callback: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.disarm();

        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        tokio::spawn(callback());
                    }
                }
            }
        });

        tracing::debug!(period_ms = period.as_millis() as u64, "Poll timer armed");
        self.active = Some(ArmedTimer {
            period,
            cancel_token,
            handle,
        });
    }

    /// Cancel the live timer, if any. Ticks already dispatched run to completion.
    pub fn disarm(&mut self) {
        if let Some(timer) = self.active.take() {
            timer.cancel_token.cancel();
            timer.handle.abort();
            tracing::debug!("Poll timer disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// Period of the live timer.
    pub fn period(&self) -> Option<Duration> {
        self.active.as_ref().map(|timer| timer.period)
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl std::fmt::Debug for PollScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollScheduler")
            .field("armed", &self.is_armed())
            .field("period", &self.period())
            .finish()
    }
}
