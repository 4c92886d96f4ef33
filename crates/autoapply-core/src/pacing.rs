//! Settle delays and keystroke pacing.
//!
//! Delays are cooperative yields that let the host page re-render between
//! interactions. Randomized values are drawn before awaiting so no RNG
//! handle is held across a suspension point.

use std::time::Duration;

use autoapply_config::TimingConfig;
use rand::Rng;

/// Drives every deliberate delay of a run from [`TimingConfig`].
#[derive(Debug, Clone)]
pub struct Pacer {
    timing: TimingConfig,
}

impl Pacer {
    pub fn new(timing: TimingConfig) -> Self {
        Self { timing }
    }

    /// A pacer that never sleeps.
    pub fn instant() -> Self {
        Self::new(TimingConfig::zero())
    }

    /// After every widget interaction.
    pub async fn settle(&self) {
        sleep(jitter(self.timing.settle_min_ms, self.timing.settle_max_ms)).await;
    }

    /// Between two typed characters.
    pub async fn keystroke(&self) {
        sleep(jitter(self.timing.keystroke_min_ms, self.timing.keystroke_max_ms)).await;
    }

    /// After clicking continue or review.
    pub async fn page_transition(&self) {
        sleep(Duration::from_millis(self.timing.page_transition_ms)).await;
    }

    /// After activating the entry affordance.
    pub async fn entry_open(&self) {
        sleep(Duration::from_millis(self.timing.entry_open_ms)).await;
    }

    /// After clicking submit, before looking for a success indicator.
    pub async fn submit_wait(&self) {
        sleep(Duration::from_millis(self.timing.submit_wait_ms)).await;
    }
}

fn jitter(min_ms: u64, max_ms: u64) -> Duration {
    let ms = if max_ms > min_ms {
        rand::thread_rng().gen_range(min_ms..=max_ms)
    } else {
        min_ms
    };
    Duration::from_millis(ms)
}

async fn sleep(duration: Duration) {
    if duration.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(duration).await;
    }
}
