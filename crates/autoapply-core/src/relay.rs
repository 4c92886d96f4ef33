//! Caller side of completion notices.
//!
//! A caller waits a fixed time for the notice of the run it started. After
//! the timeout the run counts as failed even though it may still finish;
//! its late notice is then discarded instead of being counted twice.

use std::collections::HashSet;
use std::time::Duration;

use autoapply_protocols::{Notification, RunId};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::RelayError;

/// Outcome counts over a batch of runs, each run counted at most once.
#[derive(Debug, Clone, Default)]
pub struct BatchTally {
    seen: HashSet<RunId>,
    pub succeeded: u32,
    pub failed: u32,
    pub timed_out: u32,
}

impl BatchTally {
    /// Count a notice. Returns `false` if its run was already counted.
    pub fn record(&mut self, notification: &Notification) -> bool {
        if !self.seen.insert(notification.run_id()) {
            return false;
        }
        if notification.success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        true
    }

    /// Count a run whose notice never arrived in time.
    pub fn record_timeout(&mut self, run_id: RunId) -> bool {
        if !self.seen.insert(run_id) {
            return false;
        }
        self.timed_out += 1;
        true
    }

    pub fn total(&self) -> u32 {
        self.succeeded + self.failed + self.timed_out
    }
}

/// Receives completion notices from a [`crate::RunController`] sink.
pub struct CompletionRelay {
    rx: mpsc::UnboundedReceiver<Notification>,
    tally: BatchTally,
}

impl CompletionRelay {
    pub fn new(rx: mpsc::UnboundedReceiver<Notification>) -> Self {
        Self {
            rx,
            tally: BatchTally::default(),
        }
    }

    /// Wait for the notice of `run_id`, discarding notices of other runs.
    pub async fn wait_for(&mut self, run_id: RunId, timeout: Duration) -> Result<Notification, RelayError> {
        let deadline = Instant::now() + timeout;
        loop {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Err(_) => {
                    warn!(run_id, ?timeout, "no completion notice, counting run as failed");
                    self.tally.record_timeout(run_id);
                    return Err(RelayError::Timeout(run_id));
                }
                Ok(None) => return Err(RelayError::ChannelClosed),
                Ok(Some(notification)) if notification.run_id() == run_id => {
                    if !self.tally.record(&notification) {
                        debug!(run_id, "run already counted");
                    }
                    return Ok(notification);
                }
                Ok(Some(notification)) => {
                    debug!(
                        run_id = notification.run_id(),
                        waiting_for = run_id,
                        "discarding orphaned completion notice"
                    );
                }
            }
        }
    }

    pub fn tally(&self) -> &BatchTally {
        &self.tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoapply_protocols::Confirmation;

    #[test]
    fn test_tally_counts_each_run_once() {
        let mut tally = BatchTally::default();
        assert!(tally.record(&Notification::completed(1, Confirmation::Confirmed)));
        assert!(!tally.record(&Notification::completed(1, Confirmation::Confirmed)));
        assert!(tally.record(&Notification::failed(2, "entry point not found")));
        assert!(tally.record_timeout(3));
        assert!(!tally.record(&Notification::completed(3, Confirmation::Confirmed)));
        assert_eq!((tally.succeeded, tally.failed, tally.timed_out), (1, 1, 1));
        assert_eq!(tally.total(), 3);
    }

    #[tokio::test]
    async fn test_wait_for_returns_matching_notice() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut relay = CompletionRelay::new(rx);
        tx.send(Notification::completed(1, Confirmation::Unconfirmed)).unwrap();

        let n = relay.wait_for(1, Duration::from_secs(5)).await.unwrap();
        assert!(n.success());
        assert_eq!(relay.tally().succeeded, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_orphaned_notice_is_discarded_after_timeout() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut relay = CompletionRelay::new(rx);

        assert_eq!(
            relay.wait_for(1, Duration::from_secs(30)).await.unwrap_err(),
            RelayError::Timeout(1)
        );

        // The first run finishes late, after the second one was started.
        tx.send(Notification::completed(1, Confirmation::Confirmed)).unwrap();
        tx.send(Notification::completed(2, Confirmation::Confirmed)).unwrap();
        let n = relay.wait_for(2, Duration::from_secs(30)).await.unwrap();
        assert_eq!(n.run_id(), 2);

        let tally = relay.tally();
        assert_eq!((tally.succeeded, tally.failed, tally.timed_out), (1, 0, 1));
    }

    #[tokio::test]
    async fn test_closed_channel() {
        let (tx, rx) = mpsc::unbounded_channel::<Notification>();
        drop(tx);
        let mut relay = CompletionRelay::new(rx);
        assert_eq!(
            relay.wait_for(1, Duration::from_secs(1)).await.unwrap_err(),
            RelayError::ChannelClosed
        );
    }
}
