//! Start/stop/status handling for one page context.
//!
//! At most one run is active at a time. The running flag is owned by the
//! controller and cleared by a drop guard inside the spawned run, so it is
//! released on every exit path, unwinding included.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use autoapply_protocols::{ControlRequest, ControlResponse, FormPage, NotificationSink, RunError, RunId};
use parking_lot::Mutex;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::wizard::{RunProgress, RunReport, WizardDriver};

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

/// A started run.
#[derive(Debug)]
pub struct RunHandle {
    pub run_id: RunId,
    join: JoinHandle<RunReport>,
}

impl RunHandle {
    /// Wait for the run to finish.
    pub async fn join(self) -> Result<RunReport, JoinError> {
        self.join.await
    }
}

struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct RunController {
    driver: Arc<WizardDriver>,
    page: Arc<dyn FormPage>,
    sink: Arc<dyn NotificationSink>,
    running: Arc<AtomicBool>,
    cancel: Mutex<CancellationToken>,
    total_applied: Arc<AtomicU64>,
    progress: Arc<RunProgress>,
    next_run_id: AtomicU64,
}

impl RunController {
    pub fn new(driver: Arc<WizardDriver>, page: Arc<dyn FormPage>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            driver,
            page,
            sink,
            running: Arc::new(AtomicBool::new(false)),
            cancel: Mutex::new(CancellationToken::new()),
            total_applied: Arc::new(AtomicU64::new(0)),
            progress: Arc::new(RunProgress::default()),
            next_run_id: AtomicU64::new(0),
        }
    }

    /// Start a run in the background.
    ///
    /// Fails with [`RunError::AlreadyRunning`] while another run is active.
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<RunHandle, RunError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("start rejected, a run is already active");
            return Err(RunError::AlreadyRunning);
        }
        let guard = RunningGuard(self.running.clone());

        let run_id = self.next_run_id.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        *self.cancel.lock() = cancel.clone();
        self.progress.reset();

        let driver = self.driver.clone();
        let page = self.page.clone();
        let sink = self.sink.clone();
        let progress = self.progress.clone();
        let total_applied = self.total_applied.clone();

        let join = tokio::spawn(async move {
            info!(run_id, "run started");
            let report = driver.run(page.as_ref(), &cancel, &progress).await;
            drop(guard);
            if report.success() {
                total_applied.fetch_add(1, Ordering::SeqCst);
            }
            sink.notify(report.notification(run_id)).await;
            report
        });

        Ok(RunHandle { run_id, join })
    }

    /// Request cooperative cancellation of the active run, if any.
    pub fn stop(&self) -> bool {
        let active = self.is_running();
        self.cancel.lock().cancel();
        if active {
            info!("stop requested");
        }
        active
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn total_applied(&self) -> u64 {
        self.total_applied.load(Ordering::SeqCst)
    }

    pub fn progress(&self) -> &RunProgress {
        &self.progress
    }

    pub fn status(&self) -> ControlResponse {
        ControlResponse::Status {
            is_running: self.is_running(),
            total_applied: self.total_applied(),
            current_page: self.progress.current_page(),
        }
    }

    /// Answer one control message. A started run keeps going in the
    /// background; its end is reported through the notification sink.
    pub fn handle(&self, request: ControlRequest) -> ControlResponse {
        match request {
            ControlRequest::Start => match self.start() {
                Ok(handle) => ControlResponse::started(format!("run {} started", handle.run_id)),
                Err(e) => ControlResponse::rejected(e.to_string()),
            },
            ControlRequest::Stop => {
                self.stop();
                ControlResponse::Stop { success: true }
            }
            ControlRequest::Status => self.status(),
        }
    }
}
