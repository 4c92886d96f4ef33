//! `autoapply control`: line-delimited JSON control channel.
//!
//! Each stdin line is one `ControlRequest`; each stdout line is either the
//! matching `ControlResponse` or a `Notification` for a finished run.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use autoapply_config::Config;
use autoapply_core::RunController;
use autoapply_page_cdp::CdpFormPage;
use autoapply_protocols::{ControlRequest, ControlResponse};

use crate::setup::build_driver;

const DRAIN_POLL: Duration = Duration::from_millis(50);

fn emit<T: Serialize>(message: &T) {
    match serde_json::to_string(message) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!("Failed to encode control message: {}", e),
    }
}

/// Parse one request line. Blank lines yield `None`.
fn parse_request(line: &str) -> Option<Result<ControlRequest, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line))
}

pub(crate) async fn serve(config: &Config) -> anyhow::Result<()> {
    let driver = build_driver(config)?;
    let page = CdpFormPage::connect(&config.browser).await?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = RunController::new(driver, Arc::new(page), Arc::new(tx));

    let forward = tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            emit(&notification);
        }
    });

    info!("Control channel ready on stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let response = match parse_request(&line) {
            None => continue,
            Some(Ok(request)) => {
                debug!(?request, "Control request");
                controller.handle(request)
            }
            Some(Err(e)) => {
                warn!("Invalid control request: {}", e);
                ControlResponse::rejected(format!("invalid request: {}", e))
            }
        };
        emit(&response);
    }

    if controller.stop() {
        info!("Input closed, waiting for the active run to stop");
        let deadline = tokio::time::Instant::now()
            + Duration::from_secs(config.wizard.completion_timeout_secs);
        while controller.is_running() && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(DRAIN_POLL).await;
        }
    }
    drop(controller);
    // Flush the last notice; a run still going past the deadline is abandoned.
    let _ = tokio::time::timeout(DRAIN_POLL * 10, forward).await;
    Ok(())
}
