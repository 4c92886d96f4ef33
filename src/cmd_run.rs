//! `autoapply run`: one application on the attached page.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use autoapply_config::Config;
use autoapply_core::{CompletionRelay, RelayError, RunController};
use autoapply_page_cdp::CdpFormPage;
use autoapply_protocols::Notification;

use crate::setup::build_driver;

pub(crate) async fn run_once(config: &Config) -> anyhow::Result<()> {
    let driver = build_driver(config)?;
    let page = CdpFormPage::connect(&config.browser).await?;

    let (tx, rx) = mpsc::unbounded_channel();
    let controller = Arc::new(RunController::new(driver, Arc::new(page), Arc::new(tx)));
    let mut relay = CompletionRelay::new(rx);

    let handle = controller.start()?;
    let run_id = handle.run_id;
    info!(run_id, "Run started");

    {
        let controller = controller.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, stopping run");
                controller.stop();
            }
        });
    }

    let timeout = Duration::from_secs(config.wizard.completion_timeout_secs);
    match relay.wait_for(run_id, timeout).await {
        Ok(notification) => {
            println!("{}", serde_json::to_string(&notification)?);
            let Notification::Completed { success, .. } = notification;
            if !success {
                anyhow::bail!("run {} did not succeed", run_id);
            }
            Ok(())
        }
        Err(RelayError::Timeout(id)) => {
            warn!(run_id = id, "Stopping run after completion timeout");
            controller.stop();
            anyhow::bail!("run {} timed out after {:?}", id, timeout)
        }
        Err(e) => Err(e.into()),
    }
}
