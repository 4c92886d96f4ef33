//! [`FormPage`] over a DevTools page session.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use autoapply_config::BrowserConfig;
use autoapply_protocols::{
    Affordance, AffordanceState, ContainerSnapshot, DomEvent, ElementRef, FormPage, PageError,
};

use crate::cdp::{CdpClient, CdpError, PageSession, select_page};
use crate::scripts;

/// Outcome reported by element scripts.
#[derive(Debug, Deserialize)]
struct OpResult {
    ok: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// A live form document in an already-open browser tab.
pub struct CdpFormPage {
    _client: CdpClient,
    session: PageSession,
}

impl CdpFormPage {
    /// Connect to the browser and attach to the first page matching
    /// `target_url_contains`.
    pub async fn connect(config: &BrowserConfig) -> Result<Self, CdpError> {
        let client = CdpClient::connect(&config.endpoint).await?;
        let pages = client.list_pages().await?;
        let filter = config.target_url_contains.as_deref();

        let page = select_page(&pages, filter).ok_or_else(|| {
            CdpError::PageNotFound(filter.unwrap_or("<any page>").to_string())
        })?;
        info!("Attaching to page {} ({})", page.id, page.url);

        let session = client.attach_page(&page.id).await?;
        Ok(Self {
            _client: client,
            session,
        })
    }

    async fn eval(&self, script: &str) -> Result<Value, PageError> {
        Ok(self.session.evaluate(script).await?)
    }

    async fn eval_as<T: serde::de::DeserializeOwned>(&self, script: &str) -> Result<T, PageError> {
        let value = self.eval(script).await?;
        serde_json::from_value(value).map_err(|e| PageError::InvalidResponse(e.to_string()))
    }

    /// Run an element script and map its reported outcome.
    async fn element_op(&self, element: &ElementRef, script: String) -> Result<(), PageError> {
        let result: OpResult = self.eval_as(&script).await?;
        if result.ok {
            return Ok(());
        }
        let err = match result.reason.as_deref() {
            Some("disabled") => CdpError::NotInteractable(element.to_string()),
            _ => CdpError::ElementNotFound(element.to_string()),
        };
        Err(err.into())
    }
}

fn selectors_for(affordance: Affordance) -> &'static [&'static str] {
    match affordance {
        Affordance::Entry => scripts::ENTRY_SELECTORS,
        Affordance::Continue => scripts::CONTINUE_SELECTORS,
        Affordance::Review => scripts::REVIEW_SELECTORS,
        Affordance::Submit => scripts::SUBMIT_SELECTORS,
        Affordance::Dismiss => scripts::DISMISS_SELECTORS,
    }
}

#[async_trait]
impl FormPage for CdpFormPage {
    async fn question_containers(&self) -> Result<Vec<ContainerSnapshot>, PageError> {
        let containers: Vec<ContainerSnapshot> =
            self.eval_as(&scripts::snapshot_containers()).await?;
        debug!(count = containers.len(), "Read question containers");
        Ok(containers)
    }

    async fn find_affordance(
        &self,
        affordance: Affordance,
    ) -> Result<Option<AffordanceState>, PageError> {
        self.eval_as(&scripts::find_affordance(selectors_for(affordance)))
            .await
    }

    async fn success_indicator_present(&self) -> Result<bool, PageError> {
        let value = self.eval(&scripts::success_indicator()).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn activate(&self, element: &ElementRef) -> Result<(), PageError> {
        self.element_op(element, scripts::activate(element.as_str()))
            .await
    }

    async fn focus(&self, element: &ElementRef) -> Result<(), PageError> {
        self.element_op(element, scripts::focus(element.as_str()))
            .await
    }

    async fn set_value(&self, element: &ElementRef, value: &str) -> Result<(), PageError> {
        self.element_op(element, scripts::set_value(element.as_str(), value))
            .await
    }

    async fn append_char(&self, element: &ElementRef, ch: char) -> Result<(), PageError> {
        self.element_op(element, scripts::append_char(element.as_str(), ch))
            .await
    }

    async fn select_value(&self, select: &ElementRef, option_value: &str) -> Result<(), PageError> {
        self.element_op(select, scripts::select_value(select.as_str(), option_value))
            .await
    }

    async fn dispatch(&self, element: &ElementRef, event: DomEvent) -> Result<(), PageError> {
        self.element_op(element, scripts::dispatch(element.as_str(), event.name()))
            .await
    }
}
