//! Control channel messages.
//!
//! Every message kind is a closed variant carrying only its own fields.
//! On the wire requests and notifications are tagged by `action`; responses
//! are untagged and told apart by their field sets.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Identifier of one automaton run, increasing per controller.
pub type RunId = u64;

/// Request sent to the run controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ControlRequest {
    /// Begin a run on the current page.
    Start,
    /// Request cooperative cancellation of the active run.
    Stop,
    /// Query the controller state.
    Status,
}

/// Reply to a [`ControlRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlResponse {
    Start {
        success: bool,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Status {
        is_running: bool,
        total_applied: u64,
        current_page: u32,
    },
    Stop {
        success: bool,
    },
}

impl ControlResponse {
    pub fn started(message: impl Into<String>) -> Self {
        ControlResponse::Start {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        ControlResponse::Start {
            success: false,
            message: message.into(),
        }
    }
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Confirmation {
    /// An explicit success indicator was observed.
    Confirmed,
    /// The page stopped rendering questions for several cycles.
    FormDrained,
    /// Submit was clicked but no success indicator appeared.
    Unconfirmed,
    /// The submit affordance was never found.
    SubmitNotReached,
    /// The run was cancelled by a stop request.
    Stopped,
}

impl Confirmation {
    /// Whether this outcome reports `success: true` upstream.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Confirmation::Confirmed | Confirmation::FormDrained | Confirmation::Unconfirmed
        )
    }
}

impl std::fmt::Display for Confirmation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Confirmation::Confirmed => "confirmed",
            Confirmation::FormDrained => "formDrained",
            Confirmation::Unconfirmed => "unconfirmed",
            Confirmation::SubmitNotReached => "submitNotReached",
            Confirmation::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Fire-and-forget notice emitted when a run ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Notification {
    #[serde(rename_all = "camelCase")]
    Completed {
        run_id: RunId,
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confirmation: Option<Confirmation>,
    },
}

impl Notification {
    /// Notice for a run that reached `Completed`.
    pub fn completed(run_id: RunId, confirmation: Confirmation) -> Self {
        Notification::Completed {
            run_id,
            success: confirmation.is_success(),
            error: None,
            confirmation: Some(confirmation),
        }
    }

    /// Notice for a run that reached `Failed`.
    pub fn failed(run_id: RunId, error: impl Into<String>) -> Self {
        Notification::Completed {
            run_id,
            success: false,
            error: Some(error.into()),
            confirmation: None,
        }
    }

    pub fn run_id(&self) -> RunId {
        match self {
            Notification::Completed { run_id, .. } => *run_id,
        }
    }

    pub fn success(&self) -> bool {
        match self {
            Notification::Completed { success, .. } => *success,
        }
    }
}
