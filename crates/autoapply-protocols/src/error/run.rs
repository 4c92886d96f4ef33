//! Run-level errors.
//!
//! Only the variants here end a run; every skip-worthy condition (a missing
//! widget, an ambiguous option match, a stalled page) is logged instead.

use thiserror::Error;

use super::PageError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("entry point not found")]
    EntryPointMissing,

    #[error("already running")]
    AlreadyRunning,

    #[error("run cancelled")]
    Cancelled,

    #[error("page error: {0}")]
    Page(#[from] PageError),
}
