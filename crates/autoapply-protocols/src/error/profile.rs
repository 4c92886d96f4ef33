//! Profile loading errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile not readable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Profile root must be a JSON object")]
    NotAnObject,
}
