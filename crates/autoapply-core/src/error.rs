//! Core errors.

use autoapply_protocols::RunId;
use thiserror::Error;

/// Malformed keyword table entries, raised while building the table.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("keyword phrase cannot be empty")]
    EmptyPhrase,

    #[error("keyword '{0}' maps to an empty path")]
    EmptyPath(String),

    #[error("unknown derived path: {0}")]
    UnknownSentinel(String),

    #[error("invalid category pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Caller-side failures while waiting for a completion notice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("no completion for run {0} before the timeout")]
    Timeout(RunId),

    #[error("notification channel closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_error_display() {
        assert_eq!(
            ResolverError::UnknownSentinel("@nope".to_string()).to_string(),
            "unknown derived path: @nope"
        );
        assert!(ResolverError::EmptyPath("gpa".to_string()).to_string().contains("gpa"));
    }

    #[test]
    fn test_relay_error_display() {
        assert_eq!(
            RelayError::Timeout(4).to_string(),
            "no completion for run 4 before the timeout"
        );
        assert_eq!(RelayError::ChannelClosed.to_string(), "notification channel closed");
    }
}
