//! Host page errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Element detached from document: {0}")]
    ElementDetached(String),

    #[error("Element not interactable: {0}")]
    NotInteractable(String),

    #[error("Page script failed: {0}")]
    Script(String),

    #[error("Page transport failed: {0}")]
    Transport(String),

    #[error("Page operation timed out: {0}")]
    Timeout(String),

    #[error("Unexpected page response: {0}")]
    InvalidResponse(String),
}

impl PageError {
    /// Whether the error only concerns one element, so the caller may skip it
    /// and keep going with the rest of the page.
    pub fn is_element_scoped(&self) -> bool {
        matches!(
            self,
            PageError::ElementDetached(_) | PageError::NotInteractable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_detached() {
        let err = PageError::ElementDetached("aa-12".to_string());
        assert!(err.to_string().contains("detached"));
        assert!(err.to_string().contains("aa-12"));
    }

    #[test]
    fn test_page_error_timeout() {
        let err = PageError::Timeout("Runtime.evaluate".to_string());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_element_scoped() {
        assert!(PageError::ElementDetached("x".into()).is_element_scoped());
        assert!(PageError::NotInteractable("x".into()).is_element_scoped());
        assert!(!PageError::Transport("x".into()).is_element_scoped());
        assert!(!PageError::Script("x".into()).is_element_scoped());
    }
}
