//! Host page protocol.
//!
//! The automaton never talks to a concrete browser. Everything it reads from
//! or does to the rendered document goes through [`FormPage`], which lets the
//! same wizard run against a DevTools session or a scripted test page.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::widget::ContainerSnapshot;

/// Opaque handle to one element of the live document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementRef(pub String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Buttons the wizard looks for between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    /// Opens the application surface.
    Entry,
    /// Advances to the next wizard page.
    Continue,
    /// Moves to the review step.
    Review,
    /// Submits the application.
    Submit,
    /// Closes a confirmation dialog.
    Dismiss,
}

impl std::fmt::Display for Affordance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Affordance::Entry => write!(f, "entry"),
            Affordance::Continue => write!(f, "continue"),
            Affordance::Review => write!(f, "review"),
            Affordance::Submit => write!(f, "submit"),
            Affordance::Dismiss => write!(f, "dismiss"),
        }
    }
}

/// A located affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordanceState {
    pub element: ElementRef,
    pub enabled: bool,
}

/// Synthetic DOM events dispatched after value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEvent {
    Input,
    Change,
    Blur,
    Focus,
    Click,
    MouseDown,
    MouseUp,
}

impl DomEvent {
    /// DOM event type name.
    pub fn name(&self) -> &'static str {
        match self {
            DomEvent::Input => "input",
            DomEvent::Change => "change",
            DomEvent::Blur => "blur",
            DomEvent::Focus => "focus",
            DomEvent::Click => "click",
            DomEvent::MouseDown => "mousedown",
            DomEvent::MouseUp => "mouseup",
        }
    }
}

/// The rendered form document.
///
/// Reads are snapshots: the page keeps re-rendering between calls, so callers
/// must re-read after every settle delay instead of caching element state.
#[async_trait]
pub trait FormPage: Send + Sync {
    /// Snapshot every question container currently rendered.
    async fn question_containers(&self) -> Result<Vec<ContainerSnapshot>, PageError>;

    /// Locate an affordance; `None` when it is not rendered.
    async fn find_affordance(
        &self,
        affordance: Affordance,
    ) -> Result<Option<AffordanceState>, PageError>;

    /// Whether an explicit "application sent" indicator is rendered.
    async fn success_indicator_present(&self) -> Result<bool, PageError>;

    /// Simulate a pointer activation (press, release, click) on an element.
    async fn activate(&self, element: &ElementRef) -> Result<(), PageError>;

    /// Move keyboard focus to an element.
    async fn focus(&self, element: &ElementRef) -> Result<(), PageError>;

    /// Replace a field's value without dispatching any event.
    async fn set_value(&self, element: &ElementRef, value: &str) -> Result<(), PageError>;

    /// Append one character to a field and dispatch the per-keystroke input event.
    async fn append_char(&self, element: &ElementRef, ch: char) -> Result<(), PageError>;

    /// Set a dropdown's selected option by option value, without events.
    async fn select_value(&self, select: &ElementRef, option_value: &str) -> Result<(), PageError>;

    /// Dispatch a bubbling synthetic event on an element.
    async fn dispatch(&self, element: &ElementRef, event: DomEvent) -> Result<(), PageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ref_display() {
        let el = ElementRef::new("aa-7");
        assert_eq!(el.to_string(), "aa-7");
        assert_eq!(el.as_str(), "aa-7");
    }

    #[test]
    fn test_element_ref_serializes_transparent() {
        let json = serde_json::to_string(&ElementRef::new("aa-1")).unwrap();
        assert_eq!(json, "\"aa-1\"");
    }

    #[test]
    fn test_affordance_display() {
        assert_eq!(Affordance::Continue.to_string(), "continue");
        assert_eq!(Affordance::Submit.to_string(), "submit");
    }

    #[test]
    fn test_dom_event_names() {
        assert_eq!(DomEvent::Input.name(), "input");
        assert_eq!(DomEvent::MouseDown.name(), "mousedown");
    }
}
