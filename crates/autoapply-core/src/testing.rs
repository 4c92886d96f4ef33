//! Scripted in-memory [`FormPage`] for tests.
//!
//! A [`FakePage`] walks through a list of [`FakeForm`]s. Activating the
//! continue or review button moves to the next form, activating submit
//! raises the success indicator (unless disabled), and activating a choice
//! option checks it. Every call is recorded as an [`Interaction`].

use std::collections::HashMap;

use async_trait::async_trait;
use autoapply_protocols::{
    Affordance, AffordanceState, ChoiceOption, ContainerSnapshot, DomEvent, DropdownOption, ElementRef, FieldKind,
    FormPage, PageError, Widget,
};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

pub(crate) const ENTRY: &str = "entry";
pub(crate) const CONTINUE: &str = "continue";
pub(crate) const REVIEW: &str = "review";
pub(crate) const SUBMIT: &str = "submit";
pub(crate) const DISMISS: &str = "dismiss";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Interaction {
    Activate(String),
    Focus(String),
    SetValue(String, String),
    AppendChar(String, char),
    Select(String, String),
    Dispatch(String, DomEvent),
}

/// One wizard page.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeForm {
    pub containers: Vec<ContainerSnapshot>,
    pub continue_btn: bool,
    pub review_btn: bool,
    pub submit_btn: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    forms: Vec<FakeForm>,
    current: usize,
    success: bool,
    container_reads: usize,
    values: HashMap<String, String>,
    interactions: Vec<Interaction>,
}

pub(crate) struct FakePage {
    state: Mutex<FakeState>,
    has_entry: bool,
    succeed_on_submit: bool,
    fail_reads: bool,
    gate: Option<CancellationToken>,
}

impl FakePage {
    pub fn new(forms: Vec<FakeForm>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                forms,
                ..Default::default()
            }),
            has_entry: true,
            succeed_on_submit: true,
            fail_reads: false,
            gate: None,
        }
    }

    /// A page without the application entry affordance.
    pub fn without_entry(mut self) -> Self {
        self.has_entry = false;
        self
    }

    /// Submitting never raises the success indicator.
    pub fn without_success(mut self) -> Self {
        self.succeed_on_submit = false;
        self
    }

    /// Reading question containers fails with a transport error.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Reading question containers blocks until `gate` is cancelled.
    pub fn gated(mut self, gate: CancellationToken) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn interactions(&self) -> Vec<Interaction> {
        self.state.lock().interactions.clone()
    }

    pub fn activations(&self) -> Vec<String> {
        self.interactions()
            .into_iter()
            .filter_map(|i| match i {
                Interaction::Activate(el) => Some(el),
                _ => None,
            })
            .collect()
    }

    pub fn activation_count(&self, element: &str) -> usize {
        self.activations().iter().filter(|el| *el == element).count()
    }

    pub fn container_reads(&self) -> usize {
        self.state.lock().container_reads
    }

    pub fn value_of(&self, element: &str) -> Option<String> {
        self.state.lock().values.get(element).cloned()
    }

    fn record(&self, interaction: Interaction) {
        self.state.lock().interactions.push(interaction);
    }
}

#[async_trait]
impl FormPage for FakePage {
    async fn question_containers(&self) -> Result<Vec<ContainerSnapshot>, PageError> {
        if let Some(gate) = &self.gate {
            gate.cancelled().await;
        }
        if self.fail_reads {
            return Err(PageError::Transport("socket closed".to_string()));
        }
        let mut state = self.state.lock();
        state.container_reads += 1;
        Ok(state
            .forms
            .get(state.current)
            .map(|f| f.containers.clone())
            .unwrap_or_default())
    }

    async fn find_affordance(&self, affordance: Affordance) -> Result<Option<AffordanceState>, PageError> {
        let state = self.state.lock();
        let form = state.forms.get(state.current);
        let (present, id) = match affordance {
            Affordance::Entry => (self.has_entry, ENTRY),
            Affordance::Continue => (form.is_some_and(|f| f.continue_btn), CONTINUE),
            Affordance::Review => (form.is_some_and(|f| f.review_btn), REVIEW),
            Affordance::Submit => (form.is_some_and(|f| f.submit_btn), SUBMIT),
            Affordance::Dismiss => (state.success, DISMISS),
        };
        Ok(present.then(|| AffordanceState {
            element: ElementRef::new(id),
            enabled: true,
        }))
    }

    async fn success_indicator_present(&self) -> Result<bool, PageError> {
        Ok(self.state.lock().success)
    }

    async fn activate(&self, element: &ElementRef) -> Result<(), PageError> {
        self.record(Interaction::Activate(element.to_string()));
        let mut state = self.state.lock();
        match element.as_str() {
            CONTINUE | REVIEW => {
                if state.current + 1 < state.forms.len() {
                    state.current += 1;
                }
            }
            SUBMIT => {
                if self.succeed_on_submit {
                    state.success = true;
                }
            }
            ENTRY | DISMISS => {}
            other => {
                let current = state.current;
                let Some(form) = state.forms.get_mut(current) else {
                    return Err(PageError::ElementDetached(other.to_string()));
                };
                let group = form.containers.iter_mut().find_map(|c| match &mut c.widget {
                    Some(Widget::ChoiceGroup { options }) if options.iter().any(|o| o.element == *element) => {
                        Some(options)
                    }
                    _ => None,
                });
                let Some(options) = group else {
                    return Err(PageError::ElementDetached(other.to_string()));
                };
                for option in options.iter_mut() {
                    option.checked = option.element == *element;
                }
            }
        }
        Ok(())
    }

    async fn focus(&self, element: &ElementRef) -> Result<(), PageError> {
        self.record(Interaction::Focus(element.to_string()));
        Ok(())
    }

    async fn set_value(&self, element: &ElementRef, value: &str) -> Result<(), PageError> {
        self.record(Interaction::SetValue(element.to_string(), value.to_string()));
        self.state.lock().values.insert(element.to_string(), value.to_string());
        Ok(())
    }

    async fn append_char(&self, element: &ElementRef, ch: char) -> Result<(), PageError> {
        self.record(Interaction::AppendChar(element.to_string(), ch));
        self.state
            .lock()
            .values
            .entry(element.to_string())
            .or_default()
            .push(ch);
        Ok(())
    }

    async fn select_value(&self, select: &ElementRef, option_value: &str) -> Result<(), PageError> {
        self.record(Interaction::Select(select.to_string(), option_value.to_string()));
        self.state
            .lock()
            .values
            .insert(select.to_string(), option_value.to_string());
        Ok(())
    }

    async fn dispatch(&self, element: &ElementRef, event: DomEvent) -> Result<(), PageError> {
        self.record(Interaction::Dispatch(element.to_string(), event));
        Ok(())
    }
}

fn option_id(id: &str, label: &str) -> String {
    format!("{id}-{}", label.to_lowercase().replace(' ', "-"))
}

/// A radio group question whose options are `{id}-{label}`.
pub(crate) fn choice_question(id: &str, label: &str, options: &[&str]) -> ContainerSnapshot {
    ContainerSnapshot {
        element: ElementRef::new(id),
        legend_label: Some(label.to_string()),
        full_text: label.to_string(),
        widget: Some(Widget::ChoiceGroup {
            options: options
                .iter()
                .map(|opt| ChoiceOption {
                    element: ElementRef::new(option_id(id, opt)),
                    label: Some(opt.to_string()),
                    value: Some(opt.to_string()),
                    ..Default::default()
                })
                .collect(),
        }),
        ..Default::default()
    }
}

/// A dropdown question with select `{id}-select`, led by a placeholder.
pub(crate) fn dropdown_question(id: &str, label: &str, options: &[&str]) -> ContainerSnapshot {
    let placeholder = DropdownOption {
        element: ElementRef::new(format!("{id}-placeholder")),
        text: "Select an option".to_string(),
        value: String::new(),
    };
    let options = std::iter::once(placeholder)
        .chain(options.iter().map(|opt| DropdownOption {
            element: ElementRef::new(option_id(id, opt)),
            text: opt.to_string(),
            value: opt.to_string(),
        }))
        .collect();
    ContainerSnapshot {
        element: ElementRef::new(id),
        label_span: Some(label.to_string()),
        full_text: label.to_string(),
        widget: Some(Widget::Dropdown {
            element: ElementRef::new(format!("{id}-select")),
            options,
        }),
        ..Default::default()
    }
}

/// A text field question with input `{id}-input`.
pub(crate) fn text_question(id: &str, label: &str, kind: FieldKind) -> ContainerSnapshot {
    ContainerSnapshot {
        element: ElementRef::new(id),
        label_text: Some(label.to_string()),
        full_text: label.to_string(),
        widget: Some(Widget::TextField {
            element: ElementRef::new(format!("{id}-input")),
            kind,
            input_mode: None,
        }),
        ..Default::default()
    }
}
