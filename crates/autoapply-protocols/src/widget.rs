//! Question container snapshots.
//!
//! A snapshot is read once per resolution cycle and discarded right after the
//! answer is applied.

use serde::{Deserialize, Serialize};

use crate::page::ElementRef;

/// One question container read from the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    /// Handle of the container itself.
    pub element: ElementRef,

    /// Visible label span inside a grouped-choice legend.
    #[serde(default)]
    pub legend_label: Option<String>,

    /// Visible label span inside the field label.
    #[serde(default)]
    pub label_span: Option<String>,

    /// Title sub-element inside the field label.
    #[serde(default)]
    pub label_title: Option<String>,

    /// Whole text of the field label.
    #[serde(default)]
    pub label_text: Option<String>,

    /// Full visible text of the container.
    #[serde(default)]
    pub full_text: String,

    /// Error or hint text the page rendered after a rejected value.
    #[serde(default)]
    pub hint: Option<String>,

    /// The input widget of the question.
    #[serde(default)]
    pub widget: Option<Widget>,
}

/// The three widget shapes the automaton knows how to drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Widget {
    /// Mutually-exclusive choice group (radio buttons).
    ChoiceGroup { options: Vec<ChoiceOption> },

    /// Single-select dropdown.
    Dropdown {
        element: ElementRef,
        options: Vec<DropdownOption>,
    },

    /// Single-line, numeric or multi-line text field.
    TextField {
        element: ElementRef,
        kind: FieldKind,
        #[serde(default)]
        input_mode: Option<String>,
    },
}

impl Widget {
    /// Short shape name used in logs.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Widget::ChoiceGroup { .. } => "choice_group",
            Widget::Dropdown { .. } => "dropdown",
            Widget::TextField { .. } => "text_field",
        }
    }

    /// Visible labels of every selectable option.
    pub fn option_labels(&self) -> Vec<String> {
        match self {
            Widget::ChoiceGroup { options } => options
                .iter()
                .filter_map(|opt| opt.display_label())
                .collect(),
            Widget::Dropdown { options, .. } => {
                options.iter().map(|opt| opt.text.clone()).collect()
            }
            Widget::TextField { .. } => Vec::new(),
        }
    }
}

/// One radio option of a choice group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub element: ElementRef,
    /// Text of the label element next to the radio input.
    #[serde(default)]
    pub label: Option<String>,
    /// The input's `value` attribute.
    #[serde(default)]
    pub value: Option<String>,
    /// Option text carried in a data attribute.
    #[serde(default)]
    pub data_label: Option<String>,
    #[serde(default)]
    pub checked: bool,
}

impl ChoiceOption {
    /// First non-empty of label, value and data label.
    pub fn display_label(&self) -> Option<String> {
        [&self.label, &self.value, &self.data_label]
            .into_iter()
            .flatten()
            .map(|s| s.replace("<!---->", "").trim().to_string())
            .find(|s| !s.is_empty())
    }
}

/// One `<option>` of a dropdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub element: ElementRef,
    pub text: String,
    pub value: String,
}

impl DropdownOption {
    /// Whether this is a "Select an option" style placeholder.
    pub fn is_placeholder(&self) -> bool {
        let text = self.text.trim().to_lowercase();
        self.value.trim().is_empty()
            || text.starts_with("select an option")
            || text.starts_with("choose")
    }
}

/// Text field flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    TextArea,
}
