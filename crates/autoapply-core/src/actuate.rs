//! Widget actuation.
//!
//! Each widget shape has its own matching rules and its own interaction
//! sequence. Every application ends with a settle delay, whether or not
//! anything was changed.

use autoapply_config::ActuatorConfig;
use autoapply_protocols::{ChoiceOption, DomEvent, DropdownOption, ElementRef, FormPage, PageError, Widget};
use tracing::{debug, info, warn};

use crate::answer::NumericDemand;
use crate::pacing::Pacer;

#[cfg(test)]
#[path = "actuate_tests.rs"]
mod tests;

/// Result of matching an answer against a choice group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceMatch {
    pub index: usize,
    /// Every matching option was already selected.
    pub already_checked: bool,
}

/// Applies answers to widgets through a [`FormPage`].
#[derive(Debug, Clone)]
pub struct WidgetActuator {
    pacer: Pacer,
    dropdown_fallback: bool,
}

impl WidgetActuator {
    pub fn new(pacer: Pacer, config: &ActuatorConfig) -> Self {
        Self {
            pacer,
            dropdown_fallback: config.dropdown_fallback,
        }
    }

    /// Whether callers should fall back to the first real option after a
    /// dropdown miss.
    pub fn dropdown_fallback(&self) -> bool {
        self.dropdown_fallback
    }

    /// Apply `answer` to `widget`. Returns whether the answer was applied.
    pub async fn apply(
        &self,
        page: &dyn FormPage,
        widget: &Widget,
        answer: &str,
        numeric: NumericDemand,
    ) -> Result<bool, PageError> {
        let applied = match widget {
            Widget::ChoiceGroup { options } => self.choose(page, options, answer).await,
            Widget::Dropdown { element, options } => self.select(page, element, options, answer).await,
            Widget::TextField { element, .. } => self.type_text(page, element, answer, numeric).await,
        };
        self.pacer.settle().await;
        applied
    }

    /// Select the first non-placeholder option of a dropdown.
    pub async fn apply_fallback(&self, page: &dyn FormPage, widget: &Widget) -> Result<bool, PageError> {
        let Widget::Dropdown { element, options } = widget else {
            return Ok(false);
        };
        let Some(option) = options.iter().find(|o| !o.is_placeholder()) else {
            return Ok(false);
        };
        warn!(select = %element, option = %option.text, "falling back to first dropdown option");
        page.select_value(element, &option.value).await?;
        page.dispatch(element, DomEvent::Input).await?;
        page.dispatch(element, DomEvent::Change).await?;
        self.pacer.settle().await;
        Ok(true)
    }

    async fn choose(&self, page: &dyn FormPage, options: &[ChoiceOption], answer: &str) -> Result<bool, PageError> {
        let Some(m) = match_choice(options, answer) else {
            let labels: Vec<String> = options.iter().filter_map(ChoiceOption::display_label).collect();
            info!(answer, ?labels, "no choice option matches answer");
            return Ok(false);
        };
        if m.already_checked {
            debug!(answer, "matching choice already selected");
            return Ok(true);
        }
        page.activate(&options[m.index].element).await?;
        Ok(true)
    }

    async fn select(
        &self,
        page: &dyn FormPage,
        select: &ElementRef,
        options: &[DropdownOption],
        answer: &str,
    ) -> Result<bool, PageError> {
        let Some(index) = match_dropdown(options, answer) else {
            let available: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
            info!(answer, ?available, "no dropdown option matches answer");
            return Ok(false);
        };
        let option = &options[index];
        page.select_value(select, &option.value).await?;
        page.dispatch(select, DomEvent::Input).await?;
        page.dispatch(select, DomEvent::Change).await?;

        // Option lists rendered as custom widgets only react to pointer events.
        for event in [DomEvent::MouseDown, DomEvent::MouseUp, DomEvent::Click] {
            page.dispatch(&option.element, event).await?;
        }
        page.dispatch(select, DomEvent::Focus).await?;
        page.dispatch(select, DomEvent::Blur).await?;
        Ok(true)
    }

    async fn type_text(
        &self,
        page: &dyn FormPage,
        field: &ElementRef,
        answer: &str,
        numeric: NumericDemand,
    ) -> Result<bool, PageError> {
        let Some(value) = numeric.apply(answer) else {
            info!(answer, ?numeric, "answer is not numeric, leaving field empty");
            return Ok(false);
        };
        page.focus(field).await?;
        page.set_value(field, "").await?;
        page.dispatch(field, DomEvent::Input).await?;
        for ch in value.chars() {
            page.append_char(field, ch).await?;
            self.pacer.keystroke().await;
        }
        page.dispatch(field, DomEvent::Change).await?;
        page.dispatch(field, DomEvent::Blur).await?;
        Ok(true)
    }
}

/// Yes/no polarity of an answer, if it is one.
fn polarity(answer: &str) -> Option<bool> {
    match answer {
        "yes" | "y" | "yeah" | "yep" | "true" => Some(true),
        "no" | "n" | "nope" | "false" => Some(false),
        _ => None,
    }
}

/// Tolerant yes/no match on the first word of a label.
fn tolerant_match(label: &str, yes: bool) -> bool {
    let first = label.split_whitespace().next().unwrap_or_default();
    first.starts_with(if yes { 'y' } else { 'n' })
}

/// Find the option a choice-group answer refers to.
///
/// Exact label matches are tried first, then tolerant yes/no variants.
pub fn match_choice(options: &[ChoiceOption], answer: &str) -> Option<ChoiceMatch> {
    let answer = answer.trim().to_lowercase();
    let labels: Vec<Option<String>> = options
        .iter()
        .map(|o| o.display_label().map(|l| l.to_lowercase()))
        .collect();

    let mut hits: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.as_deref() == Some(answer.as_str()))
        .map(|(i, _)| i)
        .collect();
    if hits.is_empty() {
        if let Some(yes) = polarity(&answer) {
            hits = labels
                .iter()
                .enumerate()
                .filter(|(_, l)| l.as_deref().is_some_and(|l| tolerant_match(l, yes)))
                .map(|(i, _)| i)
                .collect();
        }
    }

    let first = *hits.first()?;
    Some(match hits.iter().find(|&&i| !options[i].checked) {
        Some(&index) => ChoiceMatch {
            index,
            already_checked: false,
        },
        None => ChoiceMatch {
            index: first,
            already_checked: true,
        },
    })
}

/// Find the dropdown option an answer refers to.
///
/// Passes, first hit wins: exact text or value, tolerant yes/no, substring,
/// templated numeric phrasings, then trailing-digit match.
pub fn match_dropdown(options: &[DropdownOption], answer: &str) -> Option<usize> {
    let answer = answer.trim().to_lowercase();
    if answer.is_empty() {
        return None;
    }
    let texts: Vec<(usize, String)> = options
        .iter()
        .enumerate()
        .filter(|(_, o)| !o.is_placeholder())
        .map(|(i, o)| (i, o.text.trim().to_lowercase()))
        .collect();
    let find = |pred: &dyn Fn(&str) -> bool| texts.iter().find(|(_, t)| pred(t)).map(|(i, _)| *i);

    if let Some(i) = texts
        .iter()
        .find(|(i, t)| *t == answer || options[*i].value.trim().eq_ignore_ascii_case(&answer))
        .map(|(i, _)| *i)
    {
        return Some(i);
    }
    if let Some(yes) = polarity(&answer) {
        if let Some(i) = find(&|t: &str| tolerant_match(t, yes)) {
            return Some(i);
        }
    }

    let number: Option<u32> = answer.parse().ok();
    let substring = if number.is_some() {
        find(&|t: &str| t.split(|c: char| !c.is_ascii_alphanumeric()).any(|w| w == answer))
    } else {
        find(&|t: &str| t.contains(answer.as_str()))
    };
    if substring.is_some() {
        return substring;
    }

    if let Some(n) = number {
        let variants = numeric_variants(n);
        if let Some(i) = find(&|t: &str| variants.iter().any(|v| t.contains(v.as_str()))) {
            return Some(i);
        }
    }

    let digits: String = answer.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= 2 {
        return find(&|t: &str| {
            let option_digits: String = t.chars().filter(char::is_ascii_digit).collect();
            !option_digits.is_empty() && (option_digits == digits || option_digits.ends_with(&digits))
        });
    }
    None
}

/// Phrasings a dropdown may use for `n` days.
fn numeric_variants(n: u32) -> Vec<String> {
    let mut variants = vec![
        format!("{n} days"),
        format!("{n} day"),
        format!("{n}-day"),
        format!("{n}days"),
    ];
    match n {
        0 => variants.extend(["immediately".to_string(), "immediate".to_string()]),
        30 => variants.extend(["1 month".to_string(), "one month".to_string()]),
        60 => variants.push("2 months".to_string()),
        90 => variants.push("3 months".to_string()),
        _ => {}
    }
    if n <= 7 {
        variants.extend(["within a week".to_string(), "1 week".to_string()]);
    }
    variants
}
