//! Answer computation: a resolved path plus question context to a value.
//!
//! The cascade, first applicable rule wins:
//!
//! 1. years-of-experience questions (explicit sentinel, or "exp" with a
//!    years phrase) go through per-skill and aggregate experience;
//! 2. direct lookups and the remaining derived computations;
//! 3. the degree override for any question mentioning a bachelor's degree;
//! 4. the default heuristic, for binary widgets only.
//!
//! "ASAP" answers become "Yes" on binary widgets.

use std::fmt;

use autoapply_protocols::{FieldKind, Widget};
use tracing::debug;

use crate::profile::{leading_number, ProfileAccessor, YearMonth};
use crate::resolve::{place_mentioned, DerivedKind, QuestionPath};

#[cfg(test)]
#[path = "answer_tests.rs"]
mod tests;

/// Which tier of the cascade produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    DirectLookup,
    Computed,
    DefaultHeuristic,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::DirectLookup => write!(f, "direct_lookup"),
            Provenance::Computed => write!(f, "computed"),
            Provenance::DefaultHeuristic => write!(f, "default_heuristic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAnswer {
    pub value: String,
    pub provenance: Provenance,
}

impl ResolvedAnswer {
    fn new(value: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            value: value.into(),
            provenance,
        }
    }

    fn computed(value: impl Into<String>) -> Self {
        Self::new(value, Provenance::Computed)
    }
}

/// The widget shapes, without their element handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetShape {
    ChoiceGroup,
    Dropdown,
    TextField,
}

/// Numeric format a field demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericDemand {
    None,
    /// Rounded, clamped to `[0, 99]`.
    WholeNumber,
    /// One decimal place, at least `0.1`.
    Decimal,
}

impl NumericDemand {
    /// Infer the demand from the field type, its hint text and the question.
    pub fn detect(text: &str, widget: &Widget, hint: Option<&str>) -> Self {
        let Widget::TextField {
            kind, input_mode, ..
        } = widget
        else {
            return NumericDemand::None;
        };
        if *kind == FieldKind::TextArea {
            return NumericDemand::None;
        }

        let hint = hint.unwrap_or_default().to_lowercase();
        if hint.contains("whole number") || hint.contains("between 0 to 99") {
            return NumericDemand::WholeNumber;
        }
        if hint.contains("decimal number") || hint.contains("larger than 0") {
            return NumericDemand::Decimal;
        }

        let numeric_field = *kind == FieldKind::Number
            || input_mode
                .as_deref()
                .is_some_and(|m| m.eq_ignore_ascii_case("numeric") || m.eq_ignore_ascii_case("decimal"));
        if asks_for_years_of_experience(text) {
            NumericDemand::WholeNumber
        } else if numeric_field {
            if has_years_word(text) || text.contains("how many") {
                NumericDemand::WholeNumber
            } else {
                NumericDemand::Decimal
            }
        } else {
            NumericDemand::None
        }
    }

    /// Format `value` for the field, or `None` if it is not numeric.
    pub fn apply(&self, value: &str) -> Option<String> {
        match self {
            NumericDemand::None => Some(value.to_string()),
            NumericDemand::WholeNumber => clamp_whole(value),
            NumericDemand::Decimal => format_decimal(value),
        }
    }
}

/// Round and clamp to `[0, 99]`.
pub fn clamp_whole(value: &str) -> Option<String> {
    let n = leading_number(value)?;
    Some((n.round().clamp(0.0, 99.0) as u32).to_string())
}

/// One decimal place, floored at `0.1`.
pub fn format_decimal(value: &str) -> Option<String> {
    let n = leading_number(value)?;
    Some(format!("{:.1}", n.max(0.1)))
}

/// Ephemeral context for one question, discarded after its answer is applied.
#[derive(Debug, Clone)]
pub struct QuestionContext {
    pub text: String,
    pub shape: WidgetShape,
    /// Visible option labels for choice groups and dropdowns.
    pub options: Vec<String>,
    pub hint: Option<String>,
    pub numeric: NumericDemand,
}

impl QuestionContext {
    pub fn new(text: impl Into<String>, widget: &Widget, hint: Option<&str>) -> Self {
        let text = text.into();
        let shape = match widget {
            Widget::ChoiceGroup { .. } => WidgetShape::ChoiceGroup,
            Widget::Dropdown { .. } => WidgetShape::Dropdown,
            Widget::TextField { .. } => WidgetShape::TextField,
        };
        let numeric = NumericDemand::detect(&text, widget, hint);
        Self {
            text,
            shape,
            options: widget.option_labels(),
            hint: hint.map(str::to_string),
            numeric,
        }
    }

    /// A choice group or dropdown offering both "Yes" and "No".
    pub fn is_binary(&self) -> bool {
        if self.shape == WidgetShape::TextField {
            return false;
        }
        let has = |label: &str| {
            self.options
                .iter()
                .any(|o| o.trim().eq_ignore_ascii_case(label))
        };
        has("yes") && has("no")
    }
}

/// Categories of the default heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicCategory {
    LegalRisk,
    WorkAuthorization,
    Willingness,
    General,
}

struct HeuristicRule {
    category: HeuristicCategory,
    cues: &'static [&'static str],
    answer: &'static str,
}

/// Checked in order; legal-risk wording wins over everything else.
const HEURISTIC_RULES: &[HeuristicRule] = &[
    HeuristicRule {
        category: HeuristicCategory::LegalRisk,
        cues: &[
            "criminal",
            "convicted",
            "felony",
            "violation",
            "disability",
            "drug test",
            "sponsorship",
        ],
        answer: "No",
    },
    HeuristicRule {
        category: HeuristicCategory::WorkAuthorization,
        cues: &["authorized", "eligible", "legally", "work permit", "visa", "citizen"],
        answer: "Yes",
    },
    HeuristicRule {
        category: HeuristicCategory::Willingness,
        cues: &["comfortable", "willing", "able to", "can you", "would you", "do you have"],
        answer: "Yes",
    },
];

/// Questions about identity never get a default.
const PERSONAL_IDENTITY_CUES: &[&str] = &["email", "phone", "country", "address", "name", "location"];

/// Default answer for a binary question, or `None` for identity questions.
pub fn default_heuristic(text: &str) -> Option<(HeuristicCategory, &'static str)> {
    if PERSONAL_IDENTITY_CUES.iter().any(|cue| text.contains(cue)) {
        return None;
    }
    let hit = HEURISTIC_RULES
        .iter()
        .find(|rule| rule.cues.iter().any(|cue| text.contains(cue)))
        .map(|rule| (rule.category, rule.answer));
    Some(hit.unwrap_or((HeuristicCategory::General, "Yes")))
}

/// Turns a resolved path and question context into an answer.
pub struct AnswerComputer<'a> {
    profile: &'a ProfileAccessor,
    now: YearMonth,
}

impl<'a> AnswerComputer<'a> {
    /// `now` closes ongoing employment intervals.
    pub fn new(profile: &'a ProfileAccessor, now: YearMonth) -> Self {
        Self { profile, now }
    }

    pub fn compute(&self, path: Option<&QuestionPath>, ctx: &QuestionContext) -> Option<ResolvedAnswer> {
        let text = ctx.text.as_str();

        let experience_path = path.is_some_and(|p| p.is_derived(&DerivedKind::AggregateExperience));
        let mut answer = if experience_path || asks_for_years_of_experience(text) {
            Some(self.experience(ctx))
        } else {
            path.and_then(|p| self.from_path(p, ctx))
        };

        if text.contains("bachelor") || text.contains("degree") {
            answer = Some(ResolvedAnswer::computed(yes_no(self.profile.has_bachelors_degree())));
        }

        if ctx.is_binary() {
            if let Some(a) = answer.as_mut().filter(|a| a.value.eq_ignore_ascii_case("asap")) {
                a.value = "Yes".to_string();
            }
        }

        if answer.is_none() && ctx.is_binary() {
            if let Some((category, value)) = default_heuristic(text) {
                debug!(question = text, ?category, answer = value, "default heuristic");
                answer = Some(ResolvedAnswer::new(value, Provenance::DefaultHeuristic));
            }
        }

        answer
    }

    fn from_path(&self, path: &QuestionPath, ctx: &QuestionContext) -> Option<ResolvedAnswer> {
        match path {
            QuestionPath::Lookup(dotted) => self
                .profile
                .lookup_rendered(dotted)
                .map(|v| ResolvedAnswer::new(v, Provenance::DirectLookup)),
            QuestionPath::Derived(kind) => self.derived(kind, ctx),
        }
    }

    fn derived(&self, kind: &DerivedKind, ctx: &QuestionContext) -> Option<ResolvedAnswer> {
        let text = ctx.text.as_str();
        match kind {
            DerivedKind::AggregateExperience => Some(self.experience(ctx)),
            DerivedKind::SkillRating => self.profile.skill_rating_in(text).map(ResolvedAnswer::computed),
            DerivedKind::BachelorsDegree => {
                Some(ResolvedAnswer::computed(yes_no(self.profile.has_bachelors_degree())))
            }
            DerivedKind::Relocation => Some(ResolvedAnswer::computed(yes_no(self.relocation(text)))),
            DerivedKind::WorkAuthorization => {
                Some(ResolvedAnswer::computed(yes_no(self.profile.work_authorized())))
            }
            DerivedKind::TechnologyExperience(token) => Some(self.technology(token, ctx)),
            DerivedKind::Availability => self
                .profile
                .lookup_rendered("jobPreferences.noticePeriod")
                .or_else(|| self.profile.lookup_rendered("availability.startDate"))
                .map(|v| ResolvedAnswer::new(v, Provenance::DirectLookup)),
        }
    }

    fn experience(&self, ctx: &QuestionContext) -> ResolvedAnswer {
        let tokens = skill_tokens(&ctx.text);
        let matched: Vec<f64> = tokens
            .iter()
            .filter_map(|token| self.profile.skill_years(token))
            .collect();
        let aggregate = self.profile.aggregate_experience_years(self.now);

        if ctx.is_binary() {
            let yes = if tokens.is_empty() {
                aggregate > 0
            } else {
                matched.iter().any(|years| *years > 0.0)
            };
            debug!(question = %ctx.text, ?tokens, yes, "experience as yes/no");
            return ResolvedAnswer::computed(yes_no(yes));
        }

        let value = matched
            .into_iter()
            .reduce(f64::max)
            .map(format_years)
            .unwrap_or_else(|| aggregate.to_string());
        debug!(question = %ctx.text, ?tokens, value = %value, "experience years");
        ResolvedAnswer::computed(value)
    }

    fn technology(&self, token: &str, ctx: &QuestionContext) -> ResolvedAnswer {
        let years = self
            .profile
            .skill_years(token)
            .unwrap_or_else(|| self.profile.described_experience_years(token, self.now) as f64);
        if ctx.is_binary() {
            ResolvedAnswer::computed(yes_no(years > 0.0))
        } else {
            ResolvedAnswer::computed(format_years(years))
        }
    }

    fn relocation(&self, text: &str) -> bool {
        if text.contains("relocat") && self.profile.willing_to_relocate() {
            return true;
        }
        let location = self.profile.location();
        place_mentioned(text).is_some_and(|place| !location.is_empty() && location.contains(&place))
    }
}

/// Skill names from the clause after the earliest " on ", " in " or " with ".
fn skill_tokens(text: &str) -> Vec<String> {
    let Some(clause) = [" on ", " in ", " with "]
        .iter()
        .filter_map(|sep| text.find(sep).map(|at| (at, sep.len())))
        .min_by_key(|&(at, _)| at)
        .map(|(at, len)| &text[at + len..])
    else {
        return Vec::new();
    };
    clause
        .split(" or ")
        .flat_map(|part| part.split(" and "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn has_years_word(text: &str) -> bool {
    text.split_whitespace()
        .any(|w| matches!(w, "year" | "years" | "yr" | "yrs"))
}

fn asks_for_years_of_experience(text: &str) -> bool {
    text.contains("exp") && has_years_word(text)
}

fn format_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{}", years as i64)
    } else {
        format!("{:.1}", years)
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
