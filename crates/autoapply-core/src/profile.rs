//! User profile document and the read-only accessor over it.
//!
//! The profile arrives as one camelCase JSON document. Typed sections cover
//! the fields the automaton computes with; everything else stays in the raw
//! value and is reachable through dotted lookups.

use std::collections::BTreeMap;
use std::path::Path;

use autoapply_protocols::ProfileError;
use chrono::Datelike;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::extract::normalize;

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;

/// The structured user profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "lenient")]
    pub personal_info: PersonalInfo,

    #[serde(default, deserialize_with = "lenient")]
    pub legal_and_work_auth: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub job_preferences: JobPreferences,

    #[serde(default, deserialize_with = "lenient")]
    pub education: Vec<EducationEntry>,

    #[serde(default, deserialize_with = "lenient")]
    pub documents_and_links: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub availability: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub behavioral_and_motivation: Map<String, Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub extra_and_optional: ExtraAndOptional,

    /// Skill name to years of experience (number or numeric string).
    #[serde(default, deserialize_with = "lenient")]
    pub skills: BTreeMap<String, Value>,

    #[serde(default, deserialize_with = "lenient")]
    pub work_experiences: Vec<WorkExperience>,
}

/// Personal identity section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Job preference section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPreferences {
    #[serde(default)]
    pub work_authorization: Option<Value>,
    #[serde(default)]
    pub willing_to_relocate: Option<Value>,
    #[serde(default)]
    pub notice_period: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub skill_ratings: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub technologies: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional extras section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraAndOptional {
    #[serde(default)]
    pub willing_to_relocate: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub skill_ratings: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub field: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub institution: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One employment interval.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start_date: Option<String>,
    /// Missing, empty, `present`, `ongoing` and `current` all mean ongoing.
    #[serde(default, deserialize_with = "lenient_string")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

impl WorkExperience {
    /// Whole months between start and end (or `now` when ongoing), never negative.
    pub fn months(&self, now: YearMonth) -> Option<u32> {
        let start = YearMonth::parse(self.start_date.as_deref()?)?;
        let end = match self.end_date.as_deref().map(str::trim) {
            None => now,
            Some(s) if is_ongoing_marker(s) => now,
            Some(s) => YearMonth::parse(s)?,
        };
        Some(start.months_until(end).max(0) as u32)
    }
}

fn is_ongoing_marker(s: &str) -> bool {
    s.is_empty()
        || s.eq_ignore_ascii_case("present")
        || s.eq_ignore_ascii_case("ongoing")
        || s.eq_ignore_ascii_case("current")
}

/// Scalar as text; a value of any other shape reads as absent.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// A section of the wrong shape reads as empty instead of rejecting the
/// whole document. The raw value stays reachable through lookups.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based.
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The current local month.
    pub fn now() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.year(), today.month())
    }

    /// Parse `YYYY-MM`, `YYYY-MM-DD` or `YYYY/MM`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self::new(date.year(), date.month()));
        }
        let (year, month) = s.split_once(['-', '/'])?;
        let year: i32 = year.trim().parse().ok()?;
        let month: u32 = month.trim().parse().ok()?;
        (1..=12).contains(&month).then_some(Self::new(year, month))
    }

    /// Signed whole months from `self` to `end`.
    pub fn months_until(&self, end: YearMonth) -> i64 {
        (end.year as i64 - self.year as i64) * 12 + end.month as i64 - self.month as i64
    }
}

/// Read-only view over the profile for one run.
#[derive(Debug, Clone, Default)]
pub struct ProfileAccessor {
    profile: UserProfile,
    raw: Value,
}

impl ProfileAccessor {
    /// Build from a parsed JSON document.
    pub fn from_value(raw: Value) -> Result<Self, ProfileError> {
        if !raw.is_object() {
            return Err(ProfileError::NotAnObject);
        }
        let profile = serde_json::from_value(raw.clone())?;
        Ok(Self { profile, raw })
    }

    pub fn from_json_str(text: &str) -> Result<Self, ProfileError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load a profile, substituting the empty profile on any failure.
    ///
    /// The error is returned alongside so callers can surface it.
    pub fn load_or_empty(path: &Path) -> (Self, Option<ProfileError>) {
        match Self::load(path) {
            Ok(accessor) => (accessor, None),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "profile load failed, using empty profile");
                (Self::empty(), Some(e))
            }
        }
    }

    /// The all-empty profile.
    pub fn empty() -> Self {
        Self {
            profile: UserProfile::default(),
            raw: Value::Object(Map::new()),
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Resolve a dotted path. Numeric segments index into lists.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.raw, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Resolve a dotted path and render it as answer text.
    pub fn lookup_rendered(&self, path: &str) -> Option<String> {
        self.lookup(path).and_then(render_value)
    }

    /// Total professional experience in whole years, rounded.
    pub fn aggregate_experience_years(&self, now: YearMonth) -> u32 {
        let months: u32 = self
            .profile
            .work_experiences
            .iter()
            .filter_map(|exp| {
                let months = exp.months(now);
                if months.is_none() {
                    debug!(company = ?exp.company, "skipping interval with unreadable dates");
                }
                months
            })
            .sum();
        (months as f64 / 12.0).round() as u32
    }

    /// Years of experience for the profile skill best matching `token`.
    ///
    /// Skill names are tried longest first and matched on whole words so
    /// that `java` never lands on `javascript`.
    pub fn skill_years(&self, token: &str) -> Option<f64> {
        let token = normalize(token);
        if token.is_empty() {
            return None;
        }
        let mut skills: Vec<(String, &Value)> = self
            .profile
            .skills
            .iter()
            .map(|(name, years)| (normalize(name), years))
            .collect();
        skills.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        skills
            .into_iter()
            .find(|(name, _)| {
                !name.is_empty()
                    && (*name == token || contains_words(&token, name) || contains_words(name, &token))
            })
            .and_then(|(_, years)| value_as_number(years))
    }

    /// Rating for the first skill (longest name first) mentioned in `text`.
    pub fn skill_rating_in(&self, text: &str) -> Option<String> {
        let prefs = &self.profile.job_preferences.skill_ratings;
        let extras = &self.profile.extra_and_optional.skill_ratings;
        let mut ratings: Vec<(String, &Value)> = prefs
            .iter()
            .chain(extras.iter())
            .map(|(name, rating)| (normalize(name), rating))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        ratings.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        ratings
            .into_iter()
            .find(|(name, _)| contains_words(text, name))
            .and_then(|(_, rating)| render_value(rating))
    }

    /// Whether any education entry is bachelor's level.
    pub fn has_bachelors_degree(&self) -> bool {
        self.profile.education.iter().any(|edu| {
            edu.degree
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains("bachelor"))
        })
    }

    pub fn willing_to_relocate(&self) -> bool {
        [
            &self.profile.job_preferences.willing_to_relocate,
            &self.profile.extra_and_optional.willing_to_relocate,
        ]
        .into_iter()
        .flatten()
        .any(is_affirmative)
    }

    /// Lowercased current location, empty when unknown.
    pub fn location(&self) -> String {
        self.profile
            .personal_info
            .location
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Whether the profile states the user may work without restriction.
    pub fn work_authorized(&self) -> bool {
        self.profile
            .job_preferences
            .work_authorization
            .as_ref()
            .or_else(|| self.lookup("legalAndWorkAuth.authorizedToWorkIn"))
            .is_some_and(is_affirmative)
    }

    /// Years spent in intervals whose description mentions `token`.
    pub fn described_experience_years(&self, token: &str, now: YearMonth) -> u32 {
        let token = normalize(token);
        let months: u32 = self
            .profile
            .work_experiences
            .iter()
            .filter(|exp| {
                exp.description
                    .as_deref()
                    .is_some_and(|d| contains_words(&normalize(d), &token))
            })
            .filter_map(|exp| exp.months(now))
            .sum();
        (months as f64 / 12.0).round() as u32
    }
}

/// Render a profile value as answer text.
///
/// Booleans become `Yes`/`No`, lists are comma-joined, and null, empty or
/// object values yield `None`.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::Bool(true) => Some("Yes".to_string()),
        Value::Bool(false) => Some("No".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(render_value).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
    }
}

fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

/// First number in a string, ignoring thousands separators. A `-` directly
/// before the first digit is kept as the sign.
pub fn leading_number(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let start = cleaned.find(|c: char| c.is_ascii_digit())?;
    let tail = &cleaned[start..];
    let end = tail
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (c == '.' && i > 0)))
        .map_or(tail.len(), |(i, _)| i);
    let magnitude: f64 = tail[..end].trim_end_matches('.').parse().ok()?;
    let negative = cleaned[..start].ends_with('-');
    Some(if negative { -magnitude } else { magnitude })
}

fn is_affirmative(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            !s.is_empty() && !matches!(s.as_str(), "no" | "false" | "none" | "n/a")
        }
        _ => false,
    }
}

/// Whole-word containment over normalized text.
pub(crate) fn contains_words(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && format!(" {} ", haystack).contains(&format!(" {} ", needle))
}
