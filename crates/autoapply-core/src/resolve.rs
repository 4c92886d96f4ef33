//! Keyword resolution: normalized question text to a profile path.
//!
//! Two tiers run in order. The keyword table is scanned longest phrase
//! first and the first phrase contained in the text wins. When no phrase
//! matches, a fixed list of category patterns is tried, each mapping to one
//! derived path. No match at all is an expected outcome: the question is
//! skipped (or left to the default heuristic for binary widgets).

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::ResolverError;
use crate::extract::normalize;

#[path = "resolve_keywords.rs"]
mod resolve_keywords;
use resolve_keywords::BUILTIN_KEYWORDS;

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;

/// Derived computations that do not map to a single profile field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DerivedKind {
    /// Total years from the employment intervals, or per-skill years.
    AggregateExperience,
    /// Self-rating for the skill mentioned in the question.
    SkillRating,
    /// Whether an education entry is bachelor's level.
    BachelorsDegree,
    /// Willingness to relocate or presence at a named place.
    Relocation,
    /// Unrestricted work authorization.
    WorkAuthorization,
    /// Years with one technology named in the question.
    TechnologyExperience(String),
    /// Notice period or start date.
    Availability,
}

impl DerivedKind {
    fn sentinel(&self) -> String {
        match self {
            DerivedKind::AggregateExperience => "@experience".to_string(),
            DerivedKind::SkillRating => "@skill-rating".to_string(),
            DerivedKind::BachelorsDegree => "@bachelors-degree".to_string(),
            DerivedKind::Relocation => "@relocation".to_string(),
            DerivedKind::WorkAuthorization => "@work-authorization".to_string(),
            DerivedKind::TechnologyExperience(token) => format!("@technology:{}", token),
            DerivedKind::Availability => "@availability".to_string(),
        }
    }
}

/// Where an answer comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionPath {
    /// Dotted path into the profile document.
    Lookup(String),
    /// One of the enumerated derived computations.
    Derived(DerivedKind),
}

impl QuestionPath {
    /// Parse a table entry: `@name` sentinels or dotted lookups.
    pub fn parse(text: &str) -> Result<Self, ResolverError> {
        let text = text.trim();
        let Some(sentinel) = text.strip_prefix('@') else {
            return Ok(QuestionPath::Lookup(text.to_string()));
        };
        let kind = match sentinel {
            "experience" => DerivedKind::AggregateExperience,
            "skill-rating" => DerivedKind::SkillRating,
            "bachelors-degree" => DerivedKind::BachelorsDegree,
            "relocation" => DerivedKind::Relocation,
            "work-authorization" => DerivedKind::WorkAuthorization,
            "availability" => DerivedKind::Availability,
            other => match other.strip_prefix("technology:") {
                Some(token) if !token.trim().is_empty() => {
                    DerivedKind::TechnologyExperience(token.trim().to_string())
                }
                _ => return Err(ResolverError::UnknownSentinel(text.to_string())),
            },
        };
        Ok(QuestionPath::Derived(kind))
    }

    pub fn is_derived(&self, kind: &DerivedKind) -> bool {
        matches!(self, QuestionPath::Derived(k) if k == kind)
    }
}

impl fmt::Display for QuestionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionPath::Lookup(path) => f.write_str(path),
            QuestionPath::Derived(kind) => f.write_str(&kind.sentinel()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    pub phrase: String,
    pub path: QuestionPath,
}

/// A phrase defined more than once; the later definition is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowedEntry {
    pub phrase: String,
    pub dropped: QuestionPath,
    pub kept: QuestionPath,
}

/// Keyword phrases sorted by length, longest first.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
    shadowed: Vec<ShadowedEntry>,
    unreachable: Vec<String>,
}

impl KeywordTable {
    /// The built-in table.
    pub fn builtin() -> Result<Self, ResolverError> {
        Self::build(BUILTIN_KEYWORDS.iter().copied())
    }

    /// The built-in table followed by configured extras.
    pub fn with_extras(extras: &BTreeMap<String, String>) -> Result<Self, ResolverError> {
        Self::build(
            BUILTIN_KEYWORDS
                .iter()
                .copied()
                .chain(extras.iter().map(|(p, q)| (p.as_str(), q.as_str()))),
        )
    }

    /// Build a table from `(phrase, path)` pairs in definition order.
    pub fn build<'a, I>(pairs: I) -> Result<Self, ResolverError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = KeywordTable::default();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (phrase, path) in pairs {
            let phrase = phrase.trim();
            if phrase.is_empty() {
                return Err(ResolverError::EmptyPhrase);
            }
            if path.trim().is_empty() {
                return Err(ResolverError::EmptyPath(phrase.to_string()));
            }
            let path = QuestionPath::parse(path)?;

            if normalize(phrase) != phrase {
                debug!(phrase, "keyword can never match normalized text");
                table.unreachable.push(phrase.to_string());
                continue;
            }

            match index.get(phrase) {
                Some(&i) => {
                    let dropped = std::mem::replace(&mut table.entries[i].path, path.clone());
                    debug!(phrase, dropped = %dropped, kept = %path, "duplicate keyword");
                    table.shadowed.push(ShadowedEntry {
                        phrase: phrase.to_string(),
                        dropped,
                        kept: path,
                    });
                }
                None => {
                    index.insert(phrase.to_string(), table.entries.len());
                    table.entries.push(KeywordEntry {
                        phrase: phrase.to_string(),
                        path,
                    });
                }
            }
        }

        if !table.shadowed.is_empty() || !table.unreachable.is_empty() {
            warn!(
                shadowed = table.shadowed.len(),
                unreachable = table.unreachable.len(),
                "keyword table has entries that never resolve"
            );
        }

        // Stable: equal lengths keep definition order.
        table.entries.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));
        Ok(table)
    }

    /// First entry, longest phrase first, whose phrase occurs in `text`.
    pub fn lookup(&self, text: &str) -> Option<&KeywordEntry> {
        self.entries.iter().find(|e| text.contains(e.phrase.as_str()))
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    /// Earlier definitions replaced by a later duplicate.
    pub fn shadowed(&self) -> &[ShadowedEntry] {
        &self.shadowed
    }

    /// Phrases rejected because normalized text can never contain them.
    pub fn unreachable(&self) -> &[String] {
        &self.unreachable
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which tier produced a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchTier {
    Keyword { phrase: String },
    Category { name: &'static str },
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTier::Keyword { phrase } => write!(f, "keyword \"{}\"", phrase),
            MatchTier::Category { name } => write!(f, "category {}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: QuestionPath,
    pub tier: MatchTier,
}

enum CategoryTarget {
    Fixed(DerivedKind),
    /// Technology named by the first capture group.
    CapturedTechnology,
}

struct CategoryRule {
    name: &'static str,
    pattern: Regex,
    target: CategoryTarget,
}

/// Category patterns, tried in this order when no keyword matches.
const CATEGORY_PATTERNS: &[(&str, &str)] = &[
    (
        "relocation",
        r"\b(?:from|relocat\w*|commut\w*|based in|located in)\s+(?:to\s+)?[a-z]+",
    ),
    (
        "authorization",
        r"\b(?:authorized|authorization|sponsorship|visa|work\s+permit)\b",
    ),
    (
        "technology",
        r"\b(?:experience|proficiency|knowledge|familiarity)\s+(?:with|in|of)\s+([a-z0-9][a-z0-9 ]*)",
    ),
    (
        "availability",
        r"\b(?:how\s+soon|join|start\s+date|availability)\b",
    ),
];

/// Resolves normalized question text to a [`QuestionPath`].
pub struct KeywordResolver {
    table: KeywordTable,
    categories: Vec<CategoryRule>,
}

impl KeywordResolver {
    pub fn new(table: KeywordTable) -> Result<Self, ResolverError> {
        let categories = CATEGORY_PATTERNS
            .iter()
            .map(|&(name, pattern)| {
                let target = match name {
                    "relocation" => CategoryTarget::Fixed(DerivedKind::Relocation),
                    "authorization" => CategoryTarget::Fixed(DerivedKind::WorkAuthorization),
                    "technology" => CategoryTarget::CapturedTechnology,
                    _ => CategoryTarget::Fixed(DerivedKind::Availability),
                };
                Ok(CategoryRule {
                    name,
                    pattern: Regex::new(pattern)?,
                    target,
                })
            })
            .collect::<Result<Vec<_>, ResolverError>>()?;
        Ok(Self { table, categories })
    }

    /// Resolver over the built-in table.
    pub fn builtin() -> Result<Self, ResolverError> {
        Self::new(KeywordTable::builtin()?)
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    pub fn resolve(&self, text: &str) -> Option<QuestionPath> {
        self.explain(text).map(|r| r.path)
    }

    /// Resolve and report which tier matched.
    pub fn explain(&self, text: &str) -> Option<Resolution> {
        if let Some(entry) = self.table.lookup(text) {
            debug!(question = text, phrase = %entry.phrase, path = %entry.path, "keyword matched");
            return Some(Resolution {
                path: entry.path.clone(),
                tier: MatchTier::Keyword {
                    phrase: entry.phrase.clone(),
                },
            });
        }

        for rule in &self.categories {
            let Some(caps) = rule.pattern.captures(text) else {
                continue;
            };
            let kind = match &rule.target {
                CategoryTarget::Fixed(kind) => kind.clone(),
                CategoryTarget::CapturedTechnology => {
                    let Some(token) = caps.get(1).map(|m| technology_token(m.as_str())) else {
                        continue;
                    };
                    if token.is_empty() {
                        continue;
                    }
                    DerivedKind::TechnologyExperience(token)
                }
            };
            let path = QuestionPath::Derived(kind);
            debug!(question = text, category = rule.name, path = %path, "category matched");
            return Some(Resolution {
                path,
                tier: MatchTier::Category { name: rule.name },
            });
        }

        debug!(question = text, "no keyword or category matched");
        None
    }
}

/// First technology of a captured clause: cut at conjunctions, at most
/// three words.
fn technology_token(clause: &str) -> String {
    let first = clause
        .split(" or ")
        .next()
        .and_then(|s| s.split(" and ").next())
        .unwrap_or_default();
    first
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Place named after "from", "based in" or "located in".
pub(crate) fn place_mentioned(text: &str) -> Option<String> {
    const MARKERS: &[&str] = &["based in ", "located in ", "from "];
    const STOP: &[&str] = &["the", "a", "an", "your", "my", "home", "our"];
    MARKERS.iter().find_map(|marker| {
        let (_, rest) = text.split_once(marker)?;
        rest.split_whitespace()
            .find(|w| !STOP.contains(w))
            .map(str::to_string)
    })
}
