//! # AutoApply Core
//!
//! The question resolution and form-submission automaton.
//!
//! ## Components
//!
//! - [`ProfileAccessor`] - read-only view over the user profile
//! - [`extract`] - normalized question text from a container snapshot
//! - [`KeywordResolver`] - question text to [`QuestionPath`]
//! - [`AnswerComputer`] - path plus context to a concrete answer
//! - [`WidgetActuator`] - simulated interaction per widget shape
//! - [`WizardDriver`] - the multi-page state machine
//! - [`RunController`] / [`CompletionRelay`] - start/stop/status and the
//!   caller side of completion notices

pub mod actuate;
pub mod answer;
pub mod controller;
pub mod error;
pub mod extract;
pub mod pacing;
pub mod profile;
pub mod relay;
pub mod resolve;
pub mod wizard;

#[cfg(test)]
pub(crate) mod testing;

pub use actuate::WidgetActuator;
pub use answer::{AnswerComputer, NumericDemand, Provenance, QuestionContext, ResolvedAnswer};
pub use controller::{RunController, RunHandle};
pub use error::{RelayError, ResolverError};
pub use extract::{extract, normalize};
pub use pacing::Pacer;
pub use profile::{ProfileAccessor, UserProfile, YearMonth};
pub use relay::{BatchTally, CompletionRelay};
pub use resolve::{DerivedKind, KeywordResolver, KeywordTable, MatchTier, QuestionPath, Resolution};
pub use wizard::{RunOutcome, RunProgress, RunReport, WizardDriver, WizardPhase, WizardState};
