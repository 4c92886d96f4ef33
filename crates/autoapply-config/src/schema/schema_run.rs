//! Run-time behaviour: pacing, wizard limits, actuator and resolver knobs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delays inserted between interactions, in milliseconds.
///
/// All zero is legal and makes a run sleep-free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_settle_min")]
    pub settle_min_ms: u64,

    #[serde(default = "default_settle_max")]
    pub settle_max_ms: u64,

    #[serde(default = "default_keystroke_min")]
    pub keystroke_min_ms: u64,

    #[serde(default = "default_keystroke_max")]
    pub keystroke_max_ms: u64,

    #[serde(default = "default_page_transition")]
    pub page_transition_ms: u64,

    #[serde(default = "default_entry_open")]
    pub entry_open_ms: u64,

    #[serde(default = "default_submit_wait")]
    pub submit_wait_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_min_ms: default_settle_min(),
            settle_max_ms: default_settle_max(),
            keystroke_min_ms: default_keystroke_min(),
            keystroke_max_ms: default_keystroke_max(),
            page_transition_ms: default_page_transition(),
            entry_open_ms: default_entry_open(),
            submit_wait_ms: default_submit_wait(),
        }
    }
}

impl TimingConfig {
    /// Timing with every delay set to zero.
    pub fn zero() -> Self {
        Self {
            settle_min_ms: 0,
            settle_max_ms: 0,
            keystroke_min_ms: 0,
            keystroke_max_ms: 0,
            page_transition_ms: 0,
            entry_open_ms: 0,
            submit_wait_ms: 0,
        }
    }
}

fn default_settle_min() -> u64 {
    300
}

fn default_settle_max() -> u64 {
    700
}

fn default_keystroke_min() -> u64 {
    30
}

fn default_keystroke_max() -> u64 {
    80
}

fn default_page_transition() -> u64 {
    1500
}

fn default_entry_open() -> u64 {
    2000
}

fn default_submit_wait() -> u64 {
    2000
}

/// Wizard loop limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Per-page cycle ceiling before forcing the review step.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Consecutive empty cycles that count as a drained form.
    #[serde(default = "default_empty_cycle_limit")]
    pub empty_cycle_limit: u32,

    /// How long a caller waits for a completion notice.
    #[serde(default = "default_completion_timeout")]
    pub completion_timeout_secs: u64,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            empty_cycle_limit: default_empty_cycle_limit(),
            completion_timeout_secs: default_completion_timeout(),
        }
    }
}

fn default_max_attempts() -> u32 {
    10
}

fn default_empty_cycle_limit() -> u32 {
    3
}

fn default_completion_timeout() -> u64 {
    30
}

/// Widget actuator options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActuatorConfig {
    /// Apply the first non-placeholder option after a dropdown miss.
    #[serde(default)]
    pub dropdown_fallback: bool,
}

/// Keyword resolver options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Phrase to profile path, merged after the built-in table.
    #[serde(default)]
    pub extra_keywords: BTreeMap<String, String>,
}
