//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Delays above this are accepted but probably a unit mistake.
const LARGE_DELAY_MS: u64 = 30_000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_wizard(config, &mut result);
        Self::validate_resolver(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }

        if let Some(filter) = &config.browser.target_url_contains {
            if filter.trim().is_empty() {
                result.add_warning(ValidationWarning::new(
                    "browser.target_url_contains",
                    "empty filter matches every page",
                ));
            }
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        let t = &config.timing;
        let ranges = [
            ("timing.settle", t.settle_min_ms, t.settle_max_ms),
            ("timing.keystroke", t.keystroke_min_ms, t.keystroke_max_ms),
        ];
        for (path, min, max) in ranges {
            if min > max {
                result.add_error(ValidationError::new(
                    format!("{}_min_ms", path),
                    format!("minimum {} is greater than maximum {}", min, max),
                ));
            }
        }

        let delays = [
            ("timing.settle_max_ms", t.settle_max_ms),
            ("timing.keystroke_max_ms", t.keystroke_max_ms),
            ("timing.page_transition_ms", t.page_transition_ms),
            ("timing.entry_open_ms", t.entry_open_ms),
            ("timing.submit_wait_ms", t.submit_wait_ms),
        ];
        for (path, value) in delays {
            if value > LARGE_DELAY_MS {
                result.add_warning(ValidationWarning::new(
                    path,
                    format!("delay of {}ms is unusually large", value),
                ));
            }
        }
    }

    fn validate_wizard(config: &Config, result: &mut ValidationResult) {
        let w = &config.wizard;
        if w.max_attempts == 0 {
            result.add_error(ValidationError::new(
                "wizard.max_attempts",
                "max_attempts must be greater than 0",
            ));
        }

        if w.max_attempts > 100 {
            result.add_warning(ValidationWarning::new(
                "wizard.max_attempts",
                "max_attempts is very high (>100), a stuck form will spin for a long time",
            ));
        }

        if w.empty_cycle_limit == 0 {
            result.add_error(ValidationError::new(
                "wizard.empty_cycle_limit",
                "empty_cycle_limit must be greater than 0",
            ));
        }

        if w.completion_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "wizard.completion_timeout_secs",
                "completion_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_resolver(config: &Config, result: &mut ValidationResult) {
        for (phrase, path) in &config.resolver.extra_keywords {
            if phrase.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "resolver.extra_keywords",
                    "keyword phrase cannot be empty",
                ));
            }
            if path.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("resolver.extra_keywords.{}", phrase),
                    "profile path cannot be empty",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
