//! # AutoApply Config
//!
//! TOML configuration for the AutoApply form automaton: browser endpoint,
//! profile location, pacing, wizard limits and resolver extensions.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
