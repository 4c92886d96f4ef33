//! Error types for the AutoApply protocol layer.

mod page;
mod profile;
mod run;

pub use page::*;
pub use profile::*;
pub use run::*;
