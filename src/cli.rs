//! CLI definitions for AutoApply.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AutoApply CLI.
#[derive(Parser)]
#[command(name = "autoapply")]
#[command(about = "Fill and submit multi-step application forms from a user profile")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/autoapply.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run one application on the attached page and wait for its outcome (default)
    Run,

    /// Serve line-delimited JSON control requests on stdin/stdout
    Control,

    /// Show how a question resolves against the keyword table
    Resolve {
        /// Question text as rendered on the page
        question: String,
    },

    /// Load the profile and print a short summary
    CheckProfile {
        /// Profile path (default: the configured one)
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },
}
