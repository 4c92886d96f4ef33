//! AutoApply - multi-step application form automaton
//!
//! Main entry point for the AutoApply CLI.

mod cli;
mod cmd_control;
mod cmd_diag;
mod cmd_run;
mod setup;

use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = setup::load_config(&cli.config)?;
    setup::init_tracing(&config.logging)?;
    setup::validate_config(&config)?;

    info!("AutoApply v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run::run_once(&config).await,
        Commands::Control => cmd_control::serve(&config).await,
        Commands::Resolve { question } => cmd_diag::resolve(&config, &question),
        Commands::CheckProfile { profile } => cmd_diag::check_profile(&config, profile.as_deref()),
    }
}
