//! Shared startup: tracing, configuration and component wiring.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use autoapply_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use autoapply_core::{
    KeywordResolver, KeywordTable, Pacer, ProfileAccessor, WidgetActuator, WizardDriver,
};

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Console layer on stderr plus a daily-rotated file layer.
///
/// stdout is left alone for the control channel.
pub(crate) fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("autoapply")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load the configuration file (defaults when absent).
pub(crate) fn load_config(path: &Path) -> anyhow::Result<Config> {
    ConfigLoader::load_or_default(path)
        .with_context(|| format!("loading configuration from {}", path.display()))
}

/// Validate after tracing is up so findings are logged.
pub(crate) fn validate_config(config: &Config) -> anyhow::Result<()> {
    let result = ConfigValidator::validate(config)?;
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    for err in &result.errors {
        error!("Config {}: {}", err.path, err.message);
    }
    if !result.is_valid() {
        anyhow::bail!("configuration has {} error(s)", result.errors.len());
    }
    Ok(())
}

pub(crate) fn build_resolver(config: &Config) -> anyhow::Result<KeywordResolver> {
    let table = KeywordTable::with_extras(&config.resolver.extra_keywords)?;
    Ok(KeywordResolver::new(table)?)
}

/// Wire the wizard driver. A missing or broken profile degrades to the
/// empty profile.
pub(crate) fn build_driver(config: &Config) -> anyhow::Result<Arc<WizardDriver>> {
    let resolver = build_resolver(config)?;
    let profile_path = Path::new(&config.profile.path);
    let (profile, load_error) = ProfileAccessor::load_or_empty(profile_path);
    match load_error {
        Some(e) => error!(
            path = %profile_path.display(),
            error = %e,
            "Profile unusable, answering from the empty profile"
        ),
        None => info!(path = %profile_path.display(), "Profile loaded"),
    }

    let pacer = Pacer::new(config.timing.clone());
    let actuator = WidgetActuator::new(pacer.clone(), &config.actuator);

    Ok(Arc::new(WizardDriver::new(
        Arc::new(resolver),
        Arc::new(profile),
        actuator,
        pacer,
        config.wizard.clone(),
    )))
}
