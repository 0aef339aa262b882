//! Boot — logging init and config load.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::ReaderConfig;

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr; stdout carries the entries.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearthlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate the configuration.
///
/// A positional argument, when given, replaces the configured log path.
pub fn boot<I>(args: I) -> Result<ReaderConfig, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = String>,
{
    info!("Starting hearthlog v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ReaderConfig::load()?;
    if let Some(path) = args.into_iter().nth(1) {
        config.log_path = path;
    }
    config.validate()?;

    info!(
        "Reading {} (follow={}, poll_interval={}ms, output={:?})",
        config.log_path, config.follow, config.poll_interval_ms, config.output
    );
    info!(
        "Line filter: named_loggers_only={}, loggers={:?}, pattern={:?}",
        config.filter.named_loggers_only, config.filter.loggers, config.filter.pattern
    );
    Ok(config)
}
