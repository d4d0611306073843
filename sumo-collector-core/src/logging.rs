//! Logging infrastructure
//!
//! Logs go to stderr unless `logging.directory` is configured, in which case
//! they are written to daily files named `sumo-collector.log.YYYY-MM-DD` in
//! that directory.

use crate::config::LoggingConfig;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_FILE_NAME: &str = "sumo-collector.log";

/// Initialize the logging system
///
/// Sets up tracing with:
/// - File output with daily rotation when a directory is configured, stderr otherwise
/// - Configurable log level via config or RUST_LOG env var
pub fn init(config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    // Build the filter from config or env var
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let Some(log_dir) = &config.directory else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();

        tracing::debug!(level = %config.level, "Logging initialized");
        return Ok(LoggingGuard { _guard: None });
    };

    std::fs::create_dir_all(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender(log_dir));

    // File layer - structured logging with timestamps
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(
        log_dir = %log_dir.display(),
        level = %config.level,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _guard: Some(guard),
    })
}

/// Initialize logging for tests (logs to stdout)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Guard that keeps the logging system alive
///
/// When dropped, flushes any pending log writes.
pub struct LoggingGuard {
    _guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Appender writing `sumo-collector.log.<date>` files, rotated daily
fn file_appender(log_dir: &Path) -> RollingFileAppender {
    RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME)
}
