//! Structured Logger
//!
//! Wraps `tracing` with console output (plain or JSON), an optional rolling
//! NDJSON file, and environment-based level control.

use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix for rolled logs: `mindful-garden.log.YYYY-MM-DD`.
const LOG_FILE_PREFIX: &str = "mindful-garden.log";

/// Initialize the global logger. `RUST_LOG` wins over `level` when set.
///
/// Calling this twice is harmless; the second call leaves the first subscriber in place.
pub fn init_logger(level: &str, log_dir: Option<&Path>, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .build(dir)?;
            Some(fmt::layer().json().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    let (console_layer, json_layer) = if json {
        (None, Some(fmt::layer().json().with_writer(std::io::stdout)))
    } else {
        (
            Some(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(false)
                    .with_ansi(true),
            ),
            None,
        )
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}
