use std::path::Path;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::app::{enums::log_level::LogLevel, errors::StartupError};

pub const LOG_FILE_PREFIX: &str = "app";
pub const LOG_FILE_SUFFIX: &str = "log";
/// Current file plus three rotated ones.
pub const MAX_LOG_FILES: usize = 4;

/// Installs the global subscriber: console at `console_level` (`RUST_LOG`
/// wins when set) and, when `log_dir` is given, a daily rolling file at
/// `file_level`.
///
/// Keep the returned guard alive for as long as the file should be written.
pub fn init(
    console_level: LogLevel,
    file_level: LogLevel,
    log_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>, StartupError> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(console_level)));
    let console_layer = fmt::layer().with_target(true).with_filter(console_filter);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = file_appender(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(EnvFilter::new(directives(file_level)));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| StartupError::Logging(e.to_string()))?;

    Ok(guard)
}

fn file_appender(dir: &Path) -> Result<RollingFileAppender, StartupError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| StartupError::Logging(format!("{}: {}", dir.display(), e)))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(dir)
        .map_err(|e| StartupError::Logging(format!("{}: {}", dir.display(), e)))
}

/// Our own crate follows `level`; the HTTP stack never goes below info.
fn directives(level: LogLevel) -> String {
    let third_party = match level {
        LogLevel::Debug => LogLevel::Info,
        other => other,
    };

    format!(
        "{0},hyper={1},tower_http={1}",
        level.directive(),
        third_party.directive()
    )
}
