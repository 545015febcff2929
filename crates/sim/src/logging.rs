//! Subscriber setup for the skirmish binary.
use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "arena.log";

/// Installs a stderr layer and, when `log_dir` is set, a non-blocking file
/// layer writing to `<log_dir>/arena.log`.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the whole run.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}", dir.join(LOG_FILE).display());
    }

    Ok(guard)
}
