//! Tracing setup for a single CLI run.
//!
//! Human-readable logs go to stderr, stdout is reserved for the JSON report.
//! With `LOG_DIR` set, every run also appends JSON lines to a daily file.

use std::env;

use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Dependencies stay quiet unless `RUST_LOG` says otherwise.
const DEFAULT_FILTER: &str = "warn,riftcoach=info";

/// Installs the global subscriber.
///
/// The returned guard flushes the file sink when dropped, keep it alive until exit.
pub fn init() -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::new("%H:%M:%S%.3f".to_string()))
        .with_target(false);

    let (file, file_error) = match env::var("LOG_DIR") {
        Ok(dir) => match file_writer(&dir) {
            Ok(file) => (Some(file), None),
            Err(e) => (None, Some(e)),
        },
        Err(_) => (None, None),
    };
    let (file_writer, guard) = file.unzip();
    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(writer)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!(error = %e, "📝 Failed to create log file, logging to stderr only");
    }

    guard
}

fn file_writer(dir: &str) -> Result<(NonBlocking, WorkerGuard), InitError> {
    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("riftcoach")
        .filename_suffix("jsonl");

    if let Some(n) = env::var("LOG_MAX_FILES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
    {
        builder = builder.max_log_files(n);
    }

    Ok(tracing_appender::non_blocking(builder.build(dir)?))
}
