// src/log.rs
//
// Logging setup: human lines on stderr plus a plain copy in
// `.store/debug.log`. Timestamps are elapsed time since start.
// `RUST_LOG` overrides the default filter.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, time::uptime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::consts::LOG_FILE;

/// Keeps the file writer alive; drop it last to flush the log.
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

fn default_filter(verbose: bool) -> &'static str {
    if verbose { "warn,job_scrape=debug" } else { "warn,job_scrape=info" }
}

/// Install the global subscriber. A second call is a no-op.
/// If `log_dir` cannot be created the file copy is skipped.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> LogGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(uptime())
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) if fs::create_dir_all(dir).is_ok() => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_timer(uptime())
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    LogGuard(guard)
}
