use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize the logging system.
///
/// Logs go to a daily-rolling file only; stdout and stderr belong to the
/// chat UI. `RUST_LOG` overrides the configured level. The returned guard
/// must stay alive for the duration of the process or buffered log lines
/// are lost.
pub fn init_logging(level: &str, dir: &Path) -> WorkerGuard {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let file_appender = tracing_appender::rolling::daily(dir, "chatui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    Registry::default().with(filter).with(file_layer).init();

    guard
}
