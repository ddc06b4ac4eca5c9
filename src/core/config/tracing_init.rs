use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::env::AppConfig;

/// Initialize the tracing subscriber with env-based filtering.
///
/// Reads `RUST_LOG` (or `LOG_LEVEL`) to set the filter, falling back to the
/// configured level. When `log_dir` is set, a daily rolling file is written
/// next to stdout; keep the returned guard alive until shutdown or buffered
/// lines are lost.
pub fn init_tracing(cfg: &AppConfig) -> Option<WorkerGuard> {
    let filter = || {
        EnvFilter::try_from_env("RUST_LOG")
            .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
            .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level))
    };

    let stdout_layer = fmt::layer().with_target(true).with_filter(filter());

    match cfg.log_dir.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "boxoffice-console.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());

            let _ = tracing_subscriber::registry()
                .with(stdout_layer)
                .with(file_layer)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::registry().with(stdout_layer).try_init();
            None
        }
    }
}
