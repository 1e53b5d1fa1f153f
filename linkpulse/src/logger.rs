use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DIRECTIVE: &str = "linkpulse=info";

/// Installs the global subscriber.
///
/// Logs go to stderr; stdout carries only the probe result lines.
pub fn init() -> tracing_appender::non_blocking::WorkerGuard {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_line_number(true)
                .with_target(false)
                .with_writer(non_blocking_writer),
        )
        .with(filter)
        .init();

    // Must be held for the life of the process so buffered logs get flushed.
    guard
}
