use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a `tracing` filter directive, e.g. `keyfold=debug`.
pub const LOG_ENV: &str = "KEYFOLD_LOG";

/// Install the stderr subscriber.
///
/// `KEYFOLD_LOG` wins when set; otherwise warnings only, or debug with `-v`.
/// Stdout stays reserved for command output and the MCP transport.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // A second initialization (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
