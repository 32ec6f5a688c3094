//! Structured logging for the URL handler
//!
//! Sets up tracing-based logging on stderr so stdout stays free for
//! output other tools may capture (e.g. `--locate`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system
///
/// This sets up tracing with:
/// - Environment-based filtering via RUST_LOG env var
/// - Default level of INFO in release builds, DEBUG in debug builds
/// - `verbose` forces DEBUG regardless of build type
///
/// # Example
/// ```ignore
/// use phpstorm_url_lib::logging;
/// logging::init(false);
/// tracing::info!("Handler started");
/// ```
pub fn init(verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if cfg!(debug_assertions) {
        "phpstorm_url=debug,info"
    } else {
        "phpstorm_url=info,warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init: a second call (e.g. from an embedding host) must not panic
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .compact(),
        )
        .try_init();
}

/// Initialize logging for tests
///
/// Uses try_init() to avoid panicking if called multiple times.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_does_not_panic() {
        init_test();
        init_test();
    }

    #[test]
    fn test_logging_macros() {
        init_test();

        tracing::debug!("debug message");
        tracing::info!("info message");
        tracing::warn!("warn message");
    }
}
