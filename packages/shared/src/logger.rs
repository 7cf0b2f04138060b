//! Logging setup utilities for the signaling relay.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Enables logs for the application itself and for `tower_http` request
/// traces. The default can be overridden with the `RUST_LOG` environment
/// variable.
///
/// # Arguments
///
/// * `app_name` - The name of the application crate or binary
///   (e.g., "kakehashi-server")
/// * `default_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use kakehashi_shared::logger::setup_logger;
///
/// setup_logger("kakehashi-server", "info");
/// ```
pub fn setup_logger(app_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}={},tower_http={}",
                    app_name.replace('-', "_"),
                    default_log_level,
                    default_log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
