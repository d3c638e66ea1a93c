//! Logging setup utilities for the Kaigi server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose log output is enabled at the default level.
const LOGGED_CRATES: [&str; 3] = ["kaigi_server", "kaigi_shared", "tower_http"];

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// The binary name is normalized the same way cargo normalizes crate names
/// (`kaigi-server` → `kaigi_server`).
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary = binary_name.replace('-', "_");
    let mut directives: Vec<String> = LOGGED_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, default_log_level))
        .collect();
    if !LOGGED_CRATES.contains(&binary.as_str()) {
        directives.push(format!("{}={}", binary, default_log_level));
    }
    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "kaigi-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use kaigi_shared::logger::setup_logger;
///
/// setup_logger("kaigi-server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
