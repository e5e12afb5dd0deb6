//! Logging setup for proxylauncher.
//!
//! Logs go to stderr through `env_logger`. `RUST_LOG` always wins; without
//! it the default level is `warn`, or `debug` when `PROXYLAUNCHER_DEBUG` is on.

use crate::constants::DEBUG_ENV_VAR;

/// Interpret a debug switch value. Accepts the same truthy spellings as the
/// configuration file plus `1`.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Check if debug logging is requested (PROXYLAUNCHER_DEBUG).
pub fn debug_mode_enabled() -> bool {
    std::env::var(DEBUG_ENV_VAR)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

/// Default filter used when `RUST_LOG` is not set.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}

/// Initialise the global logger. Safe to call more than once.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or(default_filter(debug_mode_enabled()));
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .try_init();
}
