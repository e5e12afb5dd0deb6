//! Centralized constants for proxylauncher file names, environment switches,
//! and user-facing text.
//!
//! Kept in one place so the presentation layer, the orchestrator, and the
//! tests agree on the exact strings.

// ============================================================================
// File & Environment Constants
// ============================================================================

/// Configuration file name, looked up next to the running executable.
pub const CONFIG_FILE_NAME: &str = "proxylauncher.cfg";

/// Environment switch that raises the default log level to debug.
pub const DEBUG_ENV_VAR: &str = "PROXYLAUNCHER_DEBUG";

// ============================================================================
// Window Hiding Constants
// ============================================================================

/// Interval between sweeps for new windows owned by a hidden target (milliseconds)
pub const HIDE_POLL_MS: u64 = 50;

/// How long a hidden target's windows are watched after spawn (milliseconds)
pub const HIDE_WATCH_MS: u64 = 10_000;

/// Convert milliseconds to Duration (const fn for compile-time evaluation)
pub const fn millis_to_duration(ms: u64) -> std::time::Duration {
    std::time::Duration::from_millis(ms)
}

// ============================================================================
// Dialog Constants
// ============================================================================

/// Title used for error dialogs
pub const ERROR_TITLE: &str = "ProxyLauncher Error";

/// Title used for information dialogs
pub const INFO_TITLE: &str = "ProxyLauncher Information";

/// Shown after a default configuration has been written and opened.
pub const CONFIG_CREATED_MESSAGE: &str = "No configuration file found. A default configuration has been created. Please edit it to your needs and restart the application.";

/// Exit code reported when the launch attempt fails before the target runs.
pub const FAILURE_EXIT_CODE: i32 = 1;

// ============================================================================
// Default Configuration Template
// ============================================================================

/// Lines written to a freshly created configuration file.
pub const DEFAULT_CONFIG_LINES: &[&str] = &[
    "# Path to the target executable (absolute or relative to this config file's directory)",
    "target=",
    "",
    "# Additional arguments to pass to the target executable (can be empty)",
    "extraArgs=",
    "",
    "# Whether extra arguments come before or after the received command line arguments (valid values: before, after)",
    "extraArgsOrder=before",
    "",
    "# Whether to hide the target application's windows (valid values: true/yes/on, false/no/off)",
    "hideTarget=false",
];

/// Render the default configuration template, newline terminated.
pub fn default_config_text() -> String {
    let mut text = DEFAULT_CONFIG_LINES.join("\n");
    text.push('\n');
    text
}
