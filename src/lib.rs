//! proxylauncher: a process-launch shim.
//!
//! Reads `proxylauncher.cfg`, merges its configured arguments with the ones
//! this binary received, and runs the configured target with inherited stdio.
//!
//! # Architecture
//!
//! ```text
//! proxylauncher.cfg --> config --> planner --> executor --> target
//!                                    ^
//!                 received args -----+
//! ```
//!
//! # Modules
//!
//! - [`tokenizer`]: Quote-aware splitting of the `extraArgs` value
//! - [`config`]: Configuration parsing, validation, and the default template
//! - [`planner`]: Argument composition and target resolution
//! - [`executor`]: File probing and process spawning
//! - [`window`]: Platform window-visibility strategies
//! - [`presentation`]: Dialog notices and editor invocation
//! - [`launcher`]: The load, plan, execute flow with injected collaborators
//! - [`constants`]: File names, environment switches, and user-facing text
//! - [`logging`]: Logger initialisation

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

pub mod config;
pub mod constants;
pub mod executor;
pub mod launcher;
pub mod logging;
pub mod planner;
pub mod presentation;
pub mod tokenizer;
pub mod window;

// ============================================================================
// CLI Types
// ============================================================================

/// proxylauncher command line.
///
/// Everything except a leading `--proxylauncher-config` belongs to the
/// target, so help and version flags are not intercepted.
#[derive(Parser, Debug)]
#[command(
    name = "proxylauncher",
    version,
    about = "Launch a configured target with merged arguments",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Path to the configuration file (defaults to proxylauncher.cfg next to the executable)
    #[arg(long = "proxylauncher-config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Arguments forwarded to the target, byte for byte
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<OsString>,
}

pub use config::{
    load_config, parse_config, parse_config_str, ConfigError, ConfigRecord, ExtraArgsOrder,
};
pub use executor::{FileProbe, FsProbe, ProcessSpawner, SystemSpawner};
pub use launcher::{default_config_path, Launcher, Outcome};
pub use planner::{plan, resolve_target, LaunchPlan};
pub use presentation::{DialogNotifier, Editor, Notifier, SystemEditor};
pub use tokenizer::tokenize;
pub use window::{platform_window_visibility, WindowVisibility};
