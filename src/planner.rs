//! Launch planning: turns a validated configuration and the received
//! arguments into the exact command the executor will run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{ConfigRecord, ExtraArgsOrder};
use crate::tokenizer::tokenize;

/// Everything the executor needs for one launch attempt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LaunchPlan {
    pub target: PathBuf,
    pub args: Vec<OsString>,
    pub hide_window: bool,
}

/// Resolve `target` against `base_dir` unless it is already absolute.
pub fn resolve_target(target: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(target);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Build the launch plan.
///
/// Extra arguments are tokenized and placed before or after `received`
/// according to the configured order. Nothing is reordered or deduplicated
/// within either side. Received arguments are carried as-is, even when they
/// are not valid UTF-8. The target's existence is the caller's concern.
pub fn plan(config: &ConfigRecord, received: &[OsString], base_dir: &Path) -> LaunchPlan {
    let extra = tokenize(&config.extra_args).into_iter().map(OsString::from);

    let args = match config.extra_args_order {
        Some(ExtraArgsOrder::Before) => extra.into_iter().chain(received.iter().cloned()).collect(),
        // No order is only valid when there are no extra tokens.
        Some(ExtraArgsOrder::After) | None => received.iter().cloned().chain(extra).collect(),
    };

    LaunchPlan {
        target: resolve_target(&config.target, base_dir),
        args,
        hide_window: config.hide_target,
    }
}

// ============================================================================
// Tests
// ============================================================================
