//! Launch execution: the capabilities that touch the real system.
//!
//! Both traits exist so the orchestrator can be driven by fakes in tests.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::constants::FAILURE_EXIT_CODE;
use crate::planner::LaunchPlan;
use crate::window::WindowVisibility;

// ============================================================================
// File Existence
// ============================================================================

/// Answers whether a path names an existing regular file.
pub trait FileProbe {
    fn is_file(&self, path: &Path) -> bool;
}

/// [`FileProbe`] backed by the filesystem. Directories do not count.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn is_file(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .map(|meta| !meta.is_dir())
            .unwrap_or(false)
    }
}

// ============================================================================
// Process Spawning
// ============================================================================

/// Runs a launch plan to completion and reports the target's exit code.
pub trait ProcessSpawner {
    fn run(&self, plan: &LaunchPlan, window: &dyn WindowVisibility) -> Result<i32>;
}

/// Build the command for a plan with all three standard streams inherited.
pub fn build_command(plan: &LaunchPlan, window: &dyn WindowVisibility) -> Command {
    let mut command = Command::new(&plan.target);
    command
        .args(&plan.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    window.prepare(&mut command, plan.hide_window);
    command
}

/// [`ProcessSpawner`] that runs the target as a child process and waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn run(&self, plan: &LaunchPlan, window: &dyn WindowVisibility) -> Result<i32> {
        info!("executing {} {:?}", plan.target.display(), plan.args);
        debug!("hide window: {} ({})", plan.hide_window, window.name());

        let mut child = build_command(plan, window)
            .spawn()
            .context("failed to execute target")?;
        window.apply_window_visibility(&child, plan.hide_window);

        let status = child.wait().context("failed to wait for target")?;

        // Signal termination has no exit code.
        let code = status.code().unwrap_or(FAILURE_EXIT_CODE);
        if status.success() {
            info!("target exited successfully");
        } else {
            warn!("target exited with {}", status);
        }
        Ok(code)
    }
}

// ============================================================================
// Tests
// ============================================================================
