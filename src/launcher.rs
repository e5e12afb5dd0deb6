//! Launch orchestration.
//!
//! Runs one launch attempt: load config, validate, plan, execute, exit.
//! Every system capability is injected so the whole flow can be exercised
//! with fakes.

use anyhow::{anyhow, Result};
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::{config_base_dir, load_config, write_default_config, ConfigError};
use crate::constants::{CONFIG_CREATED_MESSAGE, CONFIG_FILE_NAME, FAILURE_EXIT_CODE};
use crate::executor::{FileProbe, ProcessSpawner};
use crate::planner::plan;
use crate::presentation::{Editor, Notifier};
use crate::window::WindowVisibility;

// ============================================================================
// Outcome
// ============================================================================

/// How a launch attempt ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The target ran and exited with this code.
    Exited(i32),
    /// No configuration existed; a default one was written for editing.
    ConfigCreated,
    /// The attempt failed and the user was notified.
    Failed,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Exited(code) => code,
            Outcome::ConfigCreated => 0,
            Outcome::Failed => FAILURE_EXIT_CODE,
        }
    }
}

// ============================================================================
// Config Location
// ============================================================================

/// `proxylauncher.cfg` next to the running executable.
pub fn default_config_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| anyhow!("Failed to determine executable path: {e}"))?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("Failed to determine executable path: {}", exe.display()))?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

// ============================================================================
// Launcher
// ============================================================================

/// One launch attempt wired to its collaborators.
pub struct Launcher<'a> {
    probe: &'a dyn FileProbe,
    spawner: &'a dyn ProcessSpawner,
    notifier: &'a dyn Notifier,
    editor: &'a dyn Editor,
    window: &'a dyn WindowVisibility,
}

impl<'a> Launcher<'a> {
    pub fn new(
        probe: &'a dyn FileProbe,
        spawner: &'a dyn ProcessSpawner,
        notifier: &'a dyn Notifier,
        editor: &'a dyn Editor,
        window: &'a dyn WindowVisibility,
    ) -> Self {
        Self {
            probe,
            spawner,
            notifier,
            editor,
            window,
        }
    }

    /// Run the attempt for `config_path`, forwarding `received` to the target.
    pub fn run(&self, config_path: &Path, received: &[OsString]) -> Outcome {
        debug!("using config {}", config_path.display());

        if !self.probe.is_file(config_path) {
            return self.create_default_config(config_path);
        }

        let config = match load_config(config_path, self.probe) {
            Ok(config) => config,
            Err(e) => {
                let message = match &e {
                    ConfigError::SourceUnreadable { .. } | ConfigError::TargetNotFound(_) => {
                        e.to_string()
                    }
                    _ => format!("error parsing config file: {e}"),
                };
                self.notifier.error(&message);
                return Outcome::Failed;
            }
        };

        let plan = plan(&config, received, &config_base_dir(config_path));
        debug!(
            "plan: target={} args={:?} hide_window={}",
            plan.target.display(),
            plan.args,
            plan.hide_window
        );

        match self.spawner.run(&plan, self.window) {
            Ok(code) => Outcome::Exited(code),
            Err(e) => {
                self.notifier.error(&format!("{e:#}"));
                Outcome::Failed
            }
        }
    }

    fn create_default_config(&self, config_path: &Path) -> Outcome {
        debug!("no config at {}, writing default", config_path.display());

        if let Err(e) = write_default_config(config_path) {
            self.notifier
                .error(&format!("Failed to create default configuration file: {e:#}"));
            return Outcome::Failed;
        }

        if let Err(e) = self.editor.open(config_path) {
            self.notifier
                .error(&format!("Failed to open new default configuration file: {e:#}"));
            return Outcome::Failed;
        }

        self.notifier.info(CONFIG_CREATED_MESSAGE);
        Outcome::ConfigCreated
    }
}
