//! User-facing presentation: error/info notices and opening the
//! configuration file for editing.
//!
//! proxylauncher usually runs without a terminal (double-clicked or started
//! by another program), so notices go to a native dialog when one of the
//! platform dialog tools is available and fall back to stderr otherwise.

use anyhow::{Context, Result};
use log::{debug, error, info};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::constants::{ERROR_TITLE, INFO_TITLE};

// ============================================================================
// Traits
// ============================================================================

/// Shows messages to the user.
pub trait Notifier {
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Opens a file in the user's editor without waiting for it to close.
pub trait Editor {
    fn open(&self, path: &Path) -> Result<()>;
}

// ============================================================================
// Dialog Commands
// ============================================================================

/// Kind of notice, which picks the dialog title and icon.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Severity {
    Error,
    Info,
}

impl Severity {
    fn title(self) -> &'static str {
        match self {
            Severity::Error => ERROR_TITLE,
            Severity::Info => INFO_TITLE,
        }
    }
}

/// `zenity` invocation (GNOME and most Linux desktops).
pub fn zenity_command(severity: Severity, message: &str) -> Command {
    let mut cmd = Command::new("zenity");
    cmd.arg(match severity {
        Severity::Error => "--error",
        Severity::Info => "--info",
    })
    .arg("--no-markup")
    .arg("--title")
    .arg(severity.title())
    .arg("--text")
    .arg(message);
    cmd
}

/// `kdialog` invocation (KDE).
pub fn kdialog_command(severity: Severity, message: &str) -> Command {
    let mut cmd = Command::new("kdialog");
    cmd.arg("--title")
        .arg(severity.title())
        .arg(match severity {
            Severity::Error => "--error",
            Severity::Info => "--msgbox",
        })
        .arg(message);
    cmd
}

/// `osascript` invocation (macOS). Text is passed as script arguments so it
/// never needs AppleScript escaping.
pub fn osascript_command(severity: Severity, message: &str) -> Command {
    let icon = match severity {
        Severity::Error => "stop",
        Severity::Info => "note",
    };
    let mut cmd = Command::new("osascript");
    cmd.arg("-e")
        .arg("on run argv")
        .arg("-e")
        .arg(format!(
            "display dialog (item 1 of argv) with title (item 2 of argv) buttons {{\"OK\"}} default button \"OK\" with icon {icon}"
        ))
        .arg("-e")
        .arg("end run")
        .arg(message)
        .arg(severity.title());
    cmd
}

/// PowerShell `MessageBox` invocation (Windows). Text travels through
/// environment variables so it never needs PowerShell quoting.
pub fn powershell_command(severity: Severity, message: &str) -> Command {
    let icon = match severity {
        Severity::Error => "Error",
        Severity::Info => "Information",
    };
    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-NonInteractive", "-Command"])
        .arg(format!(
            "Add-Type -AssemblyName PresentationFramework; [System.Windows.MessageBox]::Show($env:PROXYLAUNCHER_DIALOG_TEXT, $env:PROXYLAUNCHER_DIALOG_TITLE, 'OK', '{icon}') | Out-Null"
        ))
        .env("PROXYLAUNCHER_DIALOG_TEXT", message)
        .env("PROXYLAUNCHER_DIALOG_TITLE", severity.title());
    cmd
}

/// Pick the dialog command for this platform, if a dialog tool is on PATH.
fn dialog_command(severity: Severity, message: &str) -> Option<Command> {
    if cfg!(windows) {
        which::which("powershell")
            .ok()
            .map(|_| powershell_command(severity, message))
    } else if cfg!(target_os = "macos") {
        which::which("osascript")
            .ok()
            .map(|_| osascript_command(severity, message))
    } else if which::which("zenity").is_ok() {
        Some(zenity_command(severity, message))
    } else if which::which("kdialog").is_ok() {
        Some(kdialog_command(severity, message))
    } else {
        None
    }
}

// ============================================================================
// System Implementations
// ============================================================================

/// [`Notifier`] that shows native dialogs, falling back to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogNotifier;

impl DialogNotifier {
    fn show(&self, severity: Severity, message: &str) {
        if let Some(mut cmd) = dialog_command(severity, message) {
            let shown = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match shown {
                Ok(status) if status.success() => return,
                Ok(status) => debug!("dialog tool exited with {}", status),
                Err(e) => debug!("failed to run dialog tool: {}", e),
            }
        }
        eprintln!("[proxylauncher] {}: {}", severity.title(), message);
    }
}

impl Notifier for DialogNotifier {
    fn error(&self, message: &str) {
        error!("{}", message);
        self.show(Severity::Error, message);
    }

    fn info(&self, message: &str) {
        info!("{}", message);
        self.show(Severity::Info, message);
    }
}

/// [`Editor`] that hands the file to the platform's default opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEditor;

impl Editor for SystemEditor {
    fn open(&self, path: &Path) -> Result<()> {
        debug!("opening {} in the default editor", path.display());
        open::that_detached(path).with_context(|| format!("failed to open {}", path.display()))
    }
}

// ============================================================================
// Tests
// ============================================================================
