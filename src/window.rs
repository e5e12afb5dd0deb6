//! Window-visibility strategies for the spawned target.
//!
//! Only Windows has a notion of hiding a child's windows. Console targets are
//! kept windowless with a creation flag before spawn; GUI targets get their
//! top-level windows hidden with `SW_HIDE` after spawn. The strategy is chosen
//! once in [`platform_window_visibility`] so the rest of the launcher never
//! branches on the platform.

use std::process::{Child, Command};

/// Applies the hide-window hint around the target's spawn.
pub trait WindowVisibility {
    /// Short identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Adjust the command before it is spawned.
    fn prepare(&self, _command: &mut Command, _hidden: bool) {}

    /// Apply the hint to the running child.
    fn apply_window_visibility(&self, child: &Child, hidden: bool);
}

/// `CREATE_NO_WINDOW` from the Win32 process creation flags.
pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;

// ============================================================================
// Windows Strategy
// ============================================================================

/// Hides the target on Windows: no console window, and `SW_HIDE` on every
/// top-level window the child shows during the watch period.
#[derive(Debug, Default, Clone, Copy)]
pub struct HideTargetWindows;

impl WindowVisibility for HideTargetWindows {
    fn name(&self) -> &'static str {
        "hide-target-windows"
    }

    #[cfg_attr(not(windows), allow(unused_variables))]
    fn prepare(&self, command: &mut Command, hidden: bool) {
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            if hidden {
                command.creation_flags(CREATE_NO_WINDOW);
            }
        }
    }

    #[cfg_attr(not(windows), allow(unused_variables))]
    fn apply_window_visibility(&self, child: &Child, hidden: bool) {
        #[cfg(windows)]
        {
            if hidden {
                win32::watch_and_hide(child.id());
            }
        }
    }
}

#[cfg(windows)]
mod win32 {
    use log::{debug, warn};
    use std::thread;
    use std::time::Instant;
    use winapi::shared::minwindef::{BOOL, DWORD, LPARAM, TRUE};
    use winapi::shared::windef::HWND;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{GetExitCodeProcess, OpenProcess};
    use winapi::um::winnt::PROCESS_QUERY_LIMITED_INFORMATION;
    use winapi::um::winuser::{
        EnumWindows, GetWindowThreadProcessId, IsWindowVisible, ShowWindow, SW_HIDE,
    };

    use crate::constants::{millis_to_duration, HIDE_POLL_MS, HIDE_WATCH_MS};

    const STILL_ACTIVE: DWORD = 259;

    /// EnumWindows callback: hide visible windows owned by the pid in `lparam`.
    unsafe extern "system" fn hide_if_owned(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let target_pid = lparam as DWORD;
        let mut owner: DWORD = 0;
        GetWindowThreadProcessId(hwnd, &mut owner);
        if owner == target_pid && IsWindowVisible(hwnd) != 0 {
            ShowWindow(hwnd, SW_HIDE);
        }
        TRUE
    }

    fn hide_windows_of(pid: u32) {
        // SAFETY: the callback only reads window ownership and hides windows;
        // the pid travels by value through lparam.
        unsafe {
            EnumWindows(Some(hide_if_owned), pid as LPARAM);
        }
    }

    fn is_running(pid: u32) -> bool {
        // SAFETY: handle is checked for null and closed before returning.
        unsafe {
            let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
            if handle.is_null() {
                return false;
            }
            let mut exit_code: DWORD = 0;
            let ok = GetExitCodeProcess(handle, &mut exit_code);
            CloseHandle(handle);
            ok != 0 && exit_code == STILL_ACTIVE
        }
    }

    /// Sweep the child's windows until it exits or the watch period ends.
    pub fn watch_and_hide(pid: u32) {
        let spawned = thread::Builder::new()
            .name("hide-target-windows".into())
            .spawn(move || {
                let start = Instant::now();
                while start.elapsed() < millis_to_duration(HIDE_WATCH_MS) && is_running(pid) {
                    hide_windows_of(pid);
                    thread::sleep(millis_to_duration(HIDE_POLL_MS));
                }
                debug!("stopped watching windows of pid {}", pid);
            });
        if let Err(e) = spawned {
            warn!("failed to start window watcher for pid {}: {}", pid, e);
        }
    }
}

// ============================================================================
// No-op Strategy
// ============================================================================

/// For platforms without a window concept: ignores the hint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWindowConcept;

impl WindowVisibility for NoWindowConcept {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply_window_visibility(&self, _child: &Child, _hidden: bool) {}
}

/// Pick the strategy for the platform this binary was built for.
pub fn platform_window_visibility() -> Box<dyn WindowVisibility> {
    if cfg!(windows) {
        Box::new(HideTargetWindows)
    } else {
        Box::new(NoWindowConcept)
    }
}
