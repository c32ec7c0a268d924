//! Game window focus.
//!
//! `SendInput` delivers to whatever window is in front, so the game window
//! has to be there before the first tick.

use tracing::{debug, warn};

/// Top-level window belonging to the game process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameWindow {
    #[cfg(target_os = "windows")]
    hwnd: windows::Win32::Foundation::HWND,
    pid: u32,
}

#[cfg(target_os = "windows")]
mod platform {
    use std::cell::Cell;

    use windows::Win32::Foundation::{BOOL, HWND, LPARAM};
    use windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetForegroundWindow, GetWindowThreadProcessId, IsWindowVisible,
        SetForegroundWindow,
    };

    thread_local! {
        static MATCH: Cell<Option<HWND>> = const { Cell::new(None) };
    }

    unsafe extern "system" fn visit(hwnd: HWND, lparam: LPARAM) -> BOOL {
        // SAFETY: lparam carries a pointer to the pid owned by `visible_window_of`.
        let wanted = unsafe { *(lparam.0 as *const u32) };
        let mut owner = 0u32;
        // SAFETY: hwnd comes straight from EnumWindows.
        let visible = unsafe {
            GetWindowThreadProcessId(hwnd, Some(&mut owner));
            IsWindowVisible(hwnd).as_bool()
        };

        if owner == wanted && visible {
            MATCH.with(|m| m.set(Some(hwnd)));
            // Stop enumerating
            return BOOL(0);
        }
        BOOL(1)
    }

    pub fn visible_window_of(pid: u32) -> Option<HWND> {
        MATCH.with(|m| m.set(None));
        // SAFETY: EnumWindows is synchronous, so `pid` outlives every callback.
        // An early stop is reported as an error and is ignored.
        let _ = unsafe { EnumWindows(Some(visit), LPARAM(&pid as *const u32 as isize)) };
        MATCH.with(|m| m.take())
    }

    pub fn foreground() -> HWND {
        // SAFETY: no preconditions.
        unsafe { GetForegroundWindow() }
    }

    pub fn bring_to_front(hwnd: HWND) -> bool {
        // SAFETY: any HWND is accepted; failure is reported through BOOL.
        unsafe { SetForegroundWindow(hwnd) }.as_bool()
    }
}

#[cfg(target_os = "windows")]
impl GameWindow {
    /// First visible top-level window owned by `pid`
    pub fn find(pid: u32) -> Option<Self> {
        platform::visible_window_of(pid).map(|hwnd| Self { hwnd, pid })
    }

    pub fn is_foreground(&self) -> bool {
        platform::foreground() == self.hwnd
    }

    /// Ask the shell to bring this window to the front
    pub fn raise(&self) -> bool {
        platform::bring_to_front(self.hwnd)
    }
}

#[cfg(not(target_os = "windows"))]
impl GameWindow {
    pub fn find(pid: u32) -> Option<Self> {
        debug!("No window lookup on this platform (PID {})", pid);
        None
    }

    pub fn is_foreground(&self) -> bool {
        false
    }

    pub fn raise(&self) -> bool {
        false
    }
}

impl GameWindow {
    pub fn pid(&self) -> u32 {
        self.pid
    }
}

/// Best-effort: put the game window of `pid` in front so key presses reach it.
///
/// Returns whether it ended up in the foreground.
pub fn focus_game_window(pid: u32) -> bool {
    let Some(window) = GameWindow::find(pid) else {
        warn!("No visible game window for PID {}", pid);
        return false;
    };

    if window.is_foreground() {
        debug!("Game window already in front");
        return true;
    }
    if !window.raise() {
        warn!("Foreground request for PID {} was refused", window.pid());
    }
    window.is_foreground()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_focus_unsupported_platform() {
        assert!(GameWindow::find(1234).is_none());
        assert!(!focus_game_window(1234));
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_unknown_pid_has_no_window() {
        // PID 0 is the idle process and owns no windows
        assert!(GameWindow::find(0).is_none());
        assert!(!focus_game_window(0));
    }
}
