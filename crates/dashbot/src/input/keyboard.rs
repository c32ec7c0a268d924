//! Synthetic key presses.

use std::time::Duration;

use tracing::{trace, warn};

use super::InputInjector;
use crate::config::timing;

/// Keys the bot can press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Down,
}

impl Key {
    /// Windows virtual-key code
    pub const fn virtual_key(self) -> u16 {
        match self {
            Self::Space => 0x20,
            Self::Down => 0x28,
        }
    }
}

/// Sends a press-hold-release pulse to whatever window has focus
#[derive(Debug, Clone, Copy)]
pub struct KeyboardInjector {
    hold: Duration,
}

impl KeyboardInjector {
    pub fn new() -> Self {
        Self::with_hold(timing::KEY_HOLD)
    }

    pub fn with_hold(hold: Duration) -> Self {
        Self { hold }
    }

    fn tap(&self, key: Key) {
        if let Err(e) = send_key(key, true) {
            warn!("Key down for {:?} failed: {}", key, e);
            return;
        }
        std::thread::sleep(self.hold);
        if let Err(e) = send_key(key, false) {
            warn!("Key up for {:?} failed: {}", key, e);
        }
        trace!("Tapped {:?}", key);
    }
}

impl Default for KeyboardInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputInjector for KeyboardInjector {
    fn press_jump(&self) {
        self.tap(Key::Space);
    }

    fn press_down(&self) {
        self.tap(Key::Down);
    }
}

#[cfg(target_os = "windows")]
fn send_key(key: Key, down: bool) -> anyhow::Result<()> {
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT, KEYEVENTF_KEYUP, SendInput,
        VIRTUAL_KEY,
    };

    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(key.virtual_key()),
                wScan: 0,
                dwFlags: if down {
                    KEYBD_EVENT_FLAGS(0)
                } else {
                    KEYEVENTF_KEYUP
                },
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    // SAFETY: SendInput reads exactly one fully initialised INPUT.
    let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if sent != 1 {
        anyhow::bail!("SendInput inserted {} events", sent);
    }
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn send_key(_key: Key, _down: bool) -> anyhow::Result<()> {
    anyhow::bail!("Input injection is only supported on Windows")
}
