//! Quit keys read from the terminal while the bot plays.
//!
//! The bot itself presses Space and Down in the game window; those never
//! count as quitting even if the terminal has focus and sees them.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use dashbot::StopSignal;
use tracing::{debug, info};

/// How long a single poll blocks before re-checking the stop flag
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Watch the terminal for Esc, q/Q or Ctrl+C and stop `signal` on the first one.
///
/// Ends by itself once `signal` has been stopped by someone else.
pub fn spawn_keyboard_monitor(signal: Arc<StopSignal>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !signal.is_stopped() {
            match next_key() {
                Some(key) if is_quit_key(&key) => {
                    info!("Quit requested ({:?})", key.code);
                    signal.stop();
                }
                Some(key) => debug!("Ignoring key {:?}", key.code),
                None => {}
            }
        }
    })
}

/// The next key press within [`POLL_INTERVAL`], if any
fn next_key() -> Option<KeyEvent> {
    if !event::poll(POLL_INTERVAL).unwrap_or(false) {
        return None;
    }
    match event::read() {
        Ok(Event::Key(key)) => Some(key),
        _ => None,
    }
}

fn is_quit_key(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
