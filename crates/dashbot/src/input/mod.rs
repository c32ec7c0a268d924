//! Input injection into the game.

mod keyboard;
pub mod window;

pub use keyboard::{Key, KeyboardInjector};

/// Fire-and-forget game input.
///
/// Each call is a short press-hold-release pulse. Failures are the
/// implementation's to log; nothing is reported back to the caller.
pub trait InputInjector {
    fn press_jump(&self);

    /// Down arrow, for ship and UFO sections
    fn press_down(&self);
}

impl<T: InputInjector + ?Sized> InputInjector for &T {
    fn press_jump(&self) {
        (**self).press_jump();
    }

    fn press_down(&self) {
        (**self).press_down();
    }
}
