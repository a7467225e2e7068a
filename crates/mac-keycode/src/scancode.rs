//! Scancodes (macOS hardware virtual keycodes) and conversions.
//!
//! A "scancode" in this crate refers to the macOS hardware virtual keycode:
//! - The integer reported by `NSEvent.keyCode` and by CoreGraphics in the
//!   `kCGKeyboardEventKeycode` field.
//! - The set of constants prefixed `kVK_` in the SDK header
//!   `HIToolbox/Events.h`.
//! - A layout-independent, positional identifier for a physical key. It does
//!   not represent a character.

use crate::Key;

/// macOS hardware virtual keycode (`kVK_*`, `NSEvent.keyCode`).
pub type Scancode = u16;

impl TryFrom<Scancode> for Key {
    type Error = ();
    fn try_from(value: Scancode) -> Result<Self, Self::Error> {
        Self::from_scancode(value).ok_or(())
    }
}

impl From<Key> for Scancode {
    fn from(k: Key) -> Self {
        k as Self
    }
}

impl Key {
    /// Looks up a `Key` from a macOS scancode (hardware virtual keycode).
    pub const fn from_scancode(sc: Scancode) -> Option<Self> {
        Self::from_keycode(sc)
    }

    /// Returns the scancode (`kVK_*`) for this key.
    pub const fn scancode(self) -> Scancode {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_samples() {
        for k in [Key::A, Key::Z, Key::Y, Key::Digit1, Key::Space, Key::Return] {
            let sc = k.scancode();
            assert_eq!(Key::from_scancode(sc), Some(k));
            assert_eq!(Key::try_from(sc).ok(), Some(k));
            assert_eq!(Scancode::from(k), sc);
        }
        // 0x0A is the ISO section key, which we do not model.
        assert_eq!(Key::from_scancode(0x0A), None);
        assert_eq!(Key::from_scancode(0xFFFF), None);
    }
}
