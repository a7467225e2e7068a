//! mac-keycode: Virtual keycodes and specs for macOS.
//!
//! - `Key`: Enum of the positional macOS virtual keycodes we care about
//!   (letters, digits, punctuation and a handful of named keys).
//! - `Modifiers`: Bitset over the primary `CGEventFlags` modifier bits.
//! - `Chord`: A modifier set plus a key, with spec parsing and display.
//!
//! Keycodes are the `kVK_*` values from `HIToolbox/Events.h`. They identify a
//! physical key position, not a character: on a German layout the key that
//! types "z" reports `Key::Y`.

mod key;
pub use key::Key;

mod spec;

mod modifiers;
pub use modifiers::Modifiers;

mod chord;
pub use chord::Chord;

mod scancode;
pub use scancode::Scancode;
