use std::fmt;

use crate::{Key, Modifiers, Scancode};

/// A key chord: a set of modifiers plus a single key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Chord {
    /// Modifier keys held down for this chord.
    pub modifiers: Modifiers,
    /// The non-modifier key for this chord.
    pub key: Key,
}

impl Chord {
    /// Build a chord from a raw keycode and raw `CGEventFlags` bits.
    ///
    /// Returns `None` for keycodes this crate does not know.
    pub fn from_event(keycode: Scancode, flags: u64) -> Option<Self> {
        Key::from_scancode(keycode).map(|key| Self {
            modifiers: Modifiers::from_cg_flags(flags),
            key,
        })
    }

    /// Canonical string form: modifiers in canonical order, then the key spec.
    pub fn to_string_canonical(&self) -> String {
        let mut out: Vec<String> = self
            .modifiers
            .to_specs()
            .into_iter()
            .map(str::to_string)
            .collect();
        out.push(self.key.to_spec());
        out.join("+")
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_canonical())
    }
}
