use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Scancode;

/// Declares the `Key` enum together with its name and scancode lookups.
///
/// Values must be integer literals so they can double as match patterns.
macro_rules! keys {
    ( $( $(#[$meta:meta])* $name:ident = $code:literal, )* ) => {
        /// A macOS virtual key, with the hardware keycode as discriminant.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        #[repr(u16)]
        pub enum Key {
            $( $(#[$meta])* $name = $code, )*
        }

        impl Key {
            /// The enum variant name, e.g. `"Digit1"` or `"Return"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )*
                }
            }

            /// Case-insensitive lookup by variant name.
            pub fn from_name(s: &str) -> Option<Self> {
                $(
                    if s.eq_ignore_ascii_case(stringify!($name)) {
                        return Some(Self::$name);
                    }
                )*
                None
            }

            /// Looks up a `Key` from a hardware virtual keycode.
            pub const fn from_keycode(code: Scancode) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$name), )*
                    _ => None,
                }
            }
        }
    };
}

keys! {
    A = 0x00,
    S = 0x01,
    D = 0x02,
    F = 0x03,
    H = 0x04,
    G = 0x05,
    /// The key left of X on ANSI boards; types "y" on QWERTZ layouts.
    Z = 0x06,
    X = 0x07,
    C = 0x08,
    V = 0x09,
    B = 0x0B,
    Q = 0x0C,
    W = 0x0D,
    E = 0x0E,
    R = 0x0F,
    /// The key right of T on ANSI boards; types "z" on QWERTZ layouts.
    Y = 0x10,
    T = 0x11,
    Digit1 = 0x12,
    Digit2 = 0x13,
    Digit3 = 0x14,
    Digit4 = 0x15,
    Digit6 = 0x16,
    Digit5 = 0x17,
    Equal = 0x18,
    Digit9 = 0x19,
    Digit7 = 0x1A,
    Minus = 0x1B,
    Digit8 = 0x1C,
    Digit0 = 0x1D,
    RightBracket = 0x1E,
    O = 0x1F,
    U = 0x20,
    LeftBracket = 0x21,
    I = 0x22,
    P = 0x23,
    Return = 0x24,
    L = 0x25,
    J = 0x26,
    Quote = 0x27,
    K = 0x28,
    Semicolon = 0x29,
    Backslash = 0x2A,
    Comma = 0x2B,
    Slash = 0x2C,
    N = 0x2D,
    M = 0x2E,
    Period = 0x2F,
    Tab = 0x30,
    Space = 0x31,
    Grave = 0x32,
    Delete = 0x33,
    Escape = 0x35,
    ForwardDelete = 0x75,
    LeftArrow = 0x7B,
    RightArrow = 0x7C,
    DownArrow = 0x7D,
    UpArrow = 0x7E,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_spec())
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_spec(&value).ok_or_else(|| format!("unknown key spec: {value:?}"))
    }
}

impl From<Key> for String {
    fn from(k: Key) -> Self {
        k.to_spec()
    }
}
