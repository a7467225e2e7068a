use crate::Key;

// Central mapping between enum variants and spec strings for shorthand/non-name specs.
macro_rules! key_spec_map {
    ($m:ident, $arg:tt) => {
        $m! { $arg,
            Digit0 => "0",
            Digit1 => "1",
            Digit2 => "2",
            Digit3 => "3",
            Digit4 => "4",
            Digit5 => "5",
            Digit6 => "6",
            Digit7 => "7",
            Digit8 => "8",
            Digit9 => "9",
            Space => " ",
            Minus => "-",
            Equal => "=",
            LeftBracket => "[",
            RightBracket => "]",
            Backslash => "\\",
            Semicolon => ";",
            Quote => "'",
            Comma => ",",
            Period => ".",
            Slash => "/",
            Grave => "`",
        }
    };
}

macro_rules! to_spec_match {
    ( $key:expr, $( $k:ident => $s:expr, )* ) => {
        match $key {
            $( Key::$k => $s, )*
            _ => $key.name(),
        }
    }
}

macro_rules! from_spec_match {
    ( $s:expr, $( $k:ident => $v:expr, )* ) => {{
        match $s {
            $( $v => Some(Key::$k), )*
            _ => None,
        }
    }}
}

// Aliases that only apply to parsing specs (not emitted by to_spec).
macro_rules! key_spec_aliases {
    ($m:ident, $arg:expr) => {
        $m! { $arg,
            Return => "enter",
            Return => "ret",
            Comma => "comma",
            Period => "period",
            Slash => "slash",
            Minus => "minus",
            Equal => "equal",
            Semicolon => "semicolon",
            Quote => "quote",
            Grave => "grave",
            ForwardDelete => "del",
            Delete => "backspace",
            Escape => "esc",
            Space => "space",
            LeftArrow => "left",
            RightArrow => "right",
            UpArrow => "up",
            DownArrow => "down",
        }
    };
}

/// Parses a key specification into a `Key`.
///
/// Tries a case-insensitive variant name first, then the symbol shorthands in
/// `key_spec_map`, then the lowercase alias words.
pub fn from_spec(s: &str) -> Option<Key> {
    if let Some(k) = Key::from_name(s) {
        return Some(k);
    }
    if let some @ Some(_) = key_spec_map!(from_spec_match, s) {
        return some;
    }
    let lowered = s.to_ascii_lowercase();
    key_spec_aliases!(from_spec_match, lowered.as_str())
}

/// Returns the key specification string for a `Key`.
pub fn to_spec(key: Key) -> String {
    let s = key_spec_map!(to_spec_match, key);
    s.to_ascii_lowercase()
}

impl Key {
    /// Parses a key specification string into a `Key`.
    ///
    /// Accepts variant names (case-insensitive), symbol shorthands for digits
    /// and punctuation, and alias words such as `esc`, `enter` or `left`.
    pub fn from_spec(s: &str) -> Option<Self> {
        from_spec(s)
    }

    /// Returns the key specification string for this `Key`.
    ///
    /// Digits, punctuation and space use their symbol; everything else is the
    /// lowercased variant name.
    pub fn to_spec(self) -> String {
        to_spec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roundtrip(k: Key) {
        let spec = to_spec(k);
        assert_eq!(
            from_spec(&spec),
            Some(k),
            "roundtrip failed for {} -> {}",
            k.name(),
            spec
        );
    }

    #[test]
    fn every_key_roundtrips() {
        for k in (0..=0x7Fu16).filter_map(Key::from_keycode) {
            assert_roundtrip(k);
        }
    }

    #[test]
    fn letters_are_lowercase_names() {
        assert_eq!(to_spec(Key::Z), "z");
        assert_eq!(from_spec("Z"), Some(Key::Z));
        assert_eq!(from_spec("y"), Some(Key::Y));
    }

    #[test]
    fn shorthands_and_aliases() {
        assert_eq!(from_spec("1"), Some(Key::Digit1));
        assert_eq!(from_spec(","), Some(Key::Comma));
        assert_eq!(from_spec("comma"), Some(Key::Comma));
        assert_eq!(from_spec("ENTER"), Some(Key::Return));
        assert_eq!(from_spec("esc"), Some(Key::Escape));
        assert_eq!(from_spec(" "), Some(Key::Space));
        assert_eq!(from_spec("cmd"), None);
    }
}
