//! The remap decision engine.
//!
//! [`decide`] is a pure function of the event, the environment and the
//! policy. It never touches the live event; it returns an [`Edit`] which the
//! tap applies.

use mac_keycode::{Modifiers, Scancode};

use crate::RemapPolicy;

/// Immutable view of the fields of a key event the engine looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySnapshot {
    /// Physical virtual keycode reported by the OS.
    pub keycode: Scancode,
    /// Raw `CGEventFlags` bits.
    pub flags: u64,
}

impl KeySnapshot {
    /// Create a snapshot from a keycode and raw flag bits.
    pub const fn new(keycode: Scancode, flags: u64) -> Self {
        Self { keycode, flags }
    }

    /// Primary modifiers held in this event.
    pub const fn modifiers(&self) -> Modifiers {
        Modifiers::from_cg_flags(self.flags)
    }
}

/// A rewrite to apply to a live event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edit {
    /// Replacement keycode, if the key changes.
    pub keycode: Option<Scancode>,
    /// Modifier bits to clear from the event flags.
    pub strip: Modifiers,
}

impl Edit {
    /// The edit that leaves an event untouched.
    pub const NONE: Self = Self {
        keycode: None,
        strip: Modifiers::empty(),
    };

    /// Replace the keycode, leaving modifiers alone.
    pub const fn rekey(keycode: Scancode) -> Self {
        Self {
            keycode: Some(keycode),
            strip: Modifiers::empty(),
        }
    }

    /// Whether applying this edit changes nothing.
    pub const fn is_noop(&self) -> bool {
        self.keycode.is_none() && self.strip.is_empty()
    }

    /// The snapshot an event would have after this edit.
    pub const fn apply(&self, snap: KeySnapshot) -> KeySnapshot {
        let keycode = match self.keycode {
            Some(k) => k,
            None => snap.keycode,
        };
        KeySnapshot {
            keycode,
            flags: snap.flags & !self.strip.bits(),
        }
    }
}

/// Decide how to rewrite a key event.
///
/// - Nothing happens unless remapping is enabled, Command is held, and the
///   key is one of the swap pair.
/// - On a layout outside the policy only legacy apps are touched:
///   Command+Shift+Z becomes Command+Y.
/// - On an allowed layout, legacy apps see Command+Shift+Y as Command+Y;
///   every other Command chord has Z and Y exchanged.
pub fn decide(
    snap: KeySnapshot,
    layout: Option<&str>,
    app: Option<&str>,
    enabled: bool,
    policy: &RemapPolicy,
) -> Edit {
    if !enabled {
        return Edit::NONE;
    }
    let mods = snap.modifiers();
    if !mods.contains(Modifiers::COMMAND) {
        return Edit::NONE;
    }
    let Some(partner) = policy.swap_partner(snap.keycode) else {
        return Edit::NONE;
    };
    let legacy = policy.is_legacy_app(app);
    let shift = mods.contains(Modifiers::SHIFT);

    if !policy.allows_layout(layout) {
        if legacy && shift && snap.keycode == policy.primary() {
            return Edit {
                keycode: Some(policy.secondary()),
                strip: Modifiers::SHIFT,
            };
        }
        return Edit::NONE;
    }

    if legacy && shift && snap.keycode == policy.secondary() {
        return Edit {
            keycode: None,
            strip: Modifiers::SHIFT,
        };
    }
    Edit::rekey(partner)
}

#[cfg(test)]
mod tests {
    use mac_keycode::Key;
    use proptest::prelude::*;

    use super::*;

    const GERMAN: Option<&str> = Some("com.apple.keylayout.German");
    const US: Option<&str> = Some("com.apple.keylayout.US");
    const WORD: Option<&str> = Some("com.microsoft.Word");
    const NOTES: Option<&str> = Some("com.apple.Notes");

    const CMD: u64 = Modifiers::COMMAND.bits();
    const SHIFT: u64 = Modifiers::SHIFT.bits();
    const Z: Scancode = Key::Z.scancode();
    const Y: Scancode = Key::Y.scancode();

    fn run(code: Scancode, flags: u64, layout: Option<&str>, app: Option<&str>) -> Edit {
        decide(
            KeySnapshot::new(code, flags),
            layout,
            app,
            true,
            &RemapPolicy::default(),
        )
    }

    #[test]
    fn allowed_layout_swaps_command_z_and_y() {
        assert_eq!(run(Z, CMD, GERMAN, NOTES), Edit::rekey(Y));
        assert_eq!(run(Y, CMD, GERMAN, NOTES), Edit::rekey(Z));
        // Shift is carried through for ordinary apps.
        let e = run(Z, CMD | SHIFT, GERMAN, NOTES);
        assert_eq!(e, Edit::rekey(Y));
        assert_eq!(
            e.apply(KeySnapshot::new(Z, CMD | SHIFT)),
            KeySnapshot::new(Y, CMD | SHIFT)
        );
    }

    #[test]
    fn allowed_layout_legacy_app_shift_y_drops_shift() {
        let e = run(Y, CMD | SHIFT, GERMAN, WORD);
        assert_eq!(e.keycode, None);
        assert_eq!(e.strip, Modifiers::SHIFT);
        assert_eq!(
            e.apply(KeySnapshot::new(Y, CMD | SHIFT)),
            KeySnapshot::new(Y, CMD)
        );
        // Plain Command+Z in a legacy app still swaps.
        assert_eq!(run(Z, CMD, GERMAN, WORD), Edit::rekey(Y));
    }

    #[test]
    fn other_layout_legacy_app_shift_z_becomes_command_y() {
        let e = run(Z, CMD | SHIFT, US, WORD);
        assert_eq!(
            e.apply(KeySnapshot::new(Z, CMD | SHIFT)),
            KeySnapshot::new(Y, CMD)
        );
        // Prefix match counts as legacy.
        let e = run(Z, CMD | SHIFT, US, Some("org.gimp.gimp-3.0"));
        assert_eq!(e.keycode, Some(Y));
    }

    #[test]
    fn other_layout_leaves_everything_else() {
        assert!(run(Z, CMD, US, WORD).is_noop());
        assert!(run(Y, CMD | SHIFT, US, WORD).is_noop());
        assert!(run(Z, CMD | SHIFT, US, NOTES).is_noop());
        assert!(run(Z, CMD, None, NOTES).is_noop());
        assert!(run(Y, CMD, US, None).is_noop());
    }

    #[test]
    fn unknown_app_is_not_legacy() {
        assert_eq!(run(Y, CMD | SHIFT, GERMAN, None), Edit::rekey(Z));
    }

    #[test]
    fn extra_flag_bits_are_preserved() {
        // Device-dependent and non-coalesced bits survive a shift strip.
        let flags = CMD | SHIFT | 0x2 | 0x100;
        let e = run(Y, flags, GERMAN, WORD);
        assert_eq!(e.apply(KeySnapshot::new(Y, flags)).flags, CMD | 0x2 | 0x100);
    }

    #[test]
    fn swap_twice_reverts() {
        let p = RemapPolicy::default();
        let s = KeySnapshot::new(Z, CMD);
        let once = decide(s, GERMAN, NOTES, true, &p).apply(s);
        let twice = decide(once, GERMAN, NOTES, true, &p).apply(once);
        assert_eq!(twice, s);
    }

    #[test]
    fn stripping_absent_shift_is_noop() {
        let e = Edit {
            keycode: None,
            strip: Modifiers::SHIFT,
        };
        let s = KeySnapshot::new(Y, CMD);
        assert_eq!(e.apply(s), s);
    }

    fn any_layout() -> impl Strategy<Value = Option<&'static str>> {
        prop_oneof![Just(None), Just(US), Just(GERMAN)]
    }

    fn any_app() -> impl Strategy<Value = Option<&'static str>> {
        prop_oneof![Just(None), Just(NOTES), Just(WORD)]
    }

    proptest! {
        #[test]
        fn non_command_or_other_keys_pass(
            code in any::<u16>(),
            flags in any::<u64>(),
            layout in any_layout(),
            app in any_app(),
            enabled in any::<bool>(),
        ) {
            let p = RemapPolicy::default();
            let no_cmd = flags & !CMD;
            prop_assert!(decide(KeySnapshot::new(code, no_cmd), layout, app, enabled, &p).is_noop());
            if code != Z && code != Y {
                prop_assert!(decide(KeySnapshot::new(code, flags), layout, app, enabled, &p).is_noop());
            }
        }

        #[test]
        fn disabled_never_edits(
            code in any::<u16>(),
            flags in any::<u64>(),
            layout in any_layout(),
            app in any_app(),
        ) {
            let p = RemapPolicy::default();
            prop_assert!(decide(KeySnapshot::new(code, flags), layout, app, false, &p).is_noop());
        }

        #[test]
        fn edits_only_touch_swap_keys_and_shift(
            code in prop_oneof![Just(Z), Just(Y)],
            flags in any::<u64>(),
            layout in any_layout(),
            app in any_app(),
        ) {
            let p = RemapPolicy::default();
            let s = KeySnapshot::new(code, flags);
            let e = decide(s, layout, app, true, &p);
            let out = e.apply(s);
            prop_assert!(out.keycode == Z || out.keycode == Y);
            prop_assert_eq!(out.flags | SHIFT, flags | SHIFT);
        }

        #[test]
        fn other_layout_plain_app_never_edits(
            code in prop_oneof![Just(Z), Just(Y)],
            flags in any::<u64>(),
            layout in prop_oneof![Just(None), Just(US)],
            app in prop_oneof![Just(None), Just(NOTES)],
        ) {
            let p = RemapPolicy::default();
            let s = KeySnapshot::new(code, flags | CMD);
            let e = decide(s, layout, app, true, &p);
            prop_assert!(e.is_noop());
            prop_assert_eq!(e.apply(s), s);
        }
    }
}
