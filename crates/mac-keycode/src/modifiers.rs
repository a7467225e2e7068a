use bitflags::bitflags;

bitflags! {
    /// Modifier keys, using the bit positions of macOS `CGEventFlags`.
    ///
    /// Only the primary device-independent bits are modelled:
    /// - Shift (1 << 17)
    /// - Control (1 << 18)
    /// - Option/Alternate (1 << 19)
    /// - Command (1 << 20)
    ///
    /// Because the bits line up with `CGEventFlags`, a set can be masked
    /// directly against raw event flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u64 {
        /// Either shift key.
        const SHIFT = 1 << 17;
        /// Either control key.
        const CONTROL = 1 << 18;
        /// Either option key.
        const OPTION = 1 << 19;
        /// Either command key.
        const COMMAND = 1 << 20;
    }
}

impl Modifiers {
    /// Canonical display order: Command, Option, Control, Shift.
    const ORDER: [(Self, &'static str); 4] = [
        (Self::COMMAND, "cmd"),
        (Self::OPTION, "opt"),
        (Self::CONTROL, "ctrl"),
        (Self::SHIFT, "shift"),
    ];

    /// Construct a modifier set from raw `CGEventFlags` bits, ignoring all
    /// other bits (device-dependent side bits, caps lock, numeric pad, ...).
    pub const fn from_cg_flags(flags: u64) -> Self {
        Self::from_bits_truncate(flags)
    }

    /// Spec words for each modifier in this set, in canonical order.
    pub fn to_specs(self) -> Vec<&'static str> {
        Self::ORDER
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, s)| *s)
            .collect()
    }
}
