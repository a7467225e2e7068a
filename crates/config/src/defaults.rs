// Built-in policy data used when the config file is absent or omits a field.

/// Input source IDs of layouts where the Z and Y keys trade places with QWERTY.
pub const DEFAULT_LAYOUTS: &[&str] = &[
    "com.apple.keylayout.ABC-QWERTZ",
    "com.apple.keylayout.Albanian",
    "com.apple.keylayout.Austrian",
    "com.apple.keylayout.Croatian-PC",
    "com.apple.keylayout.Czech",
    "com.apple.keylayout.German",
    "com.apple.keylayout.German-DIN-2137",
    "com.apple.keylayout.Hungarian",
    "com.apple.keylayout.Slovak",
    "com.apple.keylayout.SwissFrench",
    "com.apple.keylayout.SwissGerman",
];

/// Bundle IDs of apps whose Redo is Cmd+Y instead of Cmd+Shift+Z.
pub const DEFAULT_APPS: &[&str] = &[
    "com.microsoft.Word",
    "com.microsoft.Excel",
    "com.microsoft.PowerPoint",
    "com.microsoft.Outlook",
    "com.microsoft.onenote.mac",
    "org.libreoffice.script",
    "de.akademische.sse30",
    "de.akademische.steuertippscenter30",
];

/// Bundle ID prefixes matched like [`DEFAULT_APPS`]. GIMP ships versioned ids.
pub const DEFAULT_APP_PREFIXES: &[&str] = &["org.gimp.gimp"];

/// Interval between Accessibility trust checks while waiting for a grant.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Bounds accepted for `poll_interval_ms`.
pub(crate) const POLL_INTERVAL_RANGE_MS: (u64, u64) = (100, 60_000);

/// Turn a static list into owned strings.
pub(crate) fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}
