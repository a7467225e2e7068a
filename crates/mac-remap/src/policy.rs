//! The remap ruleset: which layouts and applications the remapper acts on.

use std::collections::HashSet;

use config::Config;
use mac_keycode::Scancode;

/// Resolved remap rules, indexed for per-keystroke lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapPolicy {
    /// Keyboard layout IDs on which the swap applies.
    layouts: HashSet<String>,
    /// Exact bundle IDs of legacy-shortcut applications.
    apps: HashSet<String>,
    /// Bundle ID prefixes of legacy-shortcut applications.
    app_prefixes: Vec<String>,
    /// Keycode of the native redo key (Z by default).
    primary: Scancode,
    /// Keycode of the legacy redo key (Y by default).
    secondary: Scancode,
    /// Whether key-up events are routed through the engine.
    include_key_up: bool,
}

impl RemapPolicy {
    /// Build a policy from a resolved configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            layouts: cfg.layouts.iter().cloned().collect(),
            apps: cfg.apps.iter().cloned().collect(),
            app_prefixes: cfg.app_prefixes.clone(),
            primary: cfg.swap.0.scancode(),
            secondary: cfg.swap.1.scancode(),
            include_key_up: cfg.include_key_up,
        }
    }

    /// Whether the given layout ID is one the swap applies to. An unknown
    /// layout is never allowed.
    pub fn allows_layout(&self, layout: Option<&str>) -> bool {
        layout.is_some_and(|l| self.layouts.contains(l))
    }

    /// Whether the given bundle ID names a legacy-shortcut application.
    pub fn is_legacy_app(&self, app: Option<&str>) -> bool {
        let Some(app) = app else { return false };
        self.apps.contains(app) || self.app_prefixes.iter().any(|p| app.starts_with(p.as_str()))
    }

    /// Keycode of the native redo key.
    pub const fn primary(&self) -> Scancode {
        self.primary
    }

    /// Keycode of the legacy redo key.
    pub const fn secondary(&self) -> Scancode {
        self.secondary
    }

    /// The other half of the swap pair, if `code` is one of them.
    pub const fn swap_partner(&self, code: Scancode) -> Option<Scancode> {
        if code == self.primary {
            Some(self.secondary)
        } else if code == self.secondary {
            Some(self.primary)
        } else {
            None
        }
    }

    /// Whether key-up events should be rewritten too.
    pub const fn include_key_up(&self) -> bool {
        self.include_key_up
    }
}

impl Default for RemapPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
