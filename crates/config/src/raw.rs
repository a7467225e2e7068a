use mac_keycode::Key;
use serde::{Deserialize, Serialize};

/// Config file contents as written by the user, before defaults are applied.
///
/// `layouts`, `apps` and `app_prefixes` replace the built-in lists; the
/// `extra_*` variants append to whatever list is in effect.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawConfig {
    /// Replacement list of allowed layout IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layouts: Option<Vec<String>>,
    /// Layout IDs appended to the effective list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_layouts: Vec<String>,
    /// Replacement list of legacy-shortcut bundle IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apps: Option<Vec<String>>,
    /// Replacement list of legacy-shortcut bundle ID prefixes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_prefixes: Option<Vec<String>>,
    /// Bundle IDs appended to the effective list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_apps: Vec<String>,
    /// Bundle ID prefixes appended to the effective list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_app_prefixes: Vec<String>,
    /// The swapped key pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap: Option<(Key, Key)>,
    /// Also rewrite key-up events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_key_up: Option<bool>,
    /// Trust poll interval in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
}

/// Append `extra` to `base`, skipping entries already present.
pub(crate) fn merge_unique(mut base: Vec<String>, extra: Vec<String>) -> Vec<String> {
    for item in extra {
        if !base.contains(&item) {
            base.push(item);
        }
    }
    base
}
