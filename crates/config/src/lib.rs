//! Configuration for zyswap: the remap policy file and persisted preferences.
//!
//! Two files live under `~/.zyswap/`:
//! - `config.ron`: which keyboard layouts and applications the remapper acts
//!   on, and which key pair it swaps. Optional; built-in defaults apply when it
//!   is absent.
//! - `prefs.ron`: the user toggles the app writes back (remapping enabled,
//!   start at login, whether the trust prompt was already shown).

use std::{
    env,
    path::{Path, PathBuf},
};

mod defaults;
mod error;
mod loader;
mod prefs;
mod raw;
mod types;

#[cfg(test)]
mod test_parse;

pub use defaults::{DEFAULT_APP_PREFIXES, DEFAULT_APPS, DEFAULT_LAYOUTS, DEFAULT_POLL_INTERVAL_MS};
pub use error::Error;
pub use loader::{load, load_from_str};
pub use prefs::Prefs;
pub use types::Config;

/// Directory holding all zyswap user files (`~/.zyswap`).
pub fn config_dir() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".zyswap");
    p
}

/// Determine the preferred user config path (`~/.zyswap/config.ron`).
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.ron")
}

/// Determine the preferred preferences path (`~/.zyswap/prefs.ron`).
pub fn default_prefs_path() -> PathBuf {
    config_dir().join("prefs.ron")
}

/// Resolve the effective config path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided, whether or not it exists (loading a
///    missing explicit file is an error).
/// 2) Else use `~/.zyswap/config.ron` when it exists.
/// 3) Else `None`: run on built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let preferred = default_config_path();
    preferred.exists().then_some(preferred)
}
