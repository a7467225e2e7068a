//! Persisted user preferences (`prefs.ron`).

use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, loader::ron_options};

/// User toggles that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    /// Master switch for the remapper.
    pub remapping_enabled: bool,
    /// Whether the user asked to start at login.
    pub autostart_enabled: bool,
    /// Whether the native Accessibility prompt has been shown once already.
    pub was_prompted_before: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            remapping_enabled: true,
            autostart_enabled: false,
            was_prompted_before: false,
        }
    }
}

impl Prefs {
    /// Load preferences from `path`.
    ///
    /// Preferences are never fatal: a missing file yields defaults silently,
    /// an unreadable or malformed one yields defaults with a warning.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "prefs_missing_using_defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "prefs_read_failed");
                return Self::default();
            }
        };
        match ron_options().from_str(&text) {
            Ok(p) => p,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "prefs_parse_failed");
                Self::default()
            }
        }
    }

    /// Flip the start-at-login preference, returning the new value.
    pub fn toggle_autostart(&mut self) -> bool {
        self.autostart_enabled = !self.autostart_enabled;
        self.autostart_enabled
    }

    /// Write preferences to `path`, creating the parent directory if needed.
    ///
    /// The file is written next to its destination and renamed into place so
    /// a crash never leaves a truncated file behind.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let write_err = |e: &dyn fmt::Display| Error::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| write_err(&e))?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|e| write_err(&e))?;
        let tmp = tmp_path(path);
        fs::write(&tmp, text).map_err(|e| write_err(&e))?;
        fs::rename(&tmp, path).map_err(|e| write_err(&e))?;
        debug!(path = %path.display(), "prefs_saved");
        Ok(())
    }
}

/// Sibling temp file used for atomic replacement.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
