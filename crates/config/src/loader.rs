//! Parse and load the remap policy file.

use std::{fs, path::Path};

use ron::{Options, extensions::Extensions};
use tracing::debug;

use crate::{Config, Error, raw::RawConfig, resolve_config_path};

/// RON options shared by every reader in this crate: optional fields may be
/// written without a `Some(..)` wrapper.
pub(crate) fn ron_options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Parse a config from RON text. `path` is attached to any error.
pub fn load_from_str(text: &str, path: Option<&Path>) -> Result<Config, Error> {
    let raw: RawConfig = ron_options().from_str(text).map_err(|e| Error::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
    })?;
    Config::from_raw(raw).map_err(|e| match path {
        Some(p) => e.with_path(p),
        None => e,
    })
}

/// Load a fully resolved `Config` from the RON file at `path`.
fn load_from_path(path: &Path) -> Result<Config, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    load_from_str(&text, Some(path))
}

/// Resolve the config location and load it, falling back to built-in
/// defaults when no file exists and none was requested explicitly.
pub fn load(explicit: Option<&Path>) -> Result<Config, Error> {
    match resolve_config_path(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "loading_config");
            load_from_path(&path)
        }
        None => {
            debug!("no_config_file_using_defaults");
            Ok(Config::default())
        }
    }
}
