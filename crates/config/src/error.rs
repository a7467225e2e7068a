//! Error types for configuration loading, validation and preference writes.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone)]
/// Errors produced while loading, parsing, validating or saving configuration.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or schema error. The message carries the line and column.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// The file parsed but a value is out of range or inconsistent.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// Failed to persist a file.
    Write {
        /// Destination path.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including the path when available.
    pub fn pretty(&self) -> String {
        let (kind, path, message) = match self {
            Self::Read { path, message } => ("Read error", path.as_deref(), message),
            Self::Parse { path, message } => ("Config parse error", path.as_deref(), message),
            Self::Validation { path, message } => {
                ("Config validation error", path.as_deref(), message)
            }
            Self::Write { path, message } => ("Write error", Some(path.as_path()), message),
        };
        match path {
            Some(p) => format!("{} at {}: {}", kind, p.display(), message),
            None => format!("{}: {}", kind, message),
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
            Self::Write { path, .. } => Some(path),
        }
    }

    /// Attach `path` to an error produced without one.
    pub(crate) fn with_path(self, p: &Path) -> Self {
        let p = Some(p.to_path_buf());
        match self {
            Self::Read { message, .. } => Self::Read { path: p, message },
            Self::Parse { message, .. } => Self::Parse { path: p, message },
            Self::Validation { message, .. } => Self::Validation { path: p, message },
            w @ Self::Write { .. } => w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_includes_path() {
        let e = Error::Validation {
            path: Some(PathBuf::from("/tmp/c.ron")),
            message: "bad".into(),
        };
        assert_eq!(e.pretty(), "Config validation error at /tmp/c.ron: bad");
        let e = Error::Parse {
            path: None,
            message: "1:2: oops".into(),
        };
        assert_eq!(e.pretty(), "Config parse error: 1:2: oops");
        assert_eq!(e.with_path(Path::new("x.ron")).path(), Some(Path::new("x.ron")));
    }
}
