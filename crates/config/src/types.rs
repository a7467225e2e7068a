use std::time::Duration;

use mac_keycode::Key;

use crate::{
    Error,
    defaults::{
        DEFAULT_APP_PREFIXES, DEFAULT_APPS, DEFAULT_LAYOUTS, DEFAULT_POLL_INTERVAL_MS,
        POLL_INTERVAL_RANGE_MS, owned,
    },
    raw::{RawConfig, merge_unique},
};

/// Fully resolved remap configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Keyboard layout IDs on which Z and Y are swapped.
    pub layouts: Vec<String>,
    /// Exact bundle IDs of legacy-shortcut applications.
    pub apps: Vec<String>,
    /// Bundle ID prefixes of legacy-shortcut applications.
    pub app_prefixes: Vec<String>,
    /// The key pair exchanged on allowed layouts. The first key is the one the
    /// platform's native redo chord uses (Z), the second the legacy redo key.
    pub swap: (Key, Key),
    /// Whether key-up events are rewritten as well as key-downs.
    pub include_key_up: bool,
    /// Interval between Accessibility trust checks while waiting for a grant.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layouts: owned(DEFAULT_LAYOUTS),
            apps: owned(DEFAULT_APPS),
            app_prefixes: owned(DEFAULT_APP_PREFIXES),
            swap: (Key::Z, Key::Y),
            include_key_up: false,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl Config {
    /// Apply defaults to a raw config and validate the result.
    pub(crate) fn from_raw(raw: RawConfig) -> Result<Self, Error> {
        let d = Self::default();
        let cfg = Self {
            layouts: merge_unique(raw.layouts.unwrap_or(d.layouts), raw.extra_layouts),
            apps: merge_unique(raw.apps.unwrap_or(d.apps), raw.extra_apps),
            app_prefixes: merge_unique(
                raw.app_prefixes.unwrap_or(d.app_prefixes),
                raw.extra_app_prefixes,
            ),
            swap: raw.swap.unwrap_or(d.swap),
            include_key_up: raw.include_key_up.unwrap_or(d.include_key_up),
            poll_interval: raw
                .poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(d.poll_interval),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check invariants that serde cannot express.
    fn validate(&self) -> Result<(), Error> {
        let invalid = |message: String| Error::Validation {
            path: None,
            message,
        };
        if self.swap.0 == self.swap.1 {
            return Err(invalid(format!(
                "swap keys must differ (both are {:?})",
                self.swap.0.to_spec()
            )));
        }
        let (lo, hi) = POLL_INTERVAL_RANGE_MS;
        let ms = self.poll_interval.as_millis();
        if ms < u128::from(lo) || ms > u128::from(hi) {
            return Err(invalid(format!(
                "poll_interval_ms must be between {lo} and {hi}, got {ms}"
            )));
        }
        for (field, list) in [
            ("layouts", &self.layouts),
            ("apps", &self.apps),
            ("app_prefixes", &self.app_prefixes),
        ] {
            if list.iter().any(|s| s.trim().is_empty()) {
                return Err(invalid(format!("{field} must not contain empty ids")));
            }
        }
        Ok(())
    }

    /// Render the resolved config as RON, in the same schema the loader reads.
    pub fn to_ron(&self) -> Result<String, Error> {
        let raw = RawConfig {
            layouts: Some(self.layouts.clone()),
            apps: Some(self.apps.clone()),
            app_prefixes: Some(self.app_prefixes.clone()),
            swap: Some(self.swap),
            include_key_up: Some(self.include_key_up),
            poll_interval_ms: Some(
                u64::try_from(self.poll_interval.as_millis()).unwrap_or(u64::MAX),
            ),
            ..RawConfig::default()
        };
        let pretty = ron::ser::PrettyConfig::new()
            .extensions(ron::extensions::Extensions::IMPLICIT_SOME);
        ron::ser::to_string_pretty(&raw, pretty).map_err(|e| Error::Parse {
            path: None,
            message: e.to_string(),
        })
    }
}
