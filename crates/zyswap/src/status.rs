//! Text shown on the status item.
//!
//! Kept free of UI types so it builds and tests everywhere.

use logging::fmt::RenderedLog;

/// Snapshot of the app state relevant to the status item.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Remapping switch.
    pub enabled: bool,
    /// Whether the event tap is installed.
    pub running: bool,
    /// Whether we are still waiting for Accessibility trust.
    pub waiting_for_permission: bool,
}

/// Status item title.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub fn title(enabled: bool) -> &'static str {
    if enabled { "⌘Z" } else { "⌘Z (off)" }
}

/// Status item tooltip: one line of state, plus the latest warning if any.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub fn tooltip(status: Status, notice: Option<&RenderedLog>) -> String {
    let state = if status.waiting_for_permission {
        "zyswap: waiting for Accessibility permission"
    } else if !status.running {
        "zyswap: event tap not running"
    } else if status.enabled {
        "zyswap: swapping Z and Y"
    } else {
        "zyswap: paused"
    };
    match notice {
        Some(n) => format!("{state}\n{}: {}", n.level, n.message),
        None => state.to_string(),
    }
}
