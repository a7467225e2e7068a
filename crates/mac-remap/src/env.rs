//! Environment probes: the active keyboard layout and the frontmost app.

/// Read-only queries about the session the tap runs in.
///
/// Implementations are called from the tap callback, on the main thread,
/// only for events that could be remapped. They must be cheap and must not
/// cache: layouts and focus change between keystrokes.
pub trait Environment: Send + Sync {
    /// Input source ID of the active keyboard layout, e.g.
    /// `com.apple.keylayout.German`.
    fn keyboard_layout(&self) -> Option<String>;

    /// Bundle identifier of the frontmost application.
    fn frontmost_app(&self) -> Option<String>;
}

/// An environment that reports fixed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedEnv {
    /// Reported keyboard layout.
    pub layout: Option<String>,
    /// Reported frontmost application.
    pub app: Option<String>,
}

impl FixedEnv {
    /// Create an environment reporting `layout` and `app`.
    pub fn new(layout: Option<&str>, app: Option<&str>) -> Self {
        Self {
            layout: layout.map(str::to_owned),
            app: app.map(str::to_owned),
        }
    }
}

impl Environment for FixedEnv {
    fn keyboard_layout(&self) -> Option<String> {
        self.layout.clone()
    }

    fn frontmost_app(&self) -> Option<String> {
        self.app.clone()
    }
}

/// The live session environment (Text Input Sources and `NSWorkspace`).
#[cfg(target_os = "macos")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

#[cfg(target_os = "macos")]
impl Environment for SystemEnv {
    fn keyboard_layout(&self) -> Option<String> {
        crate::sys::current_layout_id()
    }

    fn frontmost_app(&self) -> Option<String> {
        crate::sys::frontmost_bundle_id()
    }
}
