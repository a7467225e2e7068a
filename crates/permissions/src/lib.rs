//! Simple, macOS-only permission checks for zyswap.
//!
//! Installing a modifying HID event tap requires the process to be trusted for
//! Accessibility. This crate exposes the handful of calls the app needs around
//! that grant:
//!
//! - [`accessibility_ok`]: side-effect free trust query.
//! - [`request_accessibility`]: the same query, asking macOS to show its
//!   native "grant access" prompt when the process is not yet trusted.
//! - [`open_accessibility_settings`]: deep-link into System Settings.
//!
//! On other platforms every query reports "not trusted".

use std::{io, process::Command};

use tracing::warn;

/// Deep link to System Settings → Privacy & Security → Accessibility.
pub const ACCESSIBILITY_SETTINGS_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

#[cfg(target_os = "macos")]
mod sys {
    use core_foundation::{
        base::TCFType,
        boolean::CFBoolean,
        dictionary::{CFDictionary, CFDictionaryRef},
        string::{CFString, CFStringRef},
    };

    #[link(name = "ApplicationServices", kind = "framework")]
    unsafe extern "C" {
        static kAXTrustedCheckOptionPrompt: CFStringRef;
        fn AXIsProcessTrusted() -> bool;
        fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
    }

    pub(super) fn is_trusted() -> bool {
        unsafe { AXIsProcessTrusted() }
    }

    pub(super) fn is_trusted_prompting() -> bool {
        // SAFETY: the key is an immutable framework constant; get rule applies.
        let key = unsafe { CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt) };
        let options = CFDictionary::from_CFType_pairs(&[(
            key.as_CFType(),
            CFBoolean::true_value().as_CFType(),
        )]);
        unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) }
    }
}

#[cfg(not(target_os = "macos"))]
mod sys {
    pub(super) fn is_trusted() -> bool {
        false
    }

    pub(super) fn is_trusted_prompting() -> bool {
        false
    }
}

/// Check if the process is trusted for Accessibility.
///
/// This is the permission macOS checks before allowing a modifying event tap
/// at the HID level. Fast and side-effect free.
pub fn accessibility_ok() -> bool {
    sys::is_trusted()
}

/// Check Accessibility trust, asking macOS to show its prompt if untrusted.
///
/// The prompt is asynchronous: the return value reflects the state at the
/// time of the call, so callers still need to poll [`accessibility_ok`].
pub fn request_accessibility() -> bool {
    sys::is_trusted_prompting()
}

/// Open macOS Accessibility settings in System Settings.
pub fn open_accessibility_settings() -> io::Result<()> {
    Command::new("open")
        .arg(ACCESSIBILITY_SETTINGS_URL)
        .spawn()
        .map(|_| ())
        .inspect_err(|e| warn!(error = %e, "open_accessibility_settings_failed"))
}
