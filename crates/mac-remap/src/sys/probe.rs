//! Text Input Sources and `NSWorkspace` queries.

use std::ffi::c_void;

use core_foundation::{
    base::{CFRelease, CFTypeRef, TCFType},
    string::{CFString, CFStringRef},
};
use objc2::rc::autoreleasepool;
use objc2_app_kit::NSWorkspace;

/// Opaque `TISInputSourceRef`.
type TISInputSourceRef = *mut c_void;

#[link(name = "Carbon", kind = "framework")]
unsafe extern "C" {
    static kTISPropertyInputSourceID: CFStringRef;
    fn TISCopyCurrentKeyboardLayoutInputSource() -> TISInputSourceRef;
    fn TISGetInputSourceProperty(source: TISInputSourceRef, key: CFStringRef) -> *const c_void;
}

/// Input source ID of the active keyboard layout.
pub(crate) fn current_layout_id() -> Option<String> {
    let source = unsafe { TISCopyCurrentKeyboardLayoutInputSource() };
    if source.is_null() {
        return None;
    }
    let id = unsafe { TISGetInputSourceProperty(source, kTISPropertyInputSourceID) };
    // The property follows the get rule: it lives as long as `source`.
    let out = (!id.is_null())
        .then(|| unsafe { CFString::wrap_under_get_rule(id as CFStringRef) }.to_string());
    unsafe { CFRelease(source as CFTypeRef) };
    out
}

/// Bundle identifier of the frontmost application.
pub(crate) fn frontmost_bundle_id() -> Option<String> {
    autoreleasepool(|_| {
        // SAFETY: plain property reads on the shared workspace.
        let app = unsafe { NSWorkspace::sharedWorkspace().frontmostApplication() }?;
        let bid = unsafe { app.bundleIdentifier() }?;
        Some(bid.to_string())
    })
}
