//! CoreGraphics event tap backend.
//!
//! The tap is created with `CGEventTapOptions::Default` so the callback may
//! modify events in place; it always returns `CallbackResult::Keep`. Its
//! run-loop source is attached to the main run loop, so callbacks run on the
//! main thread alongside the UI event loop.

use std::{
    ffi::c_void,
    ptr,
    sync::{
        Arc,
        atomic::{AtomicPtr, Ordering},
    },
};

use core_foundation::{
    base::TCFType,
    mach_port::CFMachPortRef,
    runloop::{CFRunLoop, CFRunLoopSource, kCFRunLoopCommonModes},
};
use core_graphics::event::{
    CGEvent, CGEventFlags, CGEventTap, CGEventTapLocation, CGEventTapOptions,
    CGEventTapPlacement, CGEventType, CallbackResult,
};
use tracing::{debug, trace, warn};

use crate::{Action, Edit, Error, KeySnapshot, Result, TapBackend, TapContext, TapEvent};

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGEventTapEnable(tap: CFMachPortRef, enable: bool);
}

#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    fn CFMachPortInvalidate(port: CFMachPortRef);
}

// Minimal subset of CGEventField constants used by this module.
const FIELD_KEYBOARD_EVENT_KEYCODE: u32 = 9;

/// A live tap and its run-loop attachment.
pub struct CgTap {
    /// The tap; owns the mach port and the boxed callback.
    tap: CGEventTap<'static>,
    /// Source attached to the main run loop.
    source: CFRunLoopSource,
    /// The port pointer as seen by the callback; cleared on removal.
    port: Arc<AtomicPtr<c_void>>,
}

/// Installs taps at the HID level on the main run loop.
#[derive(Debug, Default)]
pub struct CgTapBackend;

impl TapBackend for CgTapBackend {
    type Handle = CgTap;

    fn install(&mut self, ctx: Arc<TapContext>) -> Result<CgTap> {
        if !permissions::accessibility_ok() {
            warn!("accessibility_permission_missing");
            return Err(Error::PermissionDenied("Accessibility"));
        }

        let mut kinds = vec![CGEventType::KeyDown];
        if ctx.policy().include_key_up() {
            kinds.push(CGEventType::KeyUp);
        }

        // Filled in once the tap exists, for re-arming from inside the callback.
        let port: Arc<AtomicPtr<c_void>> = Arc::new(AtomicPtr::new(ptr::null_mut()));
        let port_cb = port.clone();

        debug!(key_up = ctx.policy().include_key_up(), "creating_event_tap");
        let tap = CGEventTap::new(
            CGEventTapLocation::HID,
            CGEventTapPlacement::HeadInsertEventTap,
            CGEventTapOptions::Default,
            kinds,
            move |_proxy, etype, event| {
                let ev = classify(etype, event);
                match ctx.route(ev) {
                    Action::Pass => {}
                    Action::Rearm => {
                        let p = port_cb.load(Ordering::SeqCst) as CFMachPortRef;
                        if !p.is_null() {
                            warn!(notice = false, event = ?ev, "tap_disabled_by_os_reenabling");
                            unsafe { CGEventTapEnable(p, true) };
                        }
                    }
                    Action::Rewrite(edit) => {
                        trace!(?edit, "rewriting_event");
                        apply(event, edit);
                    }
                }
                CallbackResult::Keep
            },
        )
        .map_err(|_| {
            warn!("event_tap_create_failed");
            Error::EventTapStart
        })?;

        port.store(
            tap.mach_port().as_concrete_TypeRef() as *mut c_void,
            Ordering::SeqCst,
        );

        let source = tap.mach_port().create_runloop_source(0).map_err(|_| {
            warn!("run_loop_source_create_failed");
            Error::EventTapStart
        })?;

        let mode = unsafe { kCFRunLoopCommonModes };
        CFRunLoop::get_main().add_source(&source, mode);
        tap.enable();
        debug!("event_tap_attached_to_main_run_loop");

        Ok(CgTap { tap, source, port })
    }

    fn remove(&mut self, handle: CgTap) {
        let CgTap { tap, source, port } = handle;
        let p = tap.mach_port().as_concrete_TypeRef();
        // Disable first so no callback runs against a half torn-down tap.
        unsafe { CGEventTapEnable(p, false) };
        port.store(ptr::null_mut(), Ordering::SeqCst);
        let mode = unsafe { kCFRunLoopCommonModes };
        CFRunLoop::get_main().remove_source(&source, mode);
        unsafe { CFMachPortInvalidate(p) };
        drop(tap);
        debug!("event_tap_released");
    }
}

/// Translate a raw tap callback into a router event.
fn classify(etype: CGEventType, event: &CGEvent) -> TapEvent {
    match etype {
        CGEventType::KeyDown => TapEvent::KeyDown(snapshot(event)),
        CGEventType::KeyUp => TapEvent::KeyUp(snapshot(event)),
        CGEventType::TapDisabledByTimeout => TapEvent::DisabledByTimeout,
        CGEventType::TapDisabledByUserInput => TapEvent::DisabledByUserInput,
        _ => TapEvent::Other,
    }
}

/// Read the keycode and flags of a live key event.
fn snapshot(event: &CGEvent) -> KeySnapshot {
    let keycode = event.get_integer_value_field(FIELD_KEYBOARD_EVENT_KEYCODE) as u16;
    KeySnapshot::new(keycode, event.get_flags().bits())
}

/// Write an edit into a live key event.
fn apply(event: &CGEvent, edit: Edit) {
    if let Some(code) = edit.keycode {
        event.set_integer_value_field(FIELD_KEYBOARD_EVENT_KEYCODE, i64::from(code));
    }
    if !edit.strip.is_empty() {
        let bits = event.get_flags().bits() & !edit.strip.bits();
        event.set_flags(CGEventFlags::from_bits_retain(bits));
    }
}
