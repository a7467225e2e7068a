//! mac-remap: swap Z and Y in Command shortcuts for QWERTZ-family layouts.
//!
//! Layers, from the inside out:
//! - [`decide`]: pure decision engine mapping an event, the active layout and
//!   the frontmost app to an [`Edit`].
//! - [`RemapPolicy`]: which layouts and applications the engine acts on.
//! - [`TapContext`]: per-event routing used by the tap callback, including
//!   re-arming after the OS disables the tap.
//! - [`Interceptor`]: start/stop lifecycle of the single event tap over a
//!   [`TapBackend`] (CoreGraphics on macOS).
//! - [`PermissionGate`]: defers tap installation until Accessibility trust
//!   is granted.
//!
//! Everything except the `sys` backend is platform independent.

mod decide;
mod env;
mod error;
mod gate;
mod interceptor;
mod policy;
mod route;
#[cfg(target_os = "macos")]
mod sys;

pub use decide::{Edit, KeySnapshot, decide};
#[cfg(target_os = "macos")]
pub use env::SystemEnv;
pub use env::{Environment, FixedEnv};
pub use error::{Error, Result};
pub use gate::{AxTrust, PermissionGate, TrustProbe};
pub use interceptor::{Interceptor, TapBackend};
pub use policy::RemapPolicy;
pub use route::{Action, RemapSwitch, TapContext, TapEvent};
#[cfg(target_os = "macos")]
pub use sys::{CgTap, CgTapBackend};
