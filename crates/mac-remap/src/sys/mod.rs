//! macOS bindings: the CoreGraphics event tap and the environment probes.

mod probe;
mod tap;

pub(crate) use probe::{current_layout_id, frontmost_bundle_id};
pub use tap::{CgTap, CgTapBackend};
