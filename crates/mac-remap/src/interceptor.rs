//! Lifecycle of the single process-wide event tap.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{Result, TapContext};

/// Installs and removes the OS-level tap.
///
/// The macOS implementation lives in `sys`; tests substitute a recording
/// backend.
pub trait TapBackend {
    /// The live tap resource.
    type Handle;

    /// Create, attach and enable a tap routing events through `ctx`.
    fn install(&mut self, ctx: Arc<TapContext>) -> Result<Self::Handle>;

    /// Disable, detach and release a tap. Must not fail.
    fn remove(&mut self, handle: Self::Handle);
}

/// Owns at most one live tap.
pub struct Interceptor<B: TapBackend> {
    /// Platform backend.
    backend: B,
    /// Callback context handed to every installed tap.
    ctx: Arc<TapContext>,
    /// The live tap, if started.
    handle: Option<B::Handle>,
}

impl<B: TapBackend> Interceptor<B> {
    /// Create a stopped interceptor.
    pub fn new(backend: B, ctx: TapContext) -> Self {
        Self {
            backend,
            ctx: Arc::new(ctx),
            handle: None,
        }
    }

    /// The callback context shared with the tap.
    pub fn context(&self) -> &TapContext {
        &self.ctx
    }

    /// Install the tap. A no-op when already running.
    ///
    /// On failure the interceptor stays stopped and the error is returned;
    /// callers retry once permission is granted.
    pub fn start(&mut self) -> Result<()> {
        if self.handle.is_some() {
            info!("event_tap_already_running");
            return Ok(());
        }
        match self.backend.install(self.ctx.clone()) {
            Ok(h) => {
                self.handle = Some(h);
                info!("event_tap_started");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "event_tap_start_failed");
                Err(e)
            }
        }
    }

    /// Remove the tap if running. Idempotent.
    pub fn stop(&mut self) {
        if let Some(h) = self.handle.take() {
            self.backend.remove(h);
            info!("event_tap_stopped");
        } else {
            debug!("event_tap_stop_not_running");
        }
    }

    /// Whether a tap is live.
    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl<B: TapBackend> Drop for Interceptor<B> {
    fn drop(&mut self) {
        self.stop();
    }
}
