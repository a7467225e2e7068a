//! Defer work until the process is trusted for Accessibility.
//!
//! [`PermissionGate::watch`] runs `on_grant` once: immediately when trust is
//! already held, otherwise from a repeating poll on the tokio runtime. The
//! poll stops after the grant or when the gate is cancelled or dropped.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{
    runtime::Handle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

/// Source of the trust state.
pub trait TrustProbe: Send + Sync + 'static {
    /// Whether the process currently holds the required permission.
    fn is_trusted(&self) -> bool;
}

/// Accessibility trust as reported by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxTrust;

impl TrustProbe for AxTrust {
    fn is_trusted(&self) -> bool {
        permissions::accessibility_ok()
    }
}

impl<F> TrustProbe for F
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn is_trusted(&self) -> bool {
        self()
    }
}

/// Boxed grant callback.
type OnGrant = Box<dyn FnOnce() + Send + 'static>;

/// A pending (or already satisfied) wait for permission.
pub struct PermissionGate {
    /// Cancels the poll task.
    token: CancellationToken,
    /// The callback, taken by whoever fires it first. It runs under the lock
    /// and cancelling takes the lock too, so nothing fires after
    /// [`cancel`](Self::cancel) returns.
    on_grant: Arc<Mutex<Option<OnGrant>>>,
}

impl PermissionGate {
    /// Run `on_grant` once the probe reports trust.
    ///
    /// When trust is already held the callback runs synchronously, before
    /// this returns, and no task is spawned. Otherwise the probe is polled
    /// every `interval` on `rt`.
    pub fn watch<P, F>(rt: &Handle, probe: P, interval: Duration, on_grant: F) -> Self
    where
        P: TrustProbe,
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let slot: Arc<Mutex<Option<OnGrant>>> = Arc::new(Mutex::new(Some(Box::new(on_grant))));
        let gate = Self {
            token: token.clone(),
            on_grant: slot.clone(),
        };

        if probe.is_trusted() {
            debug!("permission_already_granted");
            gate.fire();
            return gate;
        }

        info!(interval_ms = interval.as_millis(), "waiting_for_accessibility");
        rt.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        trace!("permission_poll_cancelled");
                        return;
                    }
                    _ = ticker.tick() => {
                        if !probe.is_trusted() {
                            trace!("permission_poll_not_trusted");
                            continue;
                        }
                        info!("accessibility_granted");
                        token.cancel();
                        run_slot(&slot);
                        return;
                    }
                }
            }
        });
        gate
    }

    /// Stop polling without firing. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
        drop(self.on_grant.lock().take());
    }

    /// Whether the gate is still waiting for a grant.
    pub fn is_pending(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Take and run the callback, if still present.
    fn fire(&self) {
        self.token.cancel();
        run_slot(&self.on_grant);
    }
}

/// Run the callback in `slot`, if still present, holding the lock so a
/// concurrent [`PermissionGate::cancel`] waits for it to finish.
fn run_slot(slot: &Mutex<Option<OnGrant>>) {
    let mut guard = slot.lock();
    if let Some(cb) = guard.take() {
        cb();
    }
}

impl Drop for PermissionGate {
    fn drop(&mut self) {
        self.cancel();
    }
}
