//! Per-event routing inside the tap callback.
//!
//! The OS callback translates the raw event into a [`TapEvent`], asks
//! [`TapContext::route`] what to do, and carries out the returned [`Action`].
//! Everything here is platform independent.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use mac_keycode::{Chord, Modifiers};
use tracing::trace;

use crate::{Edit, Environment, KeySnapshot, RemapPolicy, decide};

/// Shared on/off switch for remapping, flipped from the menu.
#[derive(Debug, Clone)]
pub struct RemapSwitch(Arc<AtomicBool>);

impl RemapSwitch {
    /// Create a switch in the given state.
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    /// Current state.
    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Set the state.
    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }

    /// Flip the state, returning the new value.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::SeqCst)
    }
}

impl Default for RemapSwitch {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Event as seen by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapEvent {
    /// A key press, including auto-repeats.
    KeyDown(KeySnapshot),
    /// A key release.
    KeyUp(KeySnapshot),
    /// The OS disabled the tap because a callback took too long.
    DisabledByTimeout,
    /// The OS disabled the tap in response to user input (secure input).
    DisabledByUserInput,
    /// Anything else the tap may be handed.
    Other,
}

/// What the callback should do with the live event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Deliver the event unchanged.
    Pass,
    /// Re-enable the tap, then deliver the event unchanged.
    Rearm,
    /// Apply the edit, then deliver the event.
    Rewrite(Edit),
}

/// Everything the tap callback needs, built once at startup and moved into
/// the callback.
pub struct TapContext {
    /// Remap rules.
    policy: RemapPolicy,
    /// Menu-controlled kill switch.
    switch: RemapSwitch,
    /// Layout and frontmost-app probes.
    env: Box<dyn Environment>,
}

impl TapContext {
    /// Bundle a policy, a switch, and an environment.
    pub fn new(policy: RemapPolicy, switch: RemapSwitch, env: Box<dyn Environment>) -> Self {
        Self {
            policy,
            switch,
            env,
        }
    }

    /// The policy in effect.
    pub const fn policy(&self) -> &RemapPolicy {
        &self.policy
    }

    /// The shared switch.
    pub const fn switch(&self) -> &RemapSwitch {
        &self.switch
    }

    /// Decide what to do with one event.
    ///
    /// Probes run only for enabled, Command-held events on one of the swap
    /// keys. Tap-disabled notifications never reach the decision engine.
    pub fn route(&self, event: TapEvent) -> Action {
        let snap = match event {
            TapEvent::DisabledByTimeout | TapEvent::DisabledByUserInput => return Action::Rearm,
            TapEvent::Other => return Action::Pass,
            TapEvent::KeyUp(_) if !self.policy.include_key_up() => return Action::Pass,
            TapEvent::KeyDown(s) | TapEvent::KeyUp(s) => s,
        };
        let enabled = self.switch.get();
        if !enabled || !self.is_candidate(snap) {
            return Action::Pass;
        }
        let layout = self.env.keyboard_layout();
        let app = self.env.frontmost_app();
        let edit = decide(
            snap,
            layout.as_deref(),
            app.as_deref(),
            enabled,
            &self.policy,
        );
        trace!(
            chord = %describe(snap),
            result = %describe(edit.apply(snap)),
            layout = layout.as_deref().unwrap_or("-"),
            app = app.as_deref().unwrap_or("-"),
            "tap_decision"
        );
        if edit.is_noop() {
            Action::Pass
        } else {
            Action::Rewrite(edit)
        }
    }

    /// Whether an event is worth probing the environment for.
    fn is_candidate(&self, snap: KeySnapshot) -> bool {
        snap.modifiers().contains(Modifiers::COMMAND)
            && self.policy.swap_partner(snap.keycode).is_some()
    }
}

/// Human-readable chord for logs.
fn describe(snap: KeySnapshot) -> String {
    Chord::from_event(snap.keycode, snap.flags)
        .map_or_else(|| format!("keycode:{}", snap.keycode), |c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_toggles() {
        let s = RemapSwitch::default();
        assert!(s.get());
        assert!(!s.toggle());
        assert!(!s.get());
        let clone = s.clone();
        assert!(clone.toggle());
        assert!(s.get());
        s.set(false);
        assert!(!clone.get());
    }

    #[test]
    fn describe_uses_chord_specs() {
        let cmd_shift = (Modifiers::COMMAND | Modifiers::SHIFT).bits();
        assert_eq!(describe(KeySnapshot::new(6, cmd_shift)), "cmd+shift+z");
        assert_eq!(describe(KeySnapshot::new(0x0A, 0)), "keycode:10");
    }
}
