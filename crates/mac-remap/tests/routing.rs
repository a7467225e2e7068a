use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use config::Config;
use mac_keycode::{Key, Modifiers};
use mac_remap::{
    Action, Edit, Environment, FixedEnv, KeySnapshot, RemapPolicy, RemapSwitch, TapContext,
    TapEvent,
};

const CMD: u64 = Modifiers::COMMAND.bits();
const SHIFT: u64 = Modifiers::SHIFT.bits();

/// Environment that counts how often it is probed.
struct CountingEnv {
    inner: FixedEnv,
    probes: Arc<AtomicUsize>,
}

impl Environment for CountingEnv {
    fn keyboard_layout(&self) -> Option<String> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.inner.keyboard_layout()
    }

    fn frontmost_app(&self) -> Option<String> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.inner.frontmost_app()
    }
}

fn context(
    policy: RemapPolicy,
    layout: Option<&str>,
    app: Option<&str>,
) -> (TapContext, RemapSwitch, Arc<AtomicUsize>) {
    let probes = Arc::new(AtomicUsize::new(0));
    let switch = RemapSwitch::new(true);
    let env = CountingEnv {
        inner: FixedEnv::new(layout, app),
        probes: probes.clone(),
    };
    (
        TapContext::new(policy, switch.clone(), Box::new(env)),
        switch,
        probes,
    )
}

fn down(key: Key, flags: u64) -> TapEvent {
    TapEvent::KeyDown(KeySnapshot::new(key.scancode(), flags))
}

fn up(key: Key, flags: u64) -> TapEvent {
    TapEvent::KeyUp(KeySnapshot::new(key.scancode(), flags))
}

#[test]
fn disabled_tap_rearms_without_probing() {
    let (ctx, _switch, probes) = context(
        RemapPolicy::default(),
        Some("com.apple.keylayout.German"),
        None,
    );
    assert_eq!(ctx.route(TapEvent::DisabledByTimeout), Action::Rearm);
    assert_eq!(ctx.route(TapEvent::DisabledByUserInput), Action::Rearm);
    assert_eq!(ctx.route(TapEvent::Other), Action::Pass);
    assert_eq!(probes.load(Ordering::SeqCst), 0);
}

#[test]
fn only_candidates_are_probed() {
    let (ctx, _switch, probes) = context(
        RemapPolicy::default(),
        Some("com.apple.keylayout.German"),
        Some("com.apple.Notes"),
    );
    assert_eq!(ctx.route(down(Key::Z, 0)), Action::Pass);
    assert_eq!(ctx.route(down(Key::X, CMD)), Action::Pass);
    assert_eq!(probes.load(Ordering::SeqCst), 0);

    assert_eq!(
        ctx.route(down(Key::Z, CMD)),
        Action::Rewrite(Edit::rekey(Key::Y.scancode()))
    );
    assert_eq!(probes.load(Ordering::SeqCst), 2);
}

#[test]
fn switch_off_passes_without_probing() {
    let (ctx, switch, probes) = context(
        RemapPolicy::default(),
        Some("com.apple.keylayout.German"),
        None,
    );
    switch.set(false);
    assert_eq!(ctx.route(down(Key::Z, CMD)), Action::Pass);
    assert_eq!(probes.load(Ordering::SeqCst), 0);

    switch.toggle();
    assert_eq!(
        ctx.route(down(Key::Y, CMD)),
        Action::Rewrite(Edit::rekey(Key::Z.scancode()))
    );
}

#[test]
fn legacy_app_on_other_layout() {
    let (ctx, _switch, _probes) = context(
        RemapPolicy::default(),
        Some("com.apple.keylayout.US"),
        Some("com.microsoft.Excel"),
    );
    let Action::Rewrite(edit) = ctx.route(down(Key::Z, CMD | SHIFT)) else {
        panic!("expected a rewrite");
    };
    assert_eq!(
        edit.apply(KeySnapshot::new(Key::Z.scancode(), CMD | SHIFT)),
        KeySnapshot::new(Key::Y.scancode(), CMD)
    );
    assert_eq!(ctx.route(down(Key::Z, CMD)), Action::Pass);
}

#[test]
fn unknown_environment_passes() {
    let (ctx, _switch, _probes) = context(RemapPolicy::default(), None, None);
    assert_eq!(ctx.route(down(Key::Z, CMD)), Action::Pass);
    assert_eq!(ctx.route(down(Key::Z, CMD | SHIFT)), Action::Pass);
}

#[test]
fn key_up_follows_policy() {
    let layout = Some("com.apple.keylayout.German");
    let (ctx, _switch, probes) = context(RemapPolicy::default(), layout, None);
    assert_eq!(ctx.route(up(Key::Z, CMD)), Action::Pass);
    assert_eq!(probes.load(Ordering::SeqCst), 0);

    let cfg = Config {
        include_key_up: true,
        ..Config::default()
    };
    let (ctx, _switch, _probes) = context(RemapPolicy::from_config(&cfg), layout, None);
    assert_eq!(
        ctx.route(up(Key::Z, CMD)),
        Action::Rewrite(Edit::rekey(Key::Y.scancode()))
    );
}
