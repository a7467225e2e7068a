use std::{fs, path::Path, time::Duration};

use mac_keycode::Key;

use crate::*;

#[test]
fn empty_config_is_builtin_defaults() {
    let cfg = load_from_str("()", None).expect("parse");
    assert_eq!(cfg, Config::default());
    assert!(cfg.layouts.iter().any(|l| l == "com.apple.keylayout.German"));
    assert!(cfg.apps.iter().any(|a| a == "com.microsoft.Word"));
    assert_eq!(cfg.app_prefixes, vec!["org.gimp.gimp"]);
    assert_eq!(cfg.swap, (Key::Z, Key::Y));
    assert!(!cfg.include_key_up);
    assert_eq!(cfg.poll_interval, Duration::from_secs(1));
}

#[test]
fn replacement_and_extra_lists() {
    let ron = r#"(
        layouts: ["com.apple.keylayout.German"],
        extra_layouts: ["com.example.keylayout.Custom", "com.apple.keylayout.German"],
        apps: [],
        extra_apps: ["com.example.Editor"],
        extra_app_prefixes: ["com.example.suite."],
    )"#;
    let cfg = load_from_str(ron, None).expect("parse");
    assert_eq!(
        cfg.layouts,
        vec!["com.apple.keylayout.German", "com.example.keylayout.Custom"]
    );
    assert_eq!(cfg.apps, vec!["com.example.Editor"]);
    assert_eq!(cfg.app_prefixes, vec!["org.gimp.gimp", "com.example.suite."]);
}

#[test]
fn scalar_fields_without_some_wrapper() {
    let ron = r#"(swap: ("z", "y"), include_key_up: true, poll_interval_ms: 250)"#;
    let cfg = load_from_str(ron, None).expect("parse");
    assert!(cfg.include_key_up);
    assert_eq!(cfg.poll_interval, Duration::from_millis(250));
}

#[test]
fn unknown_field_fails() {
    let res = load_from_str("(layout: [])", None);
    assert!(matches!(res, Err(Error::Parse { .. })));
}

#[test]
fn unknown_key_spec_fails() {
    let res = load_from_str(r#"(swap: ("z", "hyper"))"#, None);
    assert!(matches!(res, Err(Error::Parse { .. })));
}

#[test]
fn validation_errors() {
    for ron in [
        r#"(swap: ("z", "Z"))"#,
        "(poll_interval_ms: 10)",
        "(poll_interval_ms: 600000)",
        r#"(extra_apps: [" "])"#,
    ] {
        let res = load_from_str(ron, Some(Path::new("/tmp/zyswap.ron")));
        match res {
            Err(e @ Error::Validation { .. }) => {
                assert_eq!(e.path(), Some(Path::new("/tmp/zyswap.ron")), "{ron}");
            }
            other => panic!("expected validation error for {ron}, got {other:?}"),
        }
    }
}

#[test]
fn dump_reparses_to_same_config() {
    let cfg = load_from_str(r#"(extra_layouts: ["x.y"], include_key_up: true)"#, None)
        .expect("parse");
    let text = cfg.to_ron().expect("dump");
    let again = load_from_str(&text, None).expect("reparse");
    assert_eq!(cfg, again);
}

#[test]
fn load_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.ron");
    fs::write(&path, "(apps: [\"com.example.A\"])").expect("write");
    let cfg = load(Some(&path)).expect("load");
    assert_eq!(cfg.apps, vec!["com.example.A"]);

    let missing = dir.path().join("missing.ron");
    let err = load(Some(&missing)).expect_err("explicit missing file");
    assert!(matches!(err, Error::Read { .. }));
}
