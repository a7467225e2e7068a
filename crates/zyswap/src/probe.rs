//! The `probe` subcommand: show what the remapper would see right now.

use std::path::Path;

use config::Config;
use mac_remap::{Environment, RemapPolicy};

/// Load the config, query the live environment, and print a report.
/// Returns the process exit code.
pub fn run(explicit: Option<&Path>) -> i32 {
    let cfg = match config::load(explicit) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.pretty());
            return 1;
        }
    };
    #[cfg(target_os = "macos")]
    let env = mac_remap::SystemEnv;
    #[cfg(not(target_os = "macos"))]
    let env = mac_remap::FixedEnv::default();
    print!("{}", report(&cfg, permissions::accessibility_ok(), &env));
    0
}

/// Render the probe report.
fn report(cfg: &Config, trusted: bool, env: &dyn Environment) -> String {
    let policy = RemapPolicy::from_config(cfg);
    let layout = env.keyboard_layout();
    let app = env.frontmost_app();

    let layout_note = if policy.allows_layout(layout.as_deref()) {
        "swap applies"
    } else {
        "not a swap layout"
    };
    let app_note = if policy.is_legacy_app(app.as_deref()) {
        "legacy shortcuts"
    } else {
        "standard shortcuts"
    };
    format!(
        "accessibility: {}\nlayout: {} ({layout_note})\nfrontmost app: {} ({app_note})\n",
        if trusted { "granted" } else { "missing" },
        layout.as_deref().unwrap_or("unknown"),
        app.as_deref().unwrap_or("unknown"),
    )
}

#[cfg(test)]
mod tests {
    use mac_remap::FixedEnv;

    use super::*;

    #[test]
    fn report_for_german_word() {
        let env = FixedEnv::new(Some("com.apple.keylayout.German"), Some("com.microsoft.Word"));
        let out = report(&Config::default(), true, &env);
        assert_eq!(
            out,
            "accessibility: granted\n\
             layout: com.apple.keylayout.German (swap applies)\n\
             frontmost app: com.microsoft.Word (legacy shortcuts)\n"
        );
    }

    #[test]
    fn report_for_unknown_environment() {
        let out = report(&Config::default(), false, &FixedEnv::default());
        assert!(out.starts_with("accessibility: missing\n"));
        assert!(out.contains("layout: unknown (not a swap layout)"));
        assert!(out.contains("frontmost app: unknown (standard shortcuts)"));
    }
}
