//! Binary entrypoint for the zyswap menu-bar app.
use std::{
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use logging::{self as logshared, notice::Notices};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*};

/// Main-thread application: event loop, tap lifecycle, permission wait.
#[cfg(target_os = "macos")]
mod app;
/// `probe` subcommand report.
mod probe;
/// Status item title and tooltip text.
mod status;
/// Status item and menu.
#[cfg(target_os = "macos")]
mod tray;

#[derive(Parser, Debug)]
#[command(
    name = "zyswap",
    about = "Swap Z and Y in Command shortcuts on QWERTZ keyboards",
    version
)]
/// Command-line interface for the `zyswap` binary.
struct Cli {
    /// Optional subcommand.
    #[command(subcommand)]
    command: Option<Command>,

    /// Logging controls
    #[command(flatten)]
    log: logshared::LogArgs,

    /// Optional path to the config file (defaults to ~/.zyswap/config.ron)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Optional path to the preferences file (defaults to ~/.zyswap/prefs.ron)
    #[arg(long, value_name = "PATH")]
    prefs: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate the configuration then exit.
    Check {
        /// Path to configuration file to check (defaults to ~/.zyswap/config.ron)
        path: Option<PathBuf>,

        /// Dump the resolved configuration as RON to stdout
        #[arg(long)]
        dump: bool,
    },
    /// Report permission state, the active layout and the frontmost app.
    Probe,
    /// Open the Accessibility pane of System Settings.
    Settings,
}

fn main() {
    let cli = Cli::parse();

    // Install a single subscriber combining:
    // - Env filter (from CLI or env)
    // - Compact fmt output (no time)
    // - Notice layer (last warning/error, shown in the status item tooltip)
    let notices = Notices::new();
    tracing_subscriber::registry()
        .with(logshared::env_filter_from_spec(&cli.log.spec()))
        .with(fmt::layer().without_time())
        .with(notices.layer())
        .try_init()
        .ok();

    match &cli.command {
        Some(Command::Check { path, dump }) => {
            let explicit = path.as_deref().or(cli.config.as_deref());
            process::exit(check(explicit, *dump));
        }
        Some(Command::Probe) => process::exit(probe::run(cli.config.as_deref())),
        Some(Command::Settings) => {
            let code = i32::from(permissions::open_accessibility_settings().is_err());
            process::exit(code);
        }
        None => {}
    }

    let cfg = match config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e.pretty());
            process::exit(1);
        }
    };
    let prefs_path = cli.prefs.unwrap_or_else(config::default_prefs_path);

    #[cfg(target_os = "macos")]
    app::run(&cfg, prefs_path, notices);

    #[cfg(not(target_os = "macos"))]
    {
        drop((cfg, prefs_path, notices));
        eprintln!("zyswap rewrites keyboard events through a macOS event tap and only runs on macOS");
        process::exit(1);
    }
}

/// Validate a config file, printing `OK` or the resolved config. Returns the
/// process exit code.
fn check(explicit: Option<&Path>, dump: bool) -> i32 {
    let cfg = match config::load(explicit) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.pretty());
            return 1;
        }
    };
    if !dump {
        println!("OK");
        return 0;
    }
    match cfg.to_ron() {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(e) => {
            eprintln!("{}", e.pretty());
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn check_exit_codes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("good.ron");
        fs::write(&good, "(extra_apps: [\"com.example.Editor\"])").expect("write");
        assert_eq!(check(Some(&good), false), 0);
        assert_eq!(check(Some(&good), true), 0);

        let bad = dir.path().join("bad.ron");
        fs::write(&bad, "(poll_interval_ms: 1)").expect("write");
        assert_eq!(check(Some(&bad), false), 1);

        assert_eq!(check(Some(&dir.path().join("missing.ron")), false), 1);
    }
}
