use std::{path::PathBuf, process, time::Duration};

use config::{Config, Prefs};
use logging::notice::Notices;
use mac_remap::{
    AxTrust, CgTapBackend, Interceptor, PermissionGate, RemapPolicy, RemapSwitch, SystemEnv,
    TapContext,
};
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
    platform::macos::{ActivationPolicy, EventLoopExtMacOS},
};
use tokio::runtime::{self, Runtime};
use tracing::{debug, error, info, trace, warn};

use crate::{
    status::{self, Status},
    tray::{self, Tray},
};

/// Events posted to the main loop from the menu listener and the
/// permission poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Accessibility trust is now held.
    PermissionGranted,
    /// "Enabled" menu item clicked.
    ToggleEnabled,
    /// "Start at Login" menu item clicked.
    ToggleAutostart,
    /// "Accessibility Settings…" menu item clicked.
    OpenSettings,
    /// "Quit" menu item clicked.
    Quit,
}

/// Main-thread application state.
struct App {
    /// Tap lifecycle; the tap's run-loop source lives on this thread.
    interceptor: Interceptor<CgTapBackend>,
    /// Shared remap switch, also read by the tap callback.
    switch: RemapSwitch,
    /// Persisted toggles.
    prefs: Prefs,
    /// Where `prefs` is written.
    prefs_path: PathBuf,
    /// Trust poll interval.
    poll_interval: Duration,
    /// Pending permission wait, if any.
    gate: Option<PermissionGate>,
    /// Runtime driving the permission poll.
    runtime: Runtime,
    /// Status item, once built.
    tray: Option<Tray>,
    /// Latest warning/error, for the tooltip.
    notices: Notices,
    /// Wakes the main loop from other threads.
    proxy: EventLoopProxy<AppEvent>,
    /// Set once shutdown has run.
    shut_down: bool,
}

impl App {
    /// First iteration of the event loop: status item, trust prompt, tap.
    fn launch(&mut self) {
        self.tray = tray::build(
            self.proxy.clone(),
            self.switch.get(),
            self.prefs.autostart_enabled,
        );
        self.prompt_once();
        let proxy = self.proxy.clone();
        self.gate = Some(PermissionGate::watch(
            self.runtime.handle(),
            AxTrust,
            self.poll_interval,
            move || {
                if proxy.send_event(AppEvent::PermissionGranted).is_err() {
                    debug!("event_loop_closed_before_grant");
                }
            },
        ));
        self.refresh();
    }

    /// Show the native trust prompt the first time we run untrusted.
    fn prompt_once(&mut self) {
        if self.prefs.was_prompted_before || permissions::accessibility_ok() {
            return;
        }
        info!("requesting_accessibility_prompt");
        permissions::request_accessibility();
        self.prefs.was_prompted_before = true;
        self.save_prefs();
    }

    /// Handle a user event. Returns true when the loop should exit.
    fn handle(&mut self, ev: AppEvent) -> bool {
        trace!(?ev, "app_event");
        match ev {
            AppEvent::PermissionGranted => {
                self.gate = None;
                if let Err(e) = self.interceptor.start() {
                    warn!(error = %e, "remapping_inactive");
                }
            }
            AppEvent::ToggleEnabled => {
                let on = self.switch.toggle();
                info!(enabled = on, "remapping_toggled");
                self.prefs.remapping_enabled = on;
                self.save_prefs();
            }
            AppEvent::ToggleAutostart => {
                let on = self.prefs.toggle_autostart();
                info!(enabled = on, "autostart_toggled");
                self.save_prefs();
            }
            AppEvent::OpenSettings => {
                permissions::open_accessibility_settings().ok();
            }
            AppEvent::Quit => {
                self.shutdown();
                return true;
            }
        }
        self.refresh();
        false
    }

    /// Persist preferences. Failures are logged; the notice layer surfaces
    /// them on the tooltip and the in-memory state still applies.
    fn save_prefs(&self) {
        if let Err(e) = self.prefs.save(&self.prefs_path) {
            error!(path = %self.prefs_path.display(), error = %e, "prefs_write_failed");
        }
    }

    /// Push the current state to the status item.
    fn refresh(&self) {
        let Some(tray) = &self.tray else { return };
        let enabled = self.switch.get();
        let st = Status {
            enabled,
            running: self.interceptor.is_running(),
            waiting_for_permission: self.gate.as_ref().is_some_and(PermissionGate::is_pending),
        };
        tray.update(
            enabled,
            self.prefs.autostart_enabled,
            &status::tooltip(st, self.notices.last().as_ref()),
        );
    }

    /// Cancel the permission poll, release the tap, remove the status item.
    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if let Some(gate) = self.gate.take() {
            gate.cancel();
        }
        self.interceptor.stop();
        self.tray = None;
        info!("shutdown_complete");
    }
}

/// Run the app on the main thread. Never returns.
pub fn run(cfg: &Config, prefs_path: PathBuf, notices: Notices) -> ! {
    let prefs = Prefs::load(&prefs_path);
    debug!(?prefs, path = %prefs_path.display(), "prefs_loaded");

    let switch = RemapSwitch::new(prefs.remapping_enabled);
    let ctx = TapContext::new(
        RemapPolicy::from_config(cfg),
        switch.clone(),
        Box::new(SystemEnv),
    );

    let runtime = match runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("zyswap-poll")
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            process::exit(1);
        }
    };

    // Create the tao event loop (must be on main thread for macOS)
    let mut event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    // Set activation policy to Accessory to prevent dock icon
    event_loop.set_activation_policy(ActivationPolicy::Accessory);

    let mut app = App {
        interceptor: Interceptor::new(CgTapBackend, ctx),
        switch,
        prefs,
        prefs_path,
        poll_interval: cfg.poll_interval,
        gate: None,
        runtime,
        tray: None,
        notices,
        proxy: event_loop.create_proxy(),
        shut_down: false,
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::NewEvents(StartCause::Init) => app.launch(),
            Event::UserEvent(ev) => {
                if app.handle(ev) {
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::LoopDestroyed => app.shutdown(),
            _ => {}
        }
    })
}
