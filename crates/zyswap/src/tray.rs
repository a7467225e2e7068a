use std::thread;

use tao::event_loop::EventLoopProxy;
use tracing::{debug, error};
use tray_icon::{
    TrayIcon, TrayIconBuilder,
    menu::{CheckMenuItem, Menu, MenuEvent, MenuItem, PredefinedMenuItem},
};

use crate::{app::AppEvent, status};

/// The status item and the menu entries whose state we update.
pub struct Tray {
    /// The status item itself; removed from the menu bar on drop.
    icon: TrayIcon,
    /// "Enabled" check item mirroring the remap switch.
    enabled_item: CheckMenuItem,
    /// "Start at Login" check item mirroring the autostart preference.
    autostart_item: CheckMenuItem,
}

impl Tray {
    /// Refresh title, check marks and tooltip.
    pub fn update(&self, enabled: bool, autostart: bool, tooltip: &str) {
        self.enabled_item.set_checked(enabled);
        self.autostart_item.set_checked(autostart);
        self.icon.set_title(Some(status::title(enabled)));
        if let Err(e) = self.icon.set_tooltip(Some(tooltip)) {
            debug!(error = %e, "tray_tooltip_update_failed");
        }
    }
}

/// Build the status item and start forwarding menu clicks to the event loop.
/// Must be called on the main thread once the event loop has started.
pub fn build(proxy: EventLoopProxy<AppEvent>, enabled: bool, autostart: bool) -> Option<Tray> {
    let menu = Menu::new();
    let toggle = CheckMenuItem::new("Enabled", true, enabled, None);
    let login = CheckMenuItem::new("Start at Login", true, autostart, None);
    let settings = MenuItem::new("Accessibility Settings…", true, None);
    let quit = MenuItem::new("Quit", true, None);
    if let Err(e) = menu.append_items(&[
        &toggle,
        &login,
        &PredefinedMenuItem::separator(),
        &settings,
        &PredefinedMenuItem::separator(),
        &quit,
    ]) {
        error!(error = %e, "tray_menu_build_failed");
        return None;
    }
    let toggle_id = toggle.id().clone();
    let login_id = login.id().clone();
    let settings_id = settings.id().clone();
    let quit_id = quit.id().clone();

    let icon = match TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_title(status::title(enabled))
        .with_tooltip("zyswap")
        .build()
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "tray_icon_create_failed");
            return None;
        }
    };

    thread::spawn(move || {
        let menu_rx = MenuEvent::receiver();
        while let Ok(ev) = menu_rx.recv() {
            let msg = if ev.id == toggle_id {
                AppEvent::ToggleEnabled
            } else if ev.id == login_id {
                AppEvent::ToggleAutostart
            } else if ev.id == settings_id {
                AppEvent::OpenSettings
            } else if ev.id == quit_id {
                AppEvent::Quit
            } else {
                continue;
            };
            if proxy.send_event(msg).is_err() {
                debug!("event_loop_closed_stopping_menu_listener");
                break;
            }
        }
    });

    Some(Tray {
        icon,
        enabled_item: toggle,
        autostart_item: login,
    })
}
