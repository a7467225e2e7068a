//! Keep the most recent warning or error for display in the status item.
//!
//! Install [`NoticeLayer`] in the tracing subscriber and hand its [`Notices`]
//! handle to whoever renders status. Events below `WARN` are ignored, as are
//! events carrying `notice = false`: conditions that recover on their own
//! stay in the log without reaching the user.

use std::{fmt, sync::Arc};

use parking_lot::Mutex;
use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::{RenderedLog, render_event};

/// Shared slot holding the latest notable event.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    /// Most recent `WARN` or `ERROR` event, if any.
    last: Arc<Mutex<Option<RenderedLog>>>,
}

impl Notices {
    /// Create an empty notice slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent warning or error, if one was recorded.
    pub fn last(&self) -> Option<RenderedLog> {
        self.last.lock().clone()
    }

    /// Build a layer that records into this slot.
    pub fn layer(&self) -> NoticeLayer {
        NoticeLayer {
            notices: self.clone(),
        }
    }
}

/// Tracing layer that stores `WARN`/`ERROR` events into a [`Notices`] slot.
#[derive(Debug, Clone)]
pub struct NoticeLayer {
    /// Destination slot.
    notices: Notices,
}

impl<S> Layer<S> for NoticeLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Level ordering is inverted: ERROR < WARN < INFO.
        if *event.metadata().level() > Level::WARN {
            return;
        }
        let mut opt = NoticeOptOut(false);
        event.record(&mut opt);
        if opt.0 {
            return;
        }
        let r = render_event(event);
        *self.notices.last.lock() = Some(r);
    }
}

/// Detects a `notice = false` field.
struct NoticeOptOut(bool);

impl Visit for NoticeOptOut {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "notice" && !value {
            self.0 = true;
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

#[cfg(test)]
mod tests {
    use tracing::{debug, error, info, subscriber, warn};
    use tracing_subscriber::{layer::SubscriberExt, registry};

    use super::*;

    #[test]
    fn records_only_warnings_and_errors() {
        let notices = Notices::new();
        let sub = registry().with(notices.layer());
        subscriber::with_default(sub, || {
            info!("started");
            assert!(notices.last().is_none());

            warn!(path = "/tmp/prefs.ron", "prefs_write_failed");
            let n = notices.last().expect("warn recorded");
            assert_eq!(n.level, Level::WARN);
            assert_eq!(n.message, "prefs_write_failed path=\"/tmp/prefs.ron\"");

            debug!("noise");
            assert_eq!(notices.last().map(|n| n.level), Some(Level::WARN));

            error!(code = 3, "tap_start_failed");
            let n = notices.last().expect("error recorded");
            assert_eq!(n.level, Level::ERROR);
            assert_eq!(n.message, "tap_start_failed code=3");
        });
    }

    #[test]
    fn self_recovering_warnings_are_not_recorded() {
        let notices = Notices::new();
        let sub = registry().with(notices.layer());
        subscriber::with_default(sub, || {
            warn!(
                notice = false,
                event = "DisabledByTimeout",
                "tap_disabled_by_os_reenabling"
            );
            assert!(notices.last().is_none());

            warn!(notice = true, "prefs_read_failed");
            assert_eq!(
                notices.last().map(|n| n.message),
                Some("prefs_read_failed notice=true".to_string())
            );

            warn!(notice = false, "tap_disabled_by_os_reenabling");
            assert_eq!(
                notices.last().map(|n| n.message),
                Some("prefs_read_failed notice=true".to_string())
            );
        });
    }
}
