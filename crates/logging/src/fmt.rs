//! Utilities to render `tracing` events into concise logfmt strings.
//!
//! Extracts level, target, and message from `tracing::Event` records and
//! renders remaining fields in `key=value` form.

use std::fmt::{Debug, Write};

use tracing::{
    Event, Level, Metadata,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level of the event.
    pub level: Level,
    /// Event target (typically the module path).
    pub target: String,
    /// The `message` field followed by any other fields as `key=value`.
    pub message: String,
}

/// Field visitor collecting the message and the remaining fields.
struct MsgVisitor {
    /// Captured `message` field, if present.
    msg: Option<String>,
    /// Accumulated non-message fields rendered as `key=value`.
    fields: String,
}

impl Visit for MsgVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.msg = Some(value.to_string());
        } else {
            let _ignored = write!(&mut self.fields, "{}=\"{}\" ", field.name(), value);
        }
    }
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.msg = Some(format!("{:?}", value));
        } else {
            let _ignored = write!(&mut self.fields, "{}={:?} ", field.name(), value);
        }
    }
}

/// Extract a concise (level, target, message) triple from a tracing Event.
///
/// Our events use snake_case event names as the message and carry context in
/// fields, so both are kept: `"prefs_write_failed path=\"/x\""`.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = MsgVisitor {
        msg: None,
        fields: String::new(),
    };
    event.record(&mut vis);
    let fields = vis.fields.trim_end();
    let message = match vis.msg {
        Some(m) if fields.is_empty() => m,
        Some(m) => format!("{m} {fields}"),
        None => fields.to_string(),
    };
    RenderedLog {
        level: *meta.level(),
        target: meta.target().to_string(),
        message,
    }
}
