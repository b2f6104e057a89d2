//! Emission seams: structured facts and human-readable audit lines.

use log::Level;
use serde_json::{json, Value};

/// Receives one structured fact per pipeline event.
pub trait FactsEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

/// Receives human-readable report/progress lines.
pub trait AuditSink {
    fn log(&self, level: Level, msg: &str);
}

/// Default sink: forwards facts as JSON lines and audit text to the `log`
/// facade. Host applications that want their own transport implement the
/// traits directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonlSink;

impl FactsEmitter for JsonlSink {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        log::debug!(
            target: "treegrate::facts",
            "{}",
            json!({
                "subsystem": subsystem,
                "event": event,
                "decision": decision,
                "fields": fields,
            })
        );
    }
}

impl AuditSink for JsonlSink {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: "treegrate::audit", level, "{msg}");
    }
}
