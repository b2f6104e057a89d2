//! Dry-run redaction: zeroed timestamps and stripped volatile fields so a
//! dry-run fact stream is deterministic and comparable across runs.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::types::ExecMode;

pub const TS_ZERO: &str = "1970-01-01T00:00:00Z";

pub fn now_iso() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| TS_ZERO.to_string())
}

/// Timestamp for facts emission based on mode: constant in dry-run for
/// determinism, real RFC3339 in live mode.
pub fn ts_for_mode(mode: ExecMode) -> String {
    match mode {
        ExecMode::DryRun => TS_ZERO.to_string(),
        ExecMode::Live => now_iso(),
    }
}

/// Zero the timestamp and drop volatile timing fields from a fact event.
pub fn redact_event(mut v: Value) -> Value {
    if let Some(obj) = v.as_object_mut() {
        obj.insert("ts".into(), Value::String(TS_ZERO.to_string()));
        obj.remove("duration_ms");
    }
    v
}
