//! Typed facts emission across run stages.
//!
//! Every fact carries a minimal envelope: `schema_version`, `ts`, `plan_id`,
//! `stage`, `decision`, plus stage-specific fields. In dry-run the envelope
//! timestamp is zeroed and volatile fields are dropped (see `redact`).

use serde_json::{json, Map, Value};

use crate::constants::SUBSYSTEM;

use super::facts::FactsEmitter;
use super::redact::redact_event;

pub(crate) const SCHEMA_VERSION: i64 = 1;

/// Shared context for one run's facts.
pub struct AuditCtx<'a> {
    pub facts: &'a dyn FactsEmitter,
    pub plan_id: String,
    pub ts: String,
    pub redact: bool,
}

impl<'a> AuditCtx<'a> {
    pub fn new(facts: &'a dyn FactsEmitter, plan_id: String, ts: String, redact: bool) -> Self {
        Self {
            facts,
            plan_id,
            ts,
            redact,
        }
    }
}

/// Stage for typed fact emission.
#[derive(Clone, Copy, Debug)]
pub enum Stage {
    Validate,
    Resolve,
    ApplyAttempt,
    ApplyResult,
    Summary,
}

impl Stage {
    const fn as_event(self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Resolve => "resolve",
            Stage::ApplyAttempt => "apply.attempt",
            Stage::ApplyResult => "apply.result",
            Stage::Summary => "summary",
        }
    }
}

/// Decision severity for fact events.
#[derive(Clone, Copy, Debug)]
pub enum Decision {
    Success,
    Failure,
    Warn,
}

impl Decision {
    const fn as_str(self) -> &'static str {
        match self {
            Decision::Success => "success",
            Decision::Failure => "failure",
            Decision::Warn => "warn",
        }
    }
}

/// Builder facade over fact emission with a centralized envelope.
pub struct StageLogger<'a> {
    ctx: &'a AuditCtx<'a>,
}

impl<'a> StageLogger<'a> {
    pub fn new(ctx: &'a AuditCtx<'a>) -> Self {
        Self { ctx }
    }

    pub fn validate(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Validate)
    }
    pub fn resolve(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Resolve)
    }
    pub fn apply_attempt(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::ApplyAttempt)
    }
    pub fn apply_result(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::ApplyResult)
    }
    pub fn summary(&'a self) -> EventBuilder<'a> {
        EventBuilder::new(self.ctx, Stage::Summary)
    }
}

pub struct EventBuilder<'a> {
    ctx: &'a AuditCtx<'a>,
    stage: Stage,
    fields: Map<String, Value>,
}

impl<'a> EventBuilder<'a> {
    fn new(ctx: &'a AuditCtx<'a>, stage: Stage) -> Self {
        let mut fields = Map::new();
        fields.insert("stage".to_string(), json!(stage.as_event()));
        Self { ctx, stage, fields }
    }

    pub fn op(mut self, op_id: impl Into<String>) -> Self {
        self.fields.insert("op_id".into(), json!(op_id.into()));
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.fields.insert("path".into(), json!(path.into()));
        self
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn emit(self, decision: Decision) {
        let mut fields = Value::Object(self.fields);
        if let Some(obj) = fields.as_object_mut() {
            obj.insert("schema_version".into(), json!(SCHEMA_VERSION));
            obj.insert("ts".into(), json!(self.ctx.ts));
            obj.insert("plan_id".into(), json!(self.ctx.plan_id));
            obj.entry("decision").or_insert(json!(decision.as_str()));
        }
        if self.ctx.redact {
            fields = redact_event(fields);
        }
        self.ctx
            .facts
            .emit(SUBSYSTEM, self.stage.as_event(), decision.as_str(), fields);
    }
}
