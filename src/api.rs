// Facade for the API module; the execute driver lives in src/api/execute.rs.

use crate::fs::{Filesystem, RealFilesystem};
use crate::logging::{AuditCtx, AuditSink, Decision, FactsEmitter, StageLogger};
use crate::policy::Policy;
use crate::types::ids::plan_id;
use crate::types::{ExecMode, ExecutionReport, Plan, ValidationError, ValidationReport};

#[path = "api/execute.rs"]
mod execute_impl;

/// The migration executor facade: a pure function of (plan, filesystem state,
/// mode) into a report, with the filesystem behind a swappable capability.
pub struct Migrator<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    policy: Policy,
    fs: Box<dyn Filesystem>,
}

impl<E: FactsEmitter, A: AuditSink> Migrator<E, A> {
    pub fn new(facts: E, audit: A, policy: Policy) -> Self {
        Self {
            facts,
            audit,
            policy,
            fs: Box::new(RealFilesystem),
        }
    }

    /// Swap the filesystem capability, e.g. for an in-memory tree in tests.
    #[must_use]
    pub fn with_filesystem(mut self, fs: Box<dyn Filesystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Validate the plan without executing it, emitting one fact per
    /// violation.
    pub fn validate(&self, plan: &Plan) -> ValidationReport {
        let violations = match crate::validate::validate(plan) {
            Ok(()) => Vec::new(),
            Err(v) => v,
        };
        let ctx = AuditCtx::new(
            &self.facts,
            plan_id(plan).to_string(),
            crate::logging::now_iso(),
            false,
        );
        let slog = StageLogger::new(&ctx);
        for v in &violations {
            slog.validate()
                .path(v.source_path().display().to_string())
                .field("violation", serde_json::json!(v.to_string()))
                .emit(Decision::Failure);
        }
        ValidationReport {
            ok: violations.is_empty(),
            violations,
        }
    }

    /// Execute the plan. Validation failures abort the whole run before any
    /// filesystem access; operation failures are recorded and the run
    /// continues, so a returned report always covers the full plan.
    pub fn execute(
        &self,
        plan: &Plan,
        mode: ExecMode,
    ) -> Result<ExecutionReport, Vec<ValidationError>> {
        execute_impl::run(self, plan, mode)
    }
}
