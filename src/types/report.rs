//! Execution and validation reports.

use std::path::PathBuf;

use serde::Serialize;
use uuid::Uuid;

use super::errors::ValidationError;

/// Concrete operation kind after resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Copy,
    Move,
    Delete,
    Noop,
}

impl OpKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OpKind::Copy => "copy",
            OpKind::Move => "move",
            OpKind::Delete => "delete",
            OpKind::Noop => "noop",
        }
    }
}

/// Why an operation failed. Existence failures are distinct from raw I/O so
/// callers can tell a policy refusal (no-overwrite) from a disk problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Destination already exists (no-overwrite rule).
    AlreadyExists,
    /// Source vanished between resolution and execution.
    SourceMissing,
    /// Underlying filesystem error.
    Io,
}

/// Terminal state of one operation: `Pending -> Applied | Skipped | Failed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Skipped,
    Failed { kind: FailureKind, reason: String },
}

impl Outcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// One line of the execution report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OperationRecord {
    pub kind: OpKind,
    pub source: PathBuf,
    pub dest: Option<PathBuf>,
    /// The originating plan entry's source, for traceability when a merge
    /// expanded one entry into several child operations.
    pub entry_source: PathBuf,
    pub outcome: Outcome,
}

impl OperationRecord {
    /// Human-readable report line: kind, source, destination (if any), outcome.
    #[must_use]
    pub fn line(&self) -> String {
        let mut s = format!("{} {}", self.kind.as_str(), self.source.display());
        if let Some(d) = &self.dest {
            s.push_str(&format!(" -> {}", d.display()));
        }
        match &self.outcome {
            Outcome::Applied => s.push_str(": applied"),
            Outcome::Skipped => s.push_str(": skipped"),
            Outcome::Failed { reason, .. } => s.push_str(&format!(": failed ({reason})")),
        }
        s
    }
}

/// Ordered record of everything a run did (or, in dry-run, would do).
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExecutionReport {
    pub records: Vec<OperationRecord>,
    pub duration_ms: u64,
    pub plan_uuid: Option<Uuid>,
}

impl ExecutionReport {
    /// Count of failed operations.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_failed()).count()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// Render the per-operation report lines in application order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(OperationRecord::line).collect()
    }
}

/// Outcome of `Migrator::validate`.
#[derive(Clone, Debug, Default)]
pub struct ValidationReport {
    pub ok: bool,
    pub violations: Vec<ValidationError>,
}
