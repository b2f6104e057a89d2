//! The execute() driver: validate, shape, resolve, apply, report.

use std::time::Instant;

use log::Level;
use serde_json::json;

use crate::logging::{ts_for_mode, AuditCtx, AuditSink, Decision, FactsEmitter, StageLogger};
use crate::normalize;
use crate::resolve::{resolve, ResolvedOp};
use crate::types::ids::{op_id, plan_id};
use crate::types::{
    ExecMode, ExecutionReport, FailureKind, OpKind, OperationRecord, Outcome, Plan,
    ValidationError,
};

use super::Migrator;

pub(super) fn run<E: FactsEmitter, A: AuditSink>(
    api: &Migrator<E, A>,
    plan: &Plan,
    mode: ExecMode,
) -> Result<ExecutionReport, Vec<ValidationError>> {
    let t0 = Instant::now();
    let dry = matches!(mode, ExecMode::DryRun);
    let pid = plan_id(plan);
    let ctx = AuditCtx::new(&api.facts, pid.to_string(), ts_for_mode(mode), dry);
    let slog = StageLogger::new(&ctx);

    // Plan-level fail-fast: nothing executes while any entry is defective.
    if let Err(violations) = crate::validate::validate(plan) {
        for v in &violations {
            slog.validate()
                .path(v.source_path().display().to_string())
                .field("violation", json!(v.to_string()))
                .emit(Decision::Failure);
            api.audit.log(Level::Error, &format!("invalid plan: {v}"));
        }
        return Err(violations);
    }

    let shaped = if api.policy.fold_encapsulated {
        normalize::fold_encapsulated(&plan.entries, &api.audit)
    } else {
        normalize::passthrough(&plan.entries)
    };
    let shaped = if api.policy.order_by_depth {
        normalize::order_by_depth(shaped)
    } else {
        shaped
    };

    let mut records: Vec<OperationRecord> = Vec::new();
    let mut idx = 0usize;
    for (entry, exclude) in &shaped {
        let resolution = resolve(entry, exclude, api.fs.as_ref());
        slog.resolve()
            .path(entry.source.display().to_string())
            .field("ops", json!(resolution.ops.len()))
            .emit(Decision::Success);

        for op in resolution.ops {
            let oid = op_id(&pid, op.kind, &op.source, idx);
            idx += 1;
            slog.apply_attempt()
                .op(oid.to_string())
                .path(op.source.display().to_string())
                .field("kind", json!(op.kind.as_str()))
                .emit(Decision::Success);

            let outcome = apply_op(&op, dry, api);
            let record = OperationRecord {
                kind: op.kind,
                source: op.source,
                dest: op.dest,
                entry_source: op.entry_source,
                outcome,
            };

            let decision = if record.outcome.is_failed() {
                Decision::Failure
            } else {
                Decision::Success
            };
            let mut ev = slog
                .apply_result()
                .op(oid.to_string())
                .path(record.source.display().to_string())
                .field("kind", json!(record.kind.as_str()));
            if let Outcome::Failed { kind, reason } = &record.outcome {
                ev = ev.field("failure", json!({ "kind": kind, "reason": reason }));
            }
            ev.emit(decision);

            let level = if record.outcome.is_failed() {
                Level::Warn
            } else {
                Level::Info
            };
            api.audit.log(level, &record.line());
            records.push(record);
        }

        // A merge-mode move leaves the source directory behind; remove it
        // only when the per-child moves emptied it. Not a report line.
        if let Some(dir) = resolution.merge_cleanup {
            if !dry {
                match api.fs.remove_dir_if_empty(&dir) {
                    Ok(true) => api
                        .audit
                        .log(Level::Info, &format!("removed emptied {}", dir.display())),
                    Ok(false) => {}
                    Err(e) => api.audit.log(
                        Level::Warn,
                        &format!("could not remove {}: {e}", dir.display()),
                    ),
                }
            }
        }
    }

    let duration_ms = t0.elapsed().as_millis() as u64;
    let report = ExecutionReport {
        records,
        duration_ms,
        plan_uuid: Some(pid),
    };
    slog.summary()
        .field("operations", json!(report.records.len()))
        .field("failed", json!(report.failed()))
        .field("duration_ms", json!(duration_ms))
        .emit(if report.is_clean() {
            Decision::Success
        } else {
            Decision::Warn
        });
    Ok(report)
}

/// `Pending -> Applied | Skipped | Failed`. Pre-flight existence checks run
/// in both modes so a dry-run report matches what live mode would do against
/// the same starting state; only live mode mutates.
fn apply_op<E: FactsEmitter, A: AuditSink>(
    op: &ResolvedOp,
    dry: bool,
    api: &Migrator<E, A>,
) -> Outcome {
    let fs = api.fs.as_ref();
    match op.kind {
        OpKind::Noop => Outcome::Skipped,
        OpKind::Delete => {
            if !fs.exists(&op.source) {
                return failed(FailureKind::SourceMissing, "source no longer exists");
            }
            if dry {
                return Outcome::Applied;
            }
            match fs.remove(&op.source) {
                Ok(()) => Outcome::Applied,
                Err(e) => failed(FailureKind::Io, e.to_string()),
            }
        }
        OpKind::Copy | OpKind::Move => {
            let Some(dest) = op.dest.as_deref() else {
                return failed(FailureKind::Io, "resolved operation has no destination");
            };
            if !fs.exists(&op.source) {
                return failed(FailureKind::SourceMissing, "source no longer exists");
            }
            if fs.exists(dest) {
                return failed(FailureKind::AlreadyExists, "destination already exists");
            }
            if dry {
                return Outcome::Applied;
            }
            if let Some(parent) = dest.parent() {
                if !parent.as_os_str().is_empty() && !fs.exists(parent) {
                    if let Err(e) = fs.create_dir_all(parent) {
                        return failed(
                            FailureKind::Io,
                            format!("creating {}: {e}", parent.display()),
                        );
                    }
                }
            }
            if op.kind == OpKind::Copy {
                match fs.copy(&op.source, dest, &op.exclude) {
                    Ok(()) => Outcome::Applied,
                    Err(e) => failed(FailureKind::Io, e.to_string()),
                }
            } else {
                apply_move(op, dest, api)
            }
        }
    }
}

/// Rename first; optionally degrade to copy-then-remove. The two phases of a
/// degraded move fail with distinct reasons: a copy-phase failure left the
/// filesystem unchanged, a cleanup-phase failure created the destination but
/// kept the source in place.
fn apply_move<E: FactsEmitter, A: AuditSink>(
    op: &ResolvedOp,
    dest: &std::path::Path,
    api: &Migrator<E, A>,
) -> Outcome {
    let fs = api.fs.as_ref();
    match fs.rename(&op.source, dest) {
        Ok(()) => Outcome::Applied,
        Err(rename_err) => {
            if !api.policy.degraded_move_fallback {
                return failed(FailureKind::Io, rename_err.to_string());
            }
            api.audit.log(
                Level::Warn,
                &format!(
                    "rename of {} failed ({rename_err}); degrading to copy+remove",
                    op.source.display()
                ),
            );
            if let Err(e) = fs.copy(&op.source, dest, &op.exclude) {
                return failed(FailureKind::Io, format!("move copy phase: {e}"));
            }
            match fs.remove(&op.source) {
                Ok(()) => Outcome::Applied,
                Err(e) => failed(
                    FailureKind::Io,
                    format!(
                        "move cleanup phase: destination created but source left in place: {e}"
                    ),
                ),
            }
        }
    }
}

fn failed(kind: FailureKind, reason: impl Into<String>) -> Outcome {
    Outcome::Failed {
        kind,
        reason: reason.into(),
    }
}
