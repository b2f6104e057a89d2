//! Deterministic UUIDv5 identifiers for plans and operations.
//!
//! The UUID namespace is derived from a stable tag (`NS_TAG`) so that
//! `plan_id` and `op_id` are reproducible across runs for the same entry
//! sequence, which keeps dry-run fact streams comparable.

use std::fmt::Write;
use std::path::Path;

use uuid::Uuid;

use crate::constants::NS_TAG;

use super::plan::{ActionField, Plan, PlanEntry, SourceAction};
use super::report::OpKind;

fn namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, NS_TAG.as_bytes())
}

/// Serialize an entry into a stable, human-readable string used for UUIDv5
/// input.
fn serialize_entry(e: &PlanEntry) -> String {
    let tag = match &e.action {
        ActionField::Action(SourceAction::Ignore) => "I".to_string(),
        ActionField::Action(SourceAction::Copy) => "C".to_string(),
        ActionField::Action(SourceAction::Move) => "M".to_string(),
        ActionField::Action(SourceAction::Delete) => "D".to_string(),
        ActionField::Unrecognized(v) => format!("U({v})"),
        ActionField::NotDefined => "?".to_string(),
    };
    let mut s = format!("{tag}:{}", e.source.display());
    if let Some(t) = &e.target {
        let _ = write!(s, "->{}", t.display());
    }
    s
}

/// Compute a deterministic UUIDv5 for a plan by serializing entries in order.
///
/// Two plans with identical entry sequences (including ordering) have the
/// same `plan_id`.
#[must_use]
pub fn plan_id(plan: &Plan) -> Uuid {
    let ns = namespace();
    let mut s = String::new();
    for e in &plan.entries {
        s.push_str(&serialize_entry(e));
        s.push('\n');
    }
    Uuid::new_v5(&ns, s.as_bytes())
}

/// Compute a deterministic UUIDv5 for a resolved operation as a function of
/// the plan ID, the operation kind and source, and its stable position index.
#[must_use]
pub fn op_id(plan_id: &Uuid, kind: OpKind, source: &Path, idx: usize) -> Uuid {
    let s = format!("{}:{}#{idx}", kind.as_str(), source.display());
    Uuid::new_v5(plan_id, s.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plan() -> Plan {
        Plan::new(vec![
            PlanEntry::new("a/b", SourceAction::Move, Some(PathBuf::from("c/b"))),
            PlanEntry::new("a/x", SourceAction::Delete, None),
        ])
    }

    #[test]
    fn plan_id_is_stable_across_calls() {
        assert_eq!(plan_id(&plan()), plan_id(&plan()));
    }

    #[test]
    fn plan_id_depends_on_entry_order() {
        let mut reordered = plan();
        reordered.entries.reverse();
        assert_ne!(plan_id(&plan()), plan_id(&reordered));
    }

    #[test]
    fn op_ids_differ_by_index() {
        let pid = plan_id(&plan());
        let p = Path::new("a/b");
        assert_ne!(op_id(&pid, OpKind::Move, p, 0), op_id(&pid, OpKind::Move, p, 1));
    }
}
