//! Plan validation: structural checks over the whole plan, aggregated so the
//! operator can fix every defect in one pass. Read-only; never touches the
//! filesystem.
//!
//! Success means the plan is structurally executable. It does not guarantee
//! the filesystem will permit execution; that is discovered per operation at
//! execution time.

use crate::types::{ActionField, Plan, PlanEntry, SourceAction, ValidationError};

/// Validate every entry and return all violations together, each tagged with
/// the offending entry's source path.
pub fn validate(plan: &Plan) -> Result<(), Vec<ValidationError>> {
    let mut violations = Vec::new();
    for entry in &plan.entries {
        check_entry(entry, &mut violations);
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_entry(entry: &PlanEntry, out: &mut Vec<ValidationError>) {
    let action = match &entry.action {
        ActionField::NotDefined => {
            out.push(ValidationError::ActionNotDefined {
                source: entry.source.clone(),
            });
            return;
        }
        ActionField::Unrecognized(value) => {
            out.push(ValidationError::UnrecognizedAction {
                source: entry.source.clone(),
                value: value.clone(),
            });
            return;
        }
        ActionField::Action(a) => *a,
    };

    let has_target = entry
        .target
        .as_ref()
        .is_some_and(|t| !t.as_os_str().is_empty());

    if action.requires_target() {
        if !has_target {
            out.push(ValidationError::MissingTarget {
                source: entry.source.clone(),
                action,
            });
        } else if entry.target.as_deref() == Some(entry.source.as_path()) {
            out.push(ValidationError::TargetEqualsSource {
                source: entry.source.clone(),
            });
        }
    } else if has_target {
        out.push(ValidationError::UnexpectedTarget {
            source: entry.source.clone(),
            action,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn entry(action: SourceAction, target: Option<&str>) -> PlanEntry {
        PlanEntry::new("data/src", action, target.map(PathBuf::from))
    }

    #[test]
    fn well_formed_plan_passes() {
        let plan = Plan::new(vec![
            entry(SourceAction::Ignore, None),
            entry(SourceAction::Delete, None),
            entry(SourceAction::Copy, Some("data/dst")),
            entry(SourceAction::Move, Some("data/dst2")),
        ]);
        assert!(validate(&plan).is_ok());
    }

    #[test]
    fn all_violations_are_aggregated() {
        let plan = Plan::new(vec![
            PlanEntry::from_cells("a", "Archive", ""),
            PlanEntry::from_cells("b", "", ""),
            entry(SourceAction::Move, None),
            entry(SourceAction::Delete, Some("x")),
        ]);
        let errs = validate(&plan).unwrap_err();
        assert_eq!(errs.len(), 4);
        assert_eq!(errs[0].source_path(), Path::new("a"));
        assert!(matches!(errs[0], ValidationError::UnrecognizedAction { .. }));
        assert!(matches!(errs[1], ValidationError::ActionNotDefined { .. }));
        assert!(matches!(errs[2], ValidationError::MissingTarget { .. }));
        assert!(matches!(errs[3], ValidationError::UnexpectedTarget { .. }));
    }

    #[test]
    fn target_equal_to_source_is_rejected() {
        let plan = Plan::new(vec![PlanEntry::new(
            "same/path",
            SourceAction::Copy,
            Some(PathBuf::from("same/path")),
        )]);
        let errs = validate(&plan).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], ValidationError::TargetEqualsSource { .. }));
    }

    #[test]
    fn empty_target_counts_as_missing() {
        let plan = Plan::new(vec![entry(SourceAction::Copy, Some(""))]);
        let errs = validate(&plan).unwrap_err();
        assert!(matches!(errs[0], ValidationError::MissingTarget { .. }));
    }
}
