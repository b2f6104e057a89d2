//! Plan data model: entries are immutable value records produced by the plan
//! source collaborator and consumed read-only by the validator, resolver, and
//! executor.

use std::fmt;
use std::path::PathBuf;

/// Execution mode for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    /// Compute and report operations without touching the filesystem.
    DryRun,
    /// Apply operations to the filesystem.
    Live,
}

impl Default for ExecMode {
    fn default() -> Self {
        ExecMode::DryRun
    }
}

/// The closed set of actions a plan entry may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceAction {
    Ignore,
    Copy,
    Move,
    Delete,
}

impl SourceAction {
    /// Parse the user-facing cell value, exactly as displayed in the sheet.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Ignore" => Some(SourceAction::Ignore),
            "Copy" => Some(SourceAction::Copy),
            "Move" => Some(SourceAction::Move),
            "Delete" => Some(SourceAction::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SourceAction::Ignore => "Ignore",
            SourceAction::Copy => "Copy",
            SourceAction::Move => "Move",
            SourceAction::Delete => "Delete",
        }
    }

    /// Copy and Move require a target; Ignore and Delete forbid one.
    #[must_use]
    pub const fn requires_target(self) -> bool {
        matches!(self, SourceAction::Copy | SourceAction::Move)
    }
}

impl fmt::Display for SourceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action cell of a plan row. A blank cell and an unknown value are both
/// representable so the validator can report them in aggregate; neither is
/// executable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionField {
    Action(SourceAction),
    Unrecognized(String),
    NotDefined,
}

impl ActionField {
    /// Build from a raw sheet cell. Blank (or whitespace-only) means the row
    /// was never addressed by the operator.
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return ActionField::NotDefined;
        }
        match SourceAction::parse(trimmed) {
            Some(a) => ActionField::Action(a),
            None => ActionField::Unrecognized(trimmed.to_string()),
        }
    }

    /// The parsed action, when the field holds one.
    #[must_use]
    pub fn action(&self) -> Option<SourceAction> {
        match self {
            ActionField::Action(a) => Some(*a),
            _ => None,
        }
    }
}

/// One row of intent: a source path, an action, and an optional target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanEntry {
    pub source: PathBuf,
    pub action: ActionField,
    pub target: Option<PathBuf>,
}

impl PlanEntry {
    pub fn new(
        source: impl Into<PathBuf>,
        action: SourceAction,
        target: Option<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            action: ActionField::Action(action),
            target,
        }
    }

    /// Build an entry from raw sheet cells without rejecting anything; the
    /// validator reports defects in aggregate.
    pub fn from_cells(source: impl Into<PathBuf>, action: &str, target: &str) -> Self {
        let target = target.trim();
        Self {
            source: source.into(),
            action: ActionField::from_cell(action),
            target: if target.is_empty() {
                None
            } else {
                Some(PathBuf::from(target))
            },
        }
    }
}

impl fmt::Display for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            ActionField::Action(a) => write!(f, "{} {}", a, self.source.display())?,
            ActionField::Unrecognized(v) => write!(f, "{v}? {}", self.source.display())?,
            ActionField::NotDefined => write!(f, "(no action) {}", self.source.display())?,
        }
        if let Some(t) = &self.target {
            write!(f, " -> {}", t.display())?;
        }
        Ok(())
    }
}

/// The full plan for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_parse_is_exact_on_displayed_casing() {
        assert_eq!(SourceAction::parse("Move"), Some(SourceAction::Move));
        assert_eq!(SourceAction::parse("move"), None);
        assert_eq!(SourceAction::parse("MOVE"), None);
    }

    #[test]
    fn blank_cell_is_not_defined_not_a_default() {
        assert_eq!(ActionField::from_cell("  "), ActionField::NotDefined);
        assert_eq!(
            ActionField::from_cell("Archive"),
            ActionField::Unrecognized("Archive".into())
        );
    }

    #[test]
    fn from_cells_drops_empty_target() {
        let e = PlanEntry::from_cells("a/b", "Delete", "");
        assert_eq!(e.target, None);
        let e = PlanEntry::from_cells("a/b", "Move", "c/d");
        assert_eq!(e.target, Some(PathBuf::from("c/d")));
    }
}
