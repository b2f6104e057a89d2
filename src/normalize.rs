//! Policy-gated plan shaping applied after validation and before resolution.
//!
//! Folding addresses encapsulated entries: a row whose source lives inside
//! another actioned row's subtree. Left alone, a `Move` of a parent directory
//! makes every child row's source vanish; folding collapses or rewrites such
//! rows up front. Only the nearest actioned, non-`Ignore` ancestor is
//! considered for each entry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::Level;

use crate::logging::AuditSink;
use crate::types::{ActionField, PlanEntry, SourceAction};

/// An entry paired with the subtrees excluded from its recursive copy.
pub type ShapedEntry = (PlanEntry, Vec<PathBuf>);

/// Wrap entries unchanged, with no exclusions.
pub fn passthrough(entries: &[PlanEntry]) -> Vec<ShapedEntry> {
    entries.iter().cloned().map(|e| (e, Vec::new())).collect()
}

/// Fold encapsulated entries:
/// - child action equals the ancestor's: drop the child, the ancestor's
///   whole-tree operation covers it;
/// - child `Ignore` under ancestor `Copy`: drop the child and exclude its
///   subtree from the ancestor's copy;
/// - child `Ignore` under ancestor `Move`: rewrite the child to `Delete`,
///   since the subtree stays behind when the parent's content moves away.
///
/// Anything else is kept as-is. Entry order is preserved.
pub fn fold_encapsulated(entries: &[PlanEntry], audit: &dyn AuditSink) -> Vec<ShapedEntry> {
    #[derive(Clone, Copy, PartialEq)]
    enum Fate {
        Keep,
        Drop,
        RewriteDelete,
    }

    let mut fates: HashMap<PathBuf, Fate> = entries
        .iter()
        .map(|e| (e.source.clone(), Fate::Keep))
        .collect();
    let mut excludes: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    let action_of: HashMap<&Path, SourceAction> = entries
        .iter()
        .filter_map(|e| e.action.action().map(|a| (e.source.as_path(), a)))
        .collect();

    for entry in entries {
        let Some(action) = entry.action.action() else {
            continue;
        };
        for parent in entry.source.ancestors().skip(1) {
            let Some(&parent_action) = action_of.get(parent) else {
                continue;
            };
            // A dropped ancestor no longer owns a whole-tree operation.
            if fates.get(parent) != Some(&Fate::Keep) || parent_action == SourceAction::Ignore {
                continue;
            }

            if parent_action == action {
                audit.log(
                    Level::Info,
                    &format!(
                        "folding {}: covered by {} on {}",
                        entry.source.display(),
                        parent_action,
                        parent.display()
                    ),
                );
                fates.insert(entry.source.clone(), Fate::Drop);
            } else if action == SourceAction::Ignore {
                match parent_action {
                    SourceAction::Copy => {
                        audit.log(
                            Level::Info,
                            &format!(
                                "excluding {} from copy of {}",
                                entry.source.display(),
                                parent.display()
                            ),
                        );
                        excludes
                            .entry(parent.to_path_buf())
                            .or_default()
                            .push(entry.source.clone());
                        fates.insert(entry.source.clone(), Fate::Drop);
                    }
                    SourceAction::Move => {
                        audit.log(
                            Level::Info,
                            &format!(
                                "converting ignored {} to delete: parent {} moves away",
                                entry.source.display(),
                                parent.display()
                            ),
                        );
                        fates.insert(entry.source.clone(), Fate::RewriteDelete);
                    }
                    _ => {}
                }
            }
            // Only the first matching ancestor decides.
            break;
        }
    }

    entries
        .iter()
        .filter_map(|e| match fates.get(&e.source) {
            Some(Fate::Drop) => None,
            Some(Fate::RewriteDelete) => Some((
                PlanEntry {
                    source: e.source.clone(),
                    action: ActionField::Action(SourceAction::Delete),
                    target: None,
                },
                Vec::new(),
            )),
            _ => Some((e.clone(), excludes.get(&e.source).cloned().unwrap_or_default())),
        })
        .collect()
}

/// Stable sort, deepest path first, so child operations run before an
/// ancestor's whole-tree operation.
pub fn order_by_depth(mut entries: Vec<ShapedEntry>) -> Vec<ShapedEntry> {
    entries.sort_by_key(|(e, _)| std::cmp::Reverse(e.source.components().count()));
    entries
}
