//! Action resolution: one validated entry plus live filesystem state becomes
//! one or more concrete operations.
//!
//! Resolution is structural and best-effort: a source that no longer exists
//! is not fatal here (a prior operation, such as a moved parent directory,
//! may already have satisfied the entry). Existence is re-checked when the
//! operation is applied.

use std::path::{Path, PathBuf};

use crate::fs::{Filesystem, NodeKind};
use crate::types::{OpKind, PlanEntry, SourceAction};

/// A concrete operation to apply against the filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOp {
    pub kind: OpKind,
    pub source: PathBuf,
    /// Absent for delete and noop.
    pub dest: Option<PathBuf>,
    /// The originating plan entry's source, for traceability.
    pub entry_source: PathBuf,
    /// Subtrees excluded from a recursive copy (encapsulated-entry folding).
    pub exclude: Vec<PathBuf>,
}

/// Everything one entry resolves to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryResolution {
    pub ops: Vec<ResolvedOp>,
    /// For a merge-mode move: the source directory to remove afterwards, but
    /// only if the per-child moves actually emptied it. Never a report line.
    pub merge_cleanup: Option<PathBuf>,
}

/// Case-insensitive base-name comparison. Deliberately a heuristic, not path
/// normalization: base names only, and only used directory-to-directory.
fn names_match_ci(a: &Path, b: &Path) -> bool {
    match (a.file_name(), b.file_name()) {
        (Some(x), Some(y)) => {
            x.to_string_lossy().to_lowercase() == y.to_string_lossy().to_lowercase()
        }
        _ => false,
    }
}

/// Resolve one entry. `exclude` carries subtrees folded out of this entry's
/// copy by normalization; it is empty otherwise.
pub fn resolve(entry: &PlanEntry, exclude: &[PathBuf], fs: &dyn Filesystem) -> EntryResolution {
    let Some(action) = entry.action.action() else {
        // Unvalidated entries do not reach the executor; resolve nothing.
        return EntryResolution::default();
    };

    match action {
        SourceAction::Ignore => single(OpKind::Noop, entry, None, exclude),
        SourceAction::Delete => single(OpKind::Delete, entry, None, exclude),
        SourceAction::Copy | SourceAction::Move => {
            let kind = if action == SourceAction::Copy {
                OpKind::Copy
            } else {
                OpKind::Move
            };
            let Some(target) = entry.target.clone() else {
                return EntryResolution::default();
            };
            if is_merge(entry, &target, fs) {
                merge(kind, entry, &target, exclude, fs)
            } else {
                single(kind, entry, Some(target), exclude)
            }
        }
    }
}

/// Merge mode: source is a directory, the target already exists as a
/// directory, and the two share a base name case-insensitively. The entry
/// then redirects the source directory's contents into the target instead of
/// replacing the target wholesale.
fn is_merge(entry: &PlanEntry, target: &Path, fs: &dyn Filesystem) -> bool {
    fs.kind_of(&entry.source) == NodeKind::Dir
        && fs.kind_of(target) == NodeKind::Dir
        && names_match_ci(&entry.source, target)
}

fn single(
    kind: OpKind,
    entry: &PlanEntry,
    dest: Option<PathBuf>,
    exclude: &[PathBuf],
) -> EntryResolution {
    EntryResolution {
        ops: vec![ResolvedOp {
            kind,
            source: entry.source.clone(),
            dest,
            entry_source: entry.source.clone(),
            exclude: exclude.to_vec(),
        }],
        merge_cleanup: None,
    }
}

fn merge(
    kind: OpKind,
    entry: &PlanEntry,
    target: &Path,
    exclude: &[PathBuf],
    fs: &dyn Filesystem,
) -> EntryResolution {
    let children = match fs.list_children(&entry.source) {
        Ok(c) => c,
        // Enumeration failure degrades to a whole-entity op; the existing
        // target then surfaces as a no-overwrite failure at execution.
        Err(_) => return single(kind, entry, Some(target.to_path_buf()), exclude),
    };
    let ops = children
        .into_iter()
        .filter(|child| !exclude.iter().any(|e| e == child))
        .filter_map(|child| {
            let name = child.file_name()?.to_os_string();
            Some(ResolvedOp {
                kind,
                source: child.clone(),
                dest: Some(target.join(name)),
                entry_source: entry.source.clone(),
                exclude: exclude.to_vec(),
            })
        })
        .collect();
    EntryResolution {
        ops,
        merge_cleanup: (kind == OpKind::Move).then(|| entry.source.clone()),
    }
}
