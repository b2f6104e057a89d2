//! Degraded move fallback: when a rename fails, policy may allow
//! copy-then-remove, and each phase's failure is surfaced distinctly in the
//! recorded reason.

mod common;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::{TestAudit, TestEmitter};
use treegrate::fs::{Filesystem, MemoryFilesystem, NodeKind};
use treegrate::policy::Policy;
use treegrate::types::{ExecMode, FailureKind, Outcome, Plan, PlanEntry, SourceAction};
use treegrate::Migrator;

/// Wraps an in-memory tree and fails selected primitives, staging the
/// conditions a real disk produces (cross-device renames, full disks,
/// permission refusals).
struct FaultyFs {
    inner: Arc<MemoryFilesystem>,
    fail_rename: bool,
    fail_copy: bool,
    fail_remove: bool,
}

impl FaultyFs {
    fn new(inner: Arc<MemoryFilesystem>) -> Self {
        Self {
            inner,
            fail_rename: false,
            fail_copy: false,
            fail_remove: false,
        }
    }
}

impl Filesystem for FaultyFs {
    fn kind_of(&self, path: &Path) -> NodeKind {
        self.inner.kind_of(path)
    }

    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.inner.list_children(dir)
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        self.inner.create_dir_all(dir)
    }

    fn copy(&self, src: &Path, dst: &Path, exclude: &[PathBuf]) -> io::Result<()> {
        if self.fail_copy {
            return Err(io::Error::new(
                io::ErrorKind::StorageFull,
                "no space left on device",
            ));
        }
        self.inner.copy(src, dst, exclude)
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        if self.fail_rename {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "cross-device link",
            ));
        }
        self.inner.rename(src, dst)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if self.fail_remove {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.inner.remove(path)
    }

    fn remove_dir_if_empty(&self, dir: &Path) -> io::Result<bool> {
        self.inner.remove_dir_if_empty(dir)
    }
}

fn seeded() -> Arc<MemoryFilesystem> {
    let fs = Arc::new(MemoryFilesystem::new());
    fs.add_file("in/data.bin", b"payload");
    fs.add_dir("out");
    fs
}

fn move_plan() -> Plan {
    Plan::new(vec![PlanEntry::new(
        "in/data.bin",
        SourceAction::Move,
        Some("out/data.bin".into()),
    )])
}

fn api(fs: FaultyFs, policy: Policy) -> Migrator<TestEmitter, TestAudit> {
    Migrator::new(TestEmitter::default(), TestAudit::default(), policy)
        .with_filesystem(Box::new(fs))
}

fn failure_reason(outcome: &Outcome) -> (&FailureKind, &str) {
    match outcome {
        Outcome::Failed { kind, reason } => (kind, reason.as_str()),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn fallback_completes_the_move_when_rename_fails() {
    let inner = seeded();
    let fs = FaultyFs {
        fail_rename: true,
        ..FaultyFs::new(inner.clone())
    };
    let policy = Policy {
        degraded_move_fallback: true,
        ..Policy::default()
    };

    let report = api(fs, policy)
        .execute(&move_plan(), ExecMode::Live)
        .expect("valid plan");

    assert_eq!(report.records[0].outcome, Outcome::Applied);
    assert_eq!(inner.kind_of(Path::new("in/data.bin")), NodeKind::Missing);
    assert_eq!(inner.read_file("out/data.bin"), Some(b"payload".to_vec()));
}

#[test]
fn copy_phase_failure_names_the_phase_and_leaves_the_tree_unchanged() {
    let inner = seeded();
    let fs = FaultyFs {
        fail_rename: true,
        fail_copy: true,
        ..FaultyFs::new(inner.clone())
    };
    let policy = Policy {
        degraded_move_fallback: true,
        ..Policy::default()
    };

    let report = api(fs, policy)
        .execute(&move_plan(), ExecMode::Live)
        .expect("valid plan");

    let (kind, reason) = failure_reason(&report.records[0].outcome);
    assert_eq!(*kind, FailureKind::Io);
    assert!(reason.contains("move copy phase"), "reason: {reason}");
    assert_eq!(inner.read_file("in/data.bin"), Some(b"payload".to_vec()));
    assert_eq!(inner.kind_of(Path::new("out/data.bin")), NodeKind::Missing);
}

#[test]
fn cleanup_phase_failure_reports_destination_created_source_left() {
    let inner = seeded();
    let fs = FaultyFs {
        fail_rename: true,
        fail_remove: true,
        ..FaultyFs::new(inner.clone())
    };
    let policy = Policy {
        degraded_move_fallback: true,
        ..Policy::default()
    };

    let report = api(fs, policy)
        .execute(&move_plan(), ExecMode::Live)
        .expect("valid plan");

    let (kind, reason) = failure_reason(&report.records[0].outcome);
    assert_eq!(*kind, FailureKind::Io);
    assert!(reason.contains("move cleanup phase"), "reason: {reason}");
    assert!(reason.contains("destination created"), "reason: {reason}");
    // half-completed: both sides exist, and the report says so
    assert_eq!(inner.read_file("in/data.bin"), Some(b"payload".to_vec()));
    assert_eq!(inner.read_file("out/data.bin"), Some(b"payload".to_vec()));
}

#[test]
fn without_fallback_a_failed_rename_is_a_plain_io_failure() {
    let inner = seeded();
    let fs = FaultyFs {
        fail_rename: true,
        ..FaultyFs::new(inner.clone())
    };

    let report = api(fs, Policy::default())
        .execute(&move_plan(), ExecMode::Live)
        .expect("valid plan");

    let (kind, reason) = failure_reason(&report.records[0].outcome);
    assert_eq!(*kind, FailureKind::Io);
    assert!(!reason.contains("phase"), "reason: {reason}");
    assert_eq!(inner.read_file("in/data.bin"), Some(b"payload".to_vec()));
    assert_eq!(inner.kind_of(Path::new("out/data.bin")), NodeKind::Missing);
}
