//! Shared test helpers for the treegrate integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::Level;
use serde_json::Value;

use treegrate::logging::{AuditSink, FactsEmitter};
use treegrate::policy::Policy;
use treegrate::Migrator;

/// In-memory emitter capturing facts during tests.
#[derive(Clone, Default, Debug)]
pub struct TestEmitter {
    pub events: Arc<Mutex<Vec<(String, String, String, Value)>>>,
}

impl FactsEmitter for TestEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        self.events.lock().unwrap().push((
            subsystem.to_string(),
            event.to_string(),
            decision.to_string(),
            fields,
        ));
    }
}

/// Audit sink capturing human-readable lines.
#[derive(Clone, Default, Debug)]
pub struct TestAudit {
    pub lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl AuditSink for TestAudit {
    fn log(&self, level: Level, msg: &str) {
        self.lines.lock().unwrap().push((level, msg.to_string()));
    }
}

/// A migrator over the real filesystem with capturing sinks.
pub fn migrator(policy: Policy) -> Migrator<TestEmitter, TestAudit> {
    Migrator::new(TestEmitter::default(), TestAudit::default(), policy)
}

/// Create a temporary root directory for real-filesystem tests.
pub fn with_temp_root() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}

/// Byte-level snapshot of a real directory tree: path -> file bytes, `None`
/// for directories.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    let mut out = BTreeMap::new();
    walk(root, &mut out);
    out
}

fn walk(dir: &Path, out: &mut BTreeMap<PathBuf, Option<Vec<u8>>>) {
    for entry in std::fs::read_dir(dir).expect("read_dir") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            out.insert(path.clone(), None);
            walk(&path, out);
        } else {
            out.insert(path.clone(), Some(std::fs::read(&path).expect("read file")));
        }
    }
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parents");
    }
    std::fs::write(path, content).expect("write file");
}
