//! In-memory implementation of the [`Filesystem`] capability trait.
//!
//! Backs unit and integration tests: a run against it can be snapshotted
//! before and after to prove dry-run leaves the tree untouched, and failure
//! paths can be staged without a real disk.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{Filesystem, NodeKind};

#[derive(Clone, Debug, PartialEq, Eq)]
enum MemNode {
    File(Vec<u8>),
    Dir,
}

/// A process-local tree of files and directories keyed by path.
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    nodes: Mutex<BTreeMap<PathBuf, MemNode>>,
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{}: not found", path.display()))
}

fn already_exists(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{}: already exists", path.display()),
    )
}

fn in_subtree(path: &Path, root: &Path) -> bool {
    path == root || path.starts_with(root)
}

fn rebase(path: &Path, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(rel) if !rel.as_os_str().is_empty() => to.join(rel),
        _ => to.to_path_buf(),
    }
}

impl MemoryFilesystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, MemNode>> {
        self.nodes.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Insert a directory, creating missing ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.guard();
        for anc in ancestors_bottom_up(path.as_ref()) {
            nodes.entry(anc).or_insert(MemNode::Dir);
        }
    }

    /// Insert a file with the given content, creating missing ancestors.
    pub fn add_file(&self, path: impl AsRef<Path>, content: &[u8]) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.add_dir(parent);
            }
        }
        self.guard()
            .insert(path.to_path_buf(), MemNode::File(content.to_vec()));
    }

    /// File content, when `path` is a file.
    #[must_use]
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.guard().get(path.as_ref()) {
            Some(MemNode::File(c)) => Some(c.clone()),
            _ => None,
        }
    }

    /// Full tree state: path -> file bytes, or `None` for directories.
    /// Byte-identical snapshots before and after a dry run prove it mutated
    /// nothing.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
        self.guard()
            .iter()
            .map(|(p, n)| {
                let content = match n {
                    MemNode::File(c) => Some(c.clone()),
                    MemNode::Dir => None,
                };
                (p.clone(), content)
            })
            .collect()
    }
}

fn ancestors_bottom_up(path: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = path
        .ancestors()
        .filter(|a| !a.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .collect();
    out.reverse();
    out
}

impl Filesystem for MemoryFilesystem {
    fn kind_of(&self, path: &Path) -> NodeKind {
        match self.guard().get(path) {
            Some(MemNode::File(_)) => NodeKind::File,
            Some(MemNode::Dir) => NodeKind::Dir,
            None => NodeKind::Missing,
        }
    }

    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let nodes = self.guard();
        match nodes.get(dir) {
            Some(MemNode::Dir) => {}
            Some(MemNode::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("{}: not a directory", dir.display()),
                ))
            }
            None => return Err(not_found(dir)),
        }
        // BTreeMap iteration keeps children sorted.
        Ok(nodes
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        let mut nodes = self.guard();
        for anc in ancestors_bottom_up(dir) {
            match nodes.get(&anc) {
                Some(MemNode::File(_)) => return Err(already_exists(&anc)),
                Some(MemNode::Dir) => {}
                None => {
                    nodes.insert(anc, MemNode::Dir);
                }
            }
        }
        Ok(())
    }

    fn copy(&self, src: &Path, dst: &Path, exclude: &[PathBuf]) -> io::Result<()> {
        let mut nodes = self.guard();
        if !nodes.contains_key(src) {
            return Err(not_found(src));
        }
        if nodes.contains_key(dst) {
            return Err(already_exists(dst));
        }
        let copied: Vec<(PathBuf, MemNode)> = nodes
            .iter()
            .filter(|(p, _)| in_subtree(p, src))
            .filter(|(p, _)| !exclude.iter().any(|e| in_subtree(p, e)))
            .map(|(p, n)| (rebase(p, src, dst), n.clone()))
            .collect();
        nodes.extend(copied);
        Ok(())
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        let mut nodes = self.guard();
        if !nodes.contains_key(src) {
            return Err(not_found(src));
        }
        if nodes.contains_key(dst) {
            return Err(already_exists(dst));
        }
        let moved: Vec<PathBuf> = nodes
            .keys()
            .filter(|p| in_subtree(p, src))
            .cloned()
            .collect();
        for p in moved {
            if let Some(n) = nodes.remove(&p) {
                nodes.insert(rebase(&p, src, dst), n);
            }
        }
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.guard();
        if !nodes.contains_key(path) {
            return Err(not_found(path));
        }
        let doomed: Vec<PathBuf> = nodes
            .keys()
            .filter(|p| in_subtree(p, path))
            .cloned()
            .collect();
        for p in doomed {
            nodes.remove(&p);
        }
        Ok(())
    }

    fn remove_dir_if_empty(&self, dir: &Path) -> io::Result<bool> {
        let mut nodes = self.guard();
        match nodes.get(dir) {
            Some(MemNode::Dir) => {}
            _ => return Ok(false),
        }
        let has_children = nodes.keys().any(|p| p.parent() == Some(dir));
        if has_children {
            return Ok(false);
        }
        nodes.remove(dir);
        Ok(true)
    }
}
