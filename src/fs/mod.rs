//! Narrow filesystem capability surface.
//!
//! The executor never calls `std::fs` directly; everything goes through
//! [`Filesystem`] so a run can be driven against [`MemoryFilesystem`] in
//! tests and against [`RealFilesystem`] in production.

pub mod memory;
pub mod real;

pub use memory::MemoryFilesystem;
pub use real::RealFilesystem;

use std::io;
use std::path::{Path, PathBuf};

/// What a path currently refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
    Missing,
}

/// Capability interface for every mutation and existence check the executor
/// needs.
///
/// `copy` and `remove` operate on whole entities: a file, or a directory tree
/// recursively. `list_children` must enumerate in a deterministic (sorted)
/// order so merge expansions produce reproducible reports.
pub trait Filesystem {
    fn kind_of(&self, path: &Path) -> NodeKind;

    fn exists(&self, path: &Path) -> bool {
        self.kind_of(path) != NodeKind::Missing
    }

    /// Direct children of `dir`, sorted by path.
    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Duplicate `src` at `dst`. Directory trees are copied recursively;
    /// subtrees whose path appears in `exclude` are left out.
    fn copy(&self, src: &Path, dst: &Path, exclude: &[PathBuf]) -> io::Result<()>;

    /// Relocate `src` to `dst` in one step, when the platform allows it.
    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()>;

    /// Remove `path` permanently (no trash semantics); directories recursively.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Remove `dir` only when it has no children. Returns whether it was
    /// removed; a missing directory is reported as not removed.
    fn remove_dir_if_empty(&self, dir: &Path) -> io::Result<bool>;
}

/// Sharing a filesystem handle keeps it inspectable after the executor takes
/// its boxed copy.
impl<F: Filesystem + ?Sized> Filesystem for std::sync::Arc<F> {
    fn kind_of(&self, path: &Path) -> NodeKind {
        (**self).kind_of(path)
    }
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).list_children(dir)
    }
    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        (**self).create_dir_all(dir)
    }
    fn copy(&self, src: &Path, dst: &Path, exclude: &[PathBuf]) -> io::Result<()> {
        (**self).copy(src, dst, exclude)
    }
    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        (**self).rename(src, dst)
    }
    fn remove(&self, path: &Path) -> io::Result<()> {
        (**self).remove(path)
    }
    fn remove_dir_if_empty(&self, dir: &Path) -> io::Result<bool> {
        (**self).remove_dir_if_empty(dir)
    }
}
