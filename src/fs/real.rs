//! `std::fs`-backed implementation of the [`Filesystem`] capability trait.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Filesystem, NodeKind};

/// The production filesystem. Stateless; safe to share.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealFilesystem;

fn sorted_children(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    out.sort();
    Ok(out)
}

fn copy_entity(src: &Path, dst: &Path, exclude: &[PathBuf]) -> io::Result<()> {
    if fs::metadata(src)?.is_dir() {
        fs::create_dir(dst)?;
        for child in sorted_children(src)? {
            if exclude.iter().any(|e| *e == child) {
                continue;
            }
            let name = match child.file_name() {
                Some(n) => n.to_os_string(),
                None => continue,
            };
            copy_entity(&child, &dst.join(name), exclude)?;
        }
        Ok(())
    } else {
        fs::copy(src, dst).map(|_| ())
    }
}

impl Filesystem for RealFilesystem {
    fn kind_of(&self, path: &Path) -> NodeKind {
        match fs::metadata(path) {
            Ok(md) if md.is_dir() => NodeKind::Dir,
            Ok(_) => NodeKind::File,
            Err(_) => NodeKind::Missing,
        }
    }

    fn list_children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        sorted_children(dir)
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn copy(&self, src: &Path, dst: &Path, exclude: &[PathBuf]) -> io::Result<()> {
        copy_entity(src, dst, exclude)
    }

    fn rename(&self, src: &Path, dst: &Path) -> io::Result<()> {
        fs::rename(src, dst)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if fs::symlink_metadata(path)?.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }

    fn remove_dir_if_empty(&self, dir: &Path) -> io::Result<bool> {
        match fs::read_dir(dir) {
            Ok(mut rd) => {
                if rd.next().is_some() {
                    return Ok(false);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        }
        fs::remove_dir(dir)?;
        Ok(true)
    }
}
