//! Filesystem access layer used by the directory view

use std::path::{Path, PathBuf};

use super::EntryKind;

/// Raw directory entry in enumeration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Base name (no parent path)
    pub name: String,
    /// Full path
    pub path: PathBuf,
    /// File, folder or other
    pub kind: EntryKind,
}

impl RawEntry {
    /// Build a raw entry for `name` inside `dir`
    pub fn new(dir: &Path, name: impl Into<String>, kind: EntryKind) -> Self {
        let name = name.into();
        Self {
            path: dir.join(&name),
            name,
            kind,
        }
    }
}

/// Filesystem abstraction so listings can be produced without touching disk
pub trait FileSystem {
    /// List entries of a directory in enumeration order
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<RawEntry>>;
}

/// Default filesystem implementation using `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<RawEntry>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let path = entry.path();
            // Follow symlinks so a link to a folder stays navigable
            let kind = match std::fs::metadata(&path) {
                Ok(meta) => EntryKind::of(meta.file_type()),
                Err(_) => match entry.file_type() {
                    Ok(ft) => EntryKind::of(ft),
                    Err(_) => continue,
                },
            };
            out.push(RawEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }
        Ok(out)
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<RawEntry>> {
        (**self).read_dir(dir)
    }
}

impl<F: FileSystem + ?Sized> FileSystem for Box<F> {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<RawEntry>> {
        (**self).read_dir(dir)
    }
}
