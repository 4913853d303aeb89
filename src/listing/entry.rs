//! Listing entry definition

use std::fmt;
use std::path::PathBuf;

/// Position-based identity of an entry within one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

/// What a directory entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory (symlinks are followed)
    Folder,
    /// Anything else: dangling symlink, FIFO, socket, device node
    Other,
}

impl EntryKind {
    /// Classify a file type as reported by the filesystem
    pub fn of(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Folder
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// A single entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Stable identity (position in the sorted listing)
    pub id: EntryId,
    /// Display name
    pub name: String,
    /// Absolute path to the entry
    pub path: PathBuf,
    /// Kind of entry; only folders are navigable
    pub kind: EntryKind,
}

impl Entry {
    /// Create a new entry
    pub fn new(id: EntryId, name: impl Into<String>, path: PathBuf, kind: EntryKind) -> Self {
        Self {
            id,
            name: name.into(),
            path,
            kind,
        }
    }

    /// Whether this entry is a regular file
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Whether this entry is a folder
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
