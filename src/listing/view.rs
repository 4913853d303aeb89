//! Directory view - turns one directory into a sorted, filtered listing

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Entry, EntryId, EntryKind, FileSystem, RawEntry};
use crate::core::ItemMode;

/// Placeholder the presenter shows for a listing without entries
pub const EMPTY_TEXT: &str = "List is empty!";

/// Ordered snapshot of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    path: PathBuf,
    entries: Vec<Entry>,
}

impl Listing {
    /// Create an empty listing for `path`
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Directory this listing was taken from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in display order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entry at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Placeholder text when there is nothing to show
    pub fn empty_text(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_TEXT)
    }
}

/// Produces listings from a filesystem
#[derive(Debug, Clone, Default)]
pub struct DirectoryView<F> {
    fs: F,
}

impl<F: FileSystem> DirectoryView<F> {
    /// Create a view over the given filesystem
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// List `path`, admitting entries according to `item_mode`.
    ///
    /// Folders are always listed so the user can navigate through them; every
    /// other kind of entry is dropped for `FoldersOnly`. A directory that
    /// cannot be read yields an empty listing.
    pub fn list(&self, path: &Path, item_mode: ItemMode) -> Listing {
        let raw = match self.fs.read_dir(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(
                    event = "listing.unreadable",
                    path = %path.display(),
                    error = %err,
                    "directory unreadable, showing empty listing"
                );
                return Listing::empty(path);
            }
        };

        let mut admitted: Vec<RawEntry> = raw
            .into_iter()
            .filter(|e| item_mode.lists_files() || e.kind == EntryKind::Folder)
            .collect();

        // Stable: equal names keep enumeration order
        admitted.sort_by(|a, b| compare_names(&a.name, &b.name));

        let entries: Vec<Entry> = admitted
            .into_iter()
            .enumerate()
            .map(|(i, e)| Entry::new(EntryId(i), e.name, e.path, e.kind))
            .collect();

        debug!(
            event = "listing.loaded",
            path = %path.display(),
            entries = entries.len(),
            ?item_mode,
            "directory listed"
        );

        Listing {
            path: path.to_path_buf(),
            entries,
        }
    }
}

/// Case-insensitive name order, case-sensitive on a case-insensitive tie
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
