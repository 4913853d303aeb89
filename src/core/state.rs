//! Selection state and derived button enablement

use std::path::PathBuf;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::{ChoiceMode, CompositeMode, ItemMode};
use crate::listing::Listing;

/// Enabled flags of the three dialog controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buttons {
    /// Up: go to the parent folder
    pub up: bool,
    /// Open: enter the single checked folder
    pub open: bool,
    /// Select: finish with the current selection
    pub select: bool,
}

impl Buttons {
    /// Enablement right after a listing is shown (nothing checked yet)
    pub fn initial(mode: CompositeMode, at_storage_root: bool) -> Self {
        Self {
            up: !at_storage_root,
            open: false,
            select: mode.item_mode() != ItemMode::FilesOnly,
        }
    }

    /// Enablement after the checked set changed
    pub fn derive(mode: CompositeMode, counts: CheckedCounts, at_storage_root: bool) -> Self {
        let any_checked = counts.total > 0;

        let select = match mode.item_mode() {
            ItemMode::FilesOnly => any_checked && counts.folders == 0,
            ItemMode::FoldersOnly | ItemMode::FilesAndFolders => any_checked,
        };

        let mut open = counts.folders == 1;
        if mode.choice_mode() == ChoiceMode::SingleDirect {
            open &= counts.total == 1;
        }

        Self {
            up: !at_storage_root,
            open,
            select,
        }
    }
}

/// Breakdown of the checked set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckedCounts {
    pub total: usize,
    /// Checked entries that are not folders
    pub files: usize,
    pub folders: usize,
}

/// Mutable selection state owned by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Checked listing indices in check order
    pub checked: IndexSet<usize>,
    /// Folder currently shown
    pub current_path: PathBuf,
}

impl SelectionState {
    /// Create state for a freshly shown folder
    pub fn new(current_path: PathBuf) -> Self {
        Self {
            checked: IndexSet::new(),
            current_path,
        }
    }

    /// Flip membership of `index`; returns whether it is now checked
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.checked.shift_remove(&index) {
            false
        } else {
            self.checked.insert(index);
            true
        }
    }

    /// Move to another folder, dropping every check
    pub fn navigate(&mut self, path: PathBuf) {
        self.checked.clear();
        self.current_path = path;
    }

    /// Count checked files and folders against `listing`
    pub fn counts(&self, listing: &Listing) -> CheckedCounts {
        let mut counts = CheckedCounts::default();
        for entry in self.checked.iter().filter_map(|&i| listing.get(i)) {
            counts.total += 1;
            if entry.is_folder() {
                counts.folders += 1;
            } else {
                counts.files += 1;
            }
        }
        counts
    }
}
