//! Selection controller - the picker's navigation and selection state machine
//!
//! Every user action is handled to completion and answered with an
//! [`Outcome`]. The controller never renders; a presenter reacts to outcomes
//! and reads [`SelectionController::buttons`] to draw the controls.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Buttons, CheckedCounts, ChoiceMode, CompositeMode, ItemMode, SelectionState, Snapshot};
use crate::listing::{DirectoryView, FileSystem, Listing};

/// One of the three dialog controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Up,
    Open,
    Select,
}

/// The distinguished result of single-choice dialogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleChoice {
    pub label: String,
    pub path: PathBuf,
}

/// What the user picked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Labels of checked entries, in check order
    pub labels: Vec<String>,
    /// Absolute paths of checked entries, in check order
    pub paths: Vec<PathBuf>,
    /// Single-choice result, or the current folder for an empty selection
    pub single: Option<SingleChoice>,
}

impl Selection {
    /// Result for Select with nothing checked: the folder being shown
    pub fn current_folder(path: &Path) -> Self {
        Self {
            labels: Vec::new(),
            paths: Vec::new(),
            single: Some(SingleChoice {
                label: base_name(path),
                path: path.to_path_buf(),
            }),
        }
    }

    /// Every path in the result, falling back to the single pair
    pub fn all_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            self.single.iter().map(|s| s.path.clone()).collect()
        } else {
            self.paths.clone()
        }
    }
}

/// Why an action had no effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    /// The dialog already produced its result
    Finished,
    /// The choice mode does not allow checking entries
    NotCheckable,
    /// No entry at the given index
    OutOfRange(usize),
    /// The pressed control is disabled
    Disabled(Button),
    /// The checked set does not resolve to exactly one folder
    NoOpenTarget,
    /// The current folder has no parent
    NoParent,
    /// The target lies outside the storage root
    NotAcceptable(PathBuf),
    /// The checked set is not a legal result for the item mode
    InvalidSelection,
}

/// Result of handling one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The checked set changed; controls now look like this
    Updated(Buttons),
    /// A new folder is shown with a fresh listing
    Navigated { path: PathBuf },
    /// Select fired; the interaction is over
    Completed(Selection),
    /// Nothing happened
    Ignored(Ignored),
}

/// State machine over current folder, modes and checked entries
pub struct SelectionController<F> {
    view: DirectoryView<F>,
    storage_root: PathBuf,
    mode: CompositeMode,
    listing: Listing,
    state: SelectionState,
    buttons: Buttons,
    finished: bool,
}

impl<F: FileSystem> SelectionController<F> {
    /// Show `initial_path` using `fs`, never allowing Up above `storage_root`
    pub fn new(
        fs: F,
        storage_root: impl Into<PathBuf>,
        initial_path: impl Into<PathBuf>,
        mode: CompositeMode,
    ) -> Self {
        let view = DirectoryView::new(fs);
        let storage_root = storage_root.into();
        let initial_path = initial_path.into();
        let listing = view.list(&initial_path, mode.item_mode());
        let buttons = Buttons::initial(mode, initial_path == storage_root);

        debug!(
            event = "picker.opened",
            path = %initial_path.display(),
            %mode,
            entries = listing.len(),
            "picker opened"
        );

        Self {
            view,
            storage_root,
            mode,
            listing,
            state: SelectionState::new(initial_path),
            buttons,
            finished: false,
        }
    }

    /// Rebuild a controller from a saved snapshot.
    ///
    /// The folder is listed again; checks that no longer fit are dropped and
    /// the saved control flags are re-applied as they were.
    pub fn restore(fs: F, storage_root: impl Into<PathBuf>, snapshot: Snapshot) -> Self {
        let mut controller = Self::new(fs, storage_root, snapshot.current_path, snapshot.mode);
        for index in snapshot.checked {
            if index < controller.listing.len() {
                controller.state.checked.insert(index);
            }
        }
        controller.buttons = snapshot.buttons;
        controller
    }

    /// Capture what a host needs to rebuild this dialog later
    pub fn save(&self) -> Snapshot {
        Snapshot {
            current_path: self.state.current_path.clone(),
            mode: self.mode,
            buttons: self.buttons,
            checked: self.state.checked.iter().copied().collect(),
        }
    }

    pub fn mode(&self) -> CompositeMode {
        self.mode
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn current_path(&self) -> &Path {
        &self.state.current_path
    }

    /// Whether Select already fired
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.state.checked.contains(&index)
    }

    pub fn is_at_storage_root(&self) -> bool {
        self.state.current_path == self.storage_root
    }

    pub fn checked_counts(&self) -> CheckedCounts {
        self.state.counts(&self.listing)
    }

    /// The folder Open would enter, if the checked set names exactly one
    pub fn open_target(&self) -> Option<&Path> {
        let mut folders = self
            .state
            .checked
            .iter()
            .filter_map(|&i| self.listing.get(i))
            .filter(|e| e.is_folder());
        match (folders.next(), folders.next()) {
            (Some(folder), None) => Some(folder.path.as_path()),
            _ => None,
        }
    }

    /// Check or uncheck the entry at `index`
    pub fn toggle_entry(&mut self, index: usize) -> Outcome {
        if self.finished {
            return ignored(Ignored::Finished);
        }
        if self.mode.choice_mode() == ChoiceMode::None {
            return ignored(Ignored::NotCheckable);
        }
        if index >= self.listing.len() {
            return ignored(Ignored::OutOfRange(index));
        }

        let checked = self.state.toggle(index);
        let counts = self.checked_counts();
        debug!(
            event = "picker.toggled",
            index,
            checked,
            total = counts.total,
            folders = counts.folders,
            "entry toggled"
        );

        if self.mode.is_immediate() && counts.total == 1 {
            return if counts.folders == 1 {
                self.open_checked()
            } else {
                self.complete()
            };
        }

        self.buttons = Buttons::derive(self.mode, counts, self.is_at_storage_root());
        Outcome::Updated(self.buttons)
    }

    /// Show the parent folder
    pub fn press_up(&mut self) -> Outcome {
        if self.finished {
            return ignored(Ignored::Finished);
        }
        if !self.buttons.up {
            return ignored(Ignored::Disabled(Button::Up));
        }
        let Some(parent) = self.state.current_path.parent().map(Path::to_path_buf) else {
            return ignored(Ignored::NoParent);
        };
        self.navigate(parent)
    }

    /// Enter the single checked folder
    pub fn press_open(&mut self) -> Outcome {
        if self.finished {
            return ignored(Ignored::Finished);
        }
        if !self.buttons.open {
            return ignored(Ignored::Disabled(Button::Open));
        }
        self.open_checked()
    }

    /// Finish with the checked entries, or the current folder if none
    pub fn press_select(&mut self) -> Outcome {
        if self.finished {
            return ignored(Ignored::Finished);
        }
        if !self.buttons.select {
            return ignored(Ignored::Disabled(Button::Select));
        }
        self.complete()
    }

    fn open_checked(&mut self) -> Outcome {
        match self.open_target().map(Path::to_path_buf) {
            Some(target) => self.navigate(target),
            None => ignored(Ignored::NoOpenTarget),
        }
    }

    fn navigate(&mut self, path: PathBuf) -> Outcome {
        if !path.starts_with(&self.storage_root) {
            return ignored(Ignored::NotAcceptable(path));
        }

        self.listing = self.view.list(&path, self.mode.item_mode());
        self.state.navigate(path.clone());
        self.buttons = Buttons::initial(self.mode, self.is_at_storage_root());

        debug!(
            event = "picker.navigated",
            path = %path.display(),
            entries = self.listing.len(),
            "folder shown"
        );
        Outcome::Navigated { path }
    }

    fn complete(&mut self) -> Outcome {
        let counts = self.checked_counts();
        if self.mode.item_mode() == ItemMode::FilesOnly && (counts.total == 0 || counts.folders > 0) {
            return ignored(Ignored::InvalidSelection);
        }

        let selection = if counts.total == 0 {
            Selection::current_folder(&self.state.current_path)
        } else {
            let checked: Vec<_> = self
                .state
                .checked
                .iter()
                .filter_map(|&i| self.listing.get(i))
                .collect();
            let single = self
                .mode
                .choice_mode()
                .is_single()
                .then(|| checked.first())
                .flatten()
                .map(|e| SingleChoice {
                    label: e.name.clone(),
                    path: e.path.clone(),
                });
            Selection {
                labels: checked.iter().map(|e| e.name.clone()).collect(),
                paths: checked.iter().map(|e| e.path.clone()).collect(),
                single,
            }
        };

        self.finished = true;
        debug!(
            event = "picker.completed",
            count = selection.paths.len(),
            current_folder = selection.paths.is_empty(),
            "selection completed"
        );
        Outcome::Completed(selection)
    }
}

fn ignored(reason: Ignored) -> Outcome {
    trace!(event = "picker.ignored", ?reason, "action ignored");
    Outcome::Ignored(reason)
}

/// Last path component, or the whole path for roots
fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
