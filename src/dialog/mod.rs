//! Dialog shell - wires the selection controller to a host
//!
//! The host registers one [`PickerListener`] when the dialog is built. The
//! shell forwards navigation and the final result to it and keeps the
//! optional list filter in step with the listing.

pub mod filter;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use filter::ListFilter;

use crate::core::{Buttons, CompositeMode, Outcome, SelectionController, Snapshot, Title};
use crate::error::{PickerError, Result};
use crate::integrate::PickResult;
use crate::listing::{FileSystem, Listing};

/// Tag used when the host does not name its dialog
pub const DEFAULT_TAG: &str = "simpleFilePicker";

/// Host capability receiving dialog notifications
pub trait PickerListener {
    /// A new folder is shown (after Up or Open)
    fn on_navigate(&mut self, _title: Option<&Title>, _path: &Path, _mode: CompositeMode, _tag: &str) {}

    /// The dialog ended, with a selection or cancelled
    fn on_result(&mut self, tag: &str, result: &PickResult);
}

/// User input the dialog understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// Toggle the row at this position among visible rows
    Toggle(usize),
    Up,
    Open,
    Select,
    Cancel,
}

/// Default location for the picker: the user's home directory
pub fn default_storage_root() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Builder for [`FilePickerDialog`]
pub struct DialogBuilder {
    path: Option<PathBuf>,
    mode: CompositeMode,
    storage_root: Option<PathBuf>,
    title: Option<Title>,
    tag: String,
    filterable: bool,
    highlight: bool,
    listener: Option<Box<dyn PickerListener>>,
    snapshot: Option<Snapshot>,
}

impl DialogBuilder {
    /// Folder to start in (default: the storage root)
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn mode(mut self, mode: CompositeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Folder above which Up is not allowed (default: home directory)
    pub fn storage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.storage_root = Some(root.into());
        self
    }

    pub fn title(mut self, title: impl Into<Title>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Let the user narrow the list by typing, optionally marking matches
    pub fn filterable(mut self, enabled: bool, highlight: bool) -> Self {
        self.filterable = enabled;
        self.highlight = highlight;
        self
    }

    pub fn listener(mut self, listener: impl PickerListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Resume from saved state instead of the configured path and mode
    pub fn restore(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Build the dialog; fails if no listener was registered
    pub fn build<F: FileSystem>(self, fs: F) -> Result<FilePickerDialog<F>> {
        let listener = self
            .listener
            .ok_or_else(|| PickerError::no_listener(&self.tag))?;
        let storage_root = self.storage_root.unwrap_or_else(default_storage_root);

        let controller = match self.snapshot {
            Some(snapshot) => SelectionController::restore(fs, storage_root, snapshot),
            None => {
                let path = self.path.unwrap_or_else(|| storage_root.clone());
                SelectionController::new(fs, storage_root, path, self.mode)
            }
        };

        Ok(FilePickerDialog {
            controller,
            title: self.title,
            tag: self.tag,
            filter: self.filterable.then(|| ListFilter::new(self.highlight)),
            listener,
            result: None,
        })
    }
}

/// A modal file/folder picker driven by [`DialogEvent`]s
pub struct FilePickerDialog<F> {
    controller: SelectionController<F>,
    title: Option<Title>,
    tag: String,
    filter: Option<ListFilter>,
    listener: Box<dyn PickerListener>,
    result: Option<PickResult>,
}

impl FilePickerDialog<()> {
    /// Start building a dialog
    pub fn builder() -> DialogBuilder {
        DialogBuilder {
            path: None,
            mode: CompositeMode::default(),
            storage_root: None,
            title: None,
            tag: DEFAULT_TAG.to_string(),
            filterable: false,
            highlight: false,
            listener: None,
            snapshot: None,
        }
    }
}

impl<F: FileSystem> FilePickerDialog<F> {
    pub fn controller(&self) -> &SelectionController<F> {
        &self.controller
    }

    pub fn listing(&self) -> &Listing {
        self.controller.listing()
    }

    pub fn buttons(&self) -> Buttons {
        self.controller.buttons()
    }

    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn filter(&self) -> Option<&ListFilter> {
        self.filter.as_ref()
    }

    /// Update the filter query; a no-op for non-filterable dialogs
    pub fn set_filter_query(&mut self, query: impl Into<String>) {
        if let Some(filter) = self.filter.as_mut() {
            filter.set_query(query);
        }
    }

    /// Listing indices currently shown, in display order
    pub fn visible_rows(&self) -> Vec<usize> {
        match &self.filter {
            Some(filter) => filter.visible(self.controller.listing()),
            None => (0..self.controller.listing().len()).collect(),
        }
    }

    /// Whether the dialog has ended
    pub fn is_closed(&self) -> bool {
        self.result.is_some()
    }

    /// Final result once closed
    pub fn result(&self) -> Option<&PickResult> {
        self.result.as_ref()
    }

    /// State for the host to persist
    pub fn save(&self) -> Snapshot {
        self.controller.save()
    }

    /// Apply one user event
    pub fn handle(&mut self, event: DialogEvent) -> Outcome {
        if self.is_closed() {
            return Outcome::Ignored(crate::core::Ignored::Finished);
        }

        let outcome = match event {
            DialogEvent::Toggle(row) => match self.visible_rows().get(row) {
                Some(&index) => self.controller.toggle_entry(index),
                None => Outcome::Ignored(crate::core::Ignored::OutOfRange(row)),
            },
            DialogEvent::Up => self.controller.press_up(),
            DialogEvent::Open => self.controller.press_open(),
            DialogEvent::Select => self.controller.press_select(),
            DialogEvent::Cancel => {
                self.close(PickResult::Cancelled);
                return Outcome::Ignored(crate::core::Ignored::Finished);
            }
        };

        match &outcome {
            Outcome::Navigated { path } => {
                if let Some(filter) = self.filter.as_mut() {
                    filter.clear();
                }
                self.listener
                    .on_navigate(self.title.as_ref(), path, self.controller.mode(), &self.tag);
            }
            Outcome::Completed(selection) => {
                self.close(PickResult::Selected(selection.clone()));
            }
            Outcome::Updated(_) | Outcome::Ignored(_) => {}
        }
        outcome
    }

    fn close(&mut self, result: PickResult) {
        debug!(event = "dialog.closed", tag = %self.tag, code = result.exit_code(), "dialog closed");
        self.listener.on_result(&self.tag, &result);
        self.result = Some(result);
    }
}
