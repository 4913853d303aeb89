//! Picker mode definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PickerError;

/// Which kinds of entries may be listed and finally selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemMode {
    /// Only files may be selected (folders are still listed for navigation)
    FilesOnly,
    /// Only folders are listed and selectable
    FoldersOnly,
    /// Files and folders are both listed and selectable
    FilesAndFolders,
}

impl ItemMode {
    /// Whether files appear in a listing
    pub fn lists_files(self) -> bool {
        !matches!(self, ItemMode::FoldersOnly)
    }
}

/// Selection cardinality of a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoiceMode {
    /// Nothing can be checked
    None,
    /// One result.
    ///
    /// Checking is not exclusive: several entries may be checked and all of
    /// them are returned, with the first checked one as the single pair.
    Single,
    /// Any number of results
    Multi,
    /// One result, reached without a separate confirm step
    SingleDirect,
}

impl ChoiceMode {
    /// Whether results carry the distinguished single label/path pair
    pub fn is_single(self) -> bool {
        matches!(self, ChoiceMode::Single | ChoiceMode::SingleDirect)
    }
}

/// Item mode, choice mode and immediacy, fixed for one dialog invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeMode {
    item_mode: ItemMode,
    choice_mode: ChoiceMode,
    immediate: bool,
}

/// Named presets as `(name, mode)` pairs
const PRESETS: [(&str, CompositeMode); 12] = [
    ("file-only-single-choice", CompositeMode::FILE_ONLY_SINGLE_CHOICE),
    ("file-only-multi-choice", CompositeMode::FILE_ONLY_MULTI_CHOICE),
    ("file-only-direct-choice-immediate", CompositeMode::FILE_ONLY_DIRECT_CHOICE_IMMEDIATE),
    ("file-only-direct-choice-selection", CompositeMode::FILE_ONLY_DIRECT_CHOICE_SELECTION),
    ("folder-only-single-choice", CompositeMode::FOLDER_ONLY_SINGLE_CHOICE),
    ("folder-only-multi-choice", CompositeMode::FOLDER_ONLY_MULTI_CHOICE),
    ("folder-only-direct-choice-immediate", CompositeMode::FOLDER_ONLY_DIRECT_CHOICE_IMMEDIATE),
    ("folder-only-direct-choice-selection", CompositeMode::FOLDER_ONLY_DIRECT_CHOICE_SELECTION),
    ("file-or-folder-single-choice", CompositeMode::FILE_OR_FOLDER_SINGLE_CHOICE),
    ("file-and-folder-multi-choice", CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE),
    ("file-or-folder-direct-choice-immediate", CompositeMode::FILE_OR_FOLDER_DIRECT_CHOICE_IMMEDIATE),
    ("file-or-folder-direct-choice-selection", CompositeMode::FILE_OR_FOLDER_DIRECT_CHOICE_SELECTION),
];

impl CompositeMode {
    pub const FILE_ONLY_SINGLE_CHOICE: Self = Self::preset(ItemMode::FilesOnly, ChoiceMode::Single, false);
    pub const FILE_ONLY_MULTI_CHOICE: Self = Self::preset(ItemMode::FilesOnly, ChoiceMode::Multi, false);
    pub const FILE_ONLY_DIRECT_CHOICE_IMMEDIATE: Self =
        Self::preset(ItemMode::FilesOnly, ChoiceMode::SingleDirect, true);
    pub const FILE_ONLY_DIRECT_CHOICE_SELECTION: Self =
        Self::preset(ItemMode::FilesOnly, ChoiceMode::SingleDirect, false);

    pub const FOLDER_ONLY_SINGLE_CHOICE: Self = Self::preset(ItemMode::FoldersOnly, ChoiceMode::Single, false);
    pub const FOLDER_ONLY_MULTI_CHOICE: Self = Self::preset(ItemMode::FoldersOnly, ChoiceMode::Multi, false);
    pub const FOLDER_ONLY_DIRECT_CHOICE_IMMEDIATE: Self =
        Self::preset(ItemMode::FoldersOnly, ChoiceMode::SingleDirect, true);
    pub const FOLDER_ONLY_DIRECT_CHOICE_SELECTION: Self =
        Self::preset(ItemMode::FoldersOnly, ChoiceMode::SingleDirect, false);

    pub const FILE_OR_FOLDER_SINGLE_CHOICE: Self =
        Self::preset(ItemMode::FilesAndFolders, ChoiceMode::Single, false);
    pub const FILE_AND_FOLDER_MULTI_CHOICE: Self =
        Self::preset(ItemMode::FilesAndFolders, ChoiceMode::Multi, false);
    pub const FILE_OR_FOLDER_DIRECT_CHOICE_IMMEDIATE: Self =
        Self::preset(ItemMode::FilesAndFolders, ChoiceMode::SingleDirect, true);
    pub const FILE_OR_FOLDER_DIRECT_CHOICE_SELECTION: Self =
        Self::preset(ItemMode::FilesAndFolders, ChoiceMode::SingleDirect, false);

    const fn preset(item_mode: ItemMode, choice_mode: ChoiceMode, immediate: bool) -> Self {
        Self {
            item_mode,
            choice_mode,
            immediate,
        }
    }

    /// Build a mode from its parts.
    ///
    /// Immediacy only exists for `SingleDirect` and is dropped otherwise.
    pub fn new(item_mode: ItemMode, choice_mode: ChoiceMode, immediate: bool) -> Self {
        Self::preset(
            item_mode,
            choice_mode,
            immediate && choice_mode == ChoiceMode::SingleDirect,
        )
    }

    pub fn item_mode(&self) -> ItemMode {
        self.item_mode
    }

    pub fn choice_mode(&self) -> ChoiceMode {
        self.choice_mode
    }

    /// Whether a single check fires Open/Select on its own
    pub fn is_immediate(&self) -> bool {
        self.immediate && self.choice_mode == ChoiceMode::SingleDirect
    }

    /// All named presets
    pub fn presets() -> impl Iterator<Item = (&'static str, CompositeMode)> {
        PRESETS.iter().copied()
    }

    /// Preset name, if this mode is one of the presets
    pub fn name(&self) -> Option<&'static str> {
        PRESETS
            .iter()
            .find(|(_, mode)| mode == self)
            .map(|(name, _)| *name)
    }
}

impl Default for CompositeMode {
    fn default() -> Self {
        Self::FILE_OR_FOLDER_DIRECT_CHOICE_SELECTION
    }
}

impl FromStr for CompositeMode {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        PRESETS
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, mode)| *mode)
            .ok_or_else(|| PickerError::mode(s))
    }
}

impl fmt::Display for CompositeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(
                f,
                "{:?}/{:?}{}",
                self.item_mode,
                self.choice_mode,
                if self.immediate { "/immediate" } else { "" }
            ),
        }
    }
}

/// Dialog title, either literal text or a resource id resolved by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Title {
    Text(String),
    Resource(u32),
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Title {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
