//! Saved dialog state for host save/restore points
//!
//! Stored as JSON so a host can persist it wherever it keeps instance state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Buttons, CompositeMode};
use crate::error::Result;

/// Everything needed to rebuild a dialog after the process goes away
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Folder being shown
    pub current_path: PathBuf,
    /// Mode the dialog was built with
    pub mode: CompositeMode,
    /// Control flags at save time
    pub buttons: Buttons,
    /// Checked listing indices in check order
    #[serde(default)]
    pub checked: Vec<usize>,
}

impl Snapshot {
    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
