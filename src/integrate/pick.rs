//! Result output for scripted use
//!
//! When the user presses Select, the picked path(s) are written to stdout so
//! the picker can be used from shell scripts and other tools.

use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::Selection;

/// Exit codes for the application
///
/// These codes are stable and can be relied upon for scripting:
/// - `SUCCESS` (0): Selection made (or non-interactive command succeeded)
/// - `CANCELLED` (1): User dismissed the picker without selecting
/// - `ERROR` (2): Runtime error (I/O error, terminal error, etc.)
/// - `INVALID` (3): Invalid command-line arguments or option values
pub mod exit_code {
    /// User selected something, or a non-interactive command succeeded
    pub const SUCCESS: i32 = 0;
    /// User cancelled the picker
    pub const CANCELLED: i32 = 1;
    /// Runtime error occurred
    pub const ERROR: i32 = 2;
    /// Invalid arguments or options (e.g., unknown flag, invalid mode)
    pub const INVALID: i32 = 3;
}

/// Output format for picked paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One path per line (default)
    #[default]
    Lines,
    /// Null-separated paths (for xargs -0)
    NullSeparated,
    /// JSON object with labels and paths
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "line" => Ok(Self::Lines),
            "null" | "nul" | "0" => Ok(Self::NullSeparated),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Write a selection to `out` in the given format
pub fn write_selection<W: Write>(
    out: &mut W,
    selection: &Selection,
    format: OutputFormat,
) -> io::Result<()> {
    let paths = selection.all_paths();

    match format {
        OutputFormat::Lines => {
            for path in &paths {
                writeln!(out, "{}", path.display())?;
            }
        }
        OutputFormat::NullSeparated => {
            for path in &paths {
                write!(out, "{}\0", path.display())?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "labels": selection.labels,
                "paths": display_all(&selection.paths),
                "single_label": selection.single.as_ref().map(|s| s.label.clone()),
                "single_path": selection.single.as_ref().map(|s| s.path.display().to_string()),
            });
            writeln!(out, "{}", json)?;
        }
    }

    out.flush()
}

fn display_all(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

/// Outcome of one picker session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    /// User pressed Select
    Selected(Selection),
    /// User dismissed the picker
    Cancelled,
}

impl PickResult {
    /// Get exit code for this result
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Selected(_) => exit_code::SUCCESS,
            Self::Cancelled => exit_code::CANCELLED,
        }
    }

    /// Selection, if one was made
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Selected(selection) => Some(selection),
            Self::Cancelled => None,
        }
    }

    /// Output result to stdout if something was selected
    pub fn output(&self, format: OutputFormat) -> io::Result<i32> {
        if let Self::Selected(selection) = self {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_selection(&mut handle, selection, format)?;
        }
        Ok(self.exit_code())
    }
}
