//! Application configuration from CLI arguments

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::config_file::ConfigFile;
use crate::core::{CompositeMode, Title};
use crate::dialog::default_storage_root;
use crate::error::PickerError;
use crate::integrate::{exit_code, OutputFormat};

/// Application configuration from CLI args and config file
#[derive(Debug)]
pub struct Config {
    /// Folder shown first
    pub path: PathBuf,
    /// Folder above which Up is disabled
    pub storage_root: PathBuf,
    pub mode: CompositeMode,
    pub title: Option<Title>,
    pub filterable: bool,
    pub highlight: bool,
    pub output_format: OutputFormat,
    /// Where dialog state is restored from and saved to on cancel
    pub state_file: Option<PathBuf>,
    /// Print the listing and exit (non-interactive)
    pub list_mode: bool,
    /// Title resources from the config file
    pub titles: HashMap<String, String>,
}

impl Config {
    pub fn from_args() -> anyhow::Result<Self> {
        // Load config file first (provides defaults)
        let config_file = ConfigFile::load();
        Self::parse(env::args().skip(1), config_file)
    }

    /// Parse arguments on top of a loaded config file
    pub fn parse<I>(args: I, config_file: ConfigFile) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut path: Option<PathBuf> = None;
        let mut root_arg: Option<PathBuf> = None;
        let mut mode: Option<CompositeMode> = None;
        let mut title: Option<Title> = None;
        let mut filterable: Option<bool> = None;
        let mut highlight: Option<bool> = None;
        let mut output_format: Option<OutputFormat> = None;
        let mut state_file: Option<PathBuf> = None;
        let mut list_mode = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--mode" | "-m" => {
                    let Some(name) = args.next() else {
                        anyhow::bail!("--mode requires a mode name");
                    };
                    mode = Some(CompositeMode::from_str(&name).map_err(|_| {
                        anyhow::anyhow!("Invalid mode '{}'. Valid modes: {}", name, mode_names())
                    })?);
                }
                "--root" => {
                    let Some(dir) = args.next() else {
                        anyhow::bail!("--root requires a directory");
                    };
                    let dir = PathBuf::from(dir);
                    if !dir.is_dir() {
                        return Err(PickerError::path(dir, "--root is not a directory").into());
                    }
                    root_arg = Some(dir.canonicalize()?);
                }
                "--title" => {
                    let Some(text) = args.next() else {
                        anyhow::bail!("--title requires a value");
                    };
                    title = Some(Title::Text(text));
                }
                "--title-id" => {
                    let Some(id) = args.next() else {
                        anyhow::bail!("--title-id requires a value");
                    };
                    let id = id.parse().map_err(|_| {
                        anyhow::anyhow!("--title-id requires a non-negative integer, got '{}'", id)
                    })?;
                    title = Some(Title::Resource(id));
                }
                "--filter" => filterable = Some(true),
                "--no-filter" => filterable = Some(false),
                "--highlight" => highlight = Some(true),
                "--no-highlight" => highlight = Some(false),
                "--format" | "-f" => {
                    let Some(fmt) = args.next() else {
                        anyhow::bail!("--format requires a value (lines, null, or json)");
                    };
                    output_format = Some(parse_format(&fmt)?);
                }
                "--state" => {
                    let Some(file) = args.next() else {
                        anyhow::bail!("--state requires a file path");
                    };
                    state_file = Some(PathBuf::from(file));
                }
                "--list" | "-l" => list_mode = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(exit_code::SUCCESS);
                }
                "--version" | "-V" => {
                    println!("sfp {}", env!("CARGO_PKG_VERSION"));
                    std::process::exit(exit_code::SUCCESS);
                }
                p if !p.starts_with('-') => {
                    let p = PathBuf::from(p);
                    if p.is_dir() {
                        path = Some(p.canonicalize()?);
                    } else if p.is_file() {
                        if let Some(parent) = p.canonicalize()?.parent() {
                            path = Some(parent.to_path_buf());
                        }
                    } else {
                        return Err(PickerError::path(p, "does not exist").into());
                    }
                }
                unknown => {
                    anyhow::bail!(
                        "Unknown option: {}. Use --help for usage information.",
                        unknown
                    );
                }
            }
        }

        let general = config_file.general;

        let mode = match (mode, general.mode.as_deref()) {
            (Some(mode), _) => mode,
            (None, Some(name)) => CompositeMode::from_str(name).map_err(|_| {
                PickerError::config(format!("invalid mode '{}' in config file", name))
            })?,
            (None, None) => CompositeMode::default(),
        };

        let output_format = match output_format {
            Some(fmt) => fmt,
            None => parse_format(&general.output_format)?,
        };

        let explicit_root = root_arg.is_some();
        let mut storage_root = root_arg
            .or(general.storage_root)
            .unwrap_or_else(default_storage_root);
        storage_root = storage_root.canonicalize().unwrap_or(storage_root);

        let path = path.unwrap_or_else(|| storage_root.clone());
        if !path.starts_with(&storage_root) {
            if explicit_root {
                let reason = format!("outside --root {}", storage_root.display());
                return Err(PickerError::path(path, reason).into());
            }
            storage_root = filesystem_root(&path);
        }

        // CLI arguments take precedence over config file
        Ok(Self {
            path,
            storage_root,
            mode,
            title,
            filterable: filterable.unwrap_or(general.filterable),
            highlight: highlight.unwrap_or(general.highlight),
            output_format,
            state_file,
            list_mode,
            titles: config_file.titles,
        })
    }

    /// Text to show for the configured title
    pub fn title_text(&self) -> Option<String> {
        match self.title.as_ref()? {
            Title::Text(text) => Some(text.clone()),
            Title::Resource(id) => Some(
                self.titles
                    .get(&id.to_string())
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", id)),
            ),
        }
    }
}

fn parse_format(fmt: &str) -> anyhow::Result<OutputFormat> {
    OutputFormat::from_str(fmt).map_err(|_| {
        anyhow::anyhow!("Invalid format '{}'. Valid formats: lines, null, json", fmt)
    })
}

fn mode_names() -> String {
    CompositeMode::presets()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn filesystem_root(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"))
}

fn print_help() {
    println!(
        r#"sfp - Simple File Picker: pick files and folders from the terminal

USAGE:
    sfp [OPTIONS] [PATH]

OPTIONS:
    -m, --mode NAME     Composite mode (default: file-or-folder-direct-choice-selection)
    --root DIR          Storage root: Up is disabled here (default: home directory)
    --title TEXT        Dialog title
    --title-id N        Dialog title from the [titles] table of the config file
    --filter            Allow narrowing the list by typing (/)
    --no-filter         Disable filtering (default)
    --highlight         Highlight matches while filtering (default)
    --no-highlight      Do not highlight matches
    -f, --format FMT    Output format: lines, null, json
    --state FILE        Restore dialog state from FILE; save it there on cancel
    -l, --list          Print the listing of PATH and exit
    -h, --help          Show this help message
    -V, --version       Show version

MODES:
    file-only-single-choice              folder-only-single-choice
    file-only-multi-choice               folder-only-multi-choice
    file-only-direct-choice-immediate    folder-only-direct-choice-immediate
    file-only-direct-choice-selection    folder-only-direct-choice-selection
    file-or-folder-single-choice         file-and-folder-multi-choice
    file-or-folder-direct-choice-immediate
    file-or-folder-direct-choice-selection

CONFIG FILE:
    ~/.config/sfp/config.toml

ENVIRONMENT:
    SFP_LOG                 Log filter for stderr diagnostics (e.g. debug)

KEYBINDINGS:
    j/↓  k/↑    Move down / up
    g  G        Go to top / bottom
    Space       Check / uncheck entry
    u/BS/h/←    Up: parent folder
    o/l/→       Open: enter the checked folder
    Enter       Select: finish (nothing checked picks the current folder)
    /           Filter (with --filter)
    q/Esc       Cancel

EXIT CODES:
    0           Success (selection made)
    1           Cancelled
    2           Error (runtime error)
    3           Invalid arguments (unknown option or invalid value)
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mode_and_format_flags() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_str().unwrap();
        let config = Config::parse(
            args(&["--root", root, "--mode", "file-only-multi-choice", "-f", "json", "--filter"]),
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(config.mode, CompositeMode::FILE_ONLY_MULTI_CHOICE);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.filterable);
        assert!(config.highlight);
        assert_eq!(config.path, config.storage_root);
    }

    #[test]
    fn test_invalid_mode_is_error() {
        let err = Config::parse(args(&["--mode", "sideways"]), ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid mode"));
    }

    #[test]
    fn test_unknown_option_is_error() {
        assert!(Config::parse(args(&["--bogus"]), ConfigFile::default()).is_err());
    }

    #[test]
    fn test_path_outside_explicit_root_is_error() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let result = Config::parse(
            args(&["--root", a.path().to_str().unwrap(), b.path().to_str().unwrap()]),
            ConfigFile::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_file_path_starts_in_parent() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").unwrap();
        let config = Config::parse(
            args(&["--root", temp.path().to_str().unwrap(), file.to_str().unwrap()]),
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(config.path, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_config_file_defaults_apply() {
        let temp = TempDir::new().unwrap();
        let file: ConfigFile = toml::from_str(&format!(
            r#"
[general]
storage_root = "{}"
mode = "folder-only-multi-choice"
filterable = true

[titles]
4 = "Pick one"
"#,
            temp.path().display()
        ))
        .unwrap();
        let config = Config::parse(args(&["--title-id", "4"]), file).unwrap();
        assert_eq!(config.mode, CompositeMode::FOLDER_ONLY_MULTI_CHOICE);
        assert!(config.filterable);
        assert_eq!(config.storage_root, temp.path().canonicalize().unwrap());
        assert_eq!(config.title_text().as_deref(), Some("Pick one"));
    }

    #[test]
    fn test_unknown_title_id_falls_back() {
        let temp = TempDir::new().unwrap();
        let config = Config::parse(
            args(&["--root", temp.path().to_str().unwrap(), "--title-id", "9"]),
            ConfigFile::default(),
        )
        .unwrap();
        assert_eq!(config.title_text().as_deref(), Some("#9"));
    }
}
