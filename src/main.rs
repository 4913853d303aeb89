//! Simple File Picker - pick files and folders from the terminal

use std::io::{self, stdout, Write};
use std::process::ExitCode;

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use simple_file_picker::app::{run_app, Config};
use simple_file_picker::integrate::exit_code;
use simple_file_picker::listing::{DirectoryView, StdFileSystem};

fn main() -> ExitCode {
    init_logging();

    // Parse config first to return INVALID exit code for argument errors
    let config = match Config::from_args() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(exit_code::INVALID as u8);
        }
    };

    if config.list_mode {
        return run_list_mode(&config);
    }

    match run_with_config(config) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

/// Diagnostics go to stderr, filtered by `SFP_LOG` (off unless set)
fn init_logging() {
    let filter = EnvFilter::try_from_env("SFP_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Print the listing of the start folder (non-interactive)
fn run_list_mode(config: &Config) -> ExitCode {
    let listing = DirectoryView::new(StdFileSystem).list(&config.path, config.mode.item_mode());
    let mut out = stdout().lock();
    let written = match listing.empty_text() {
        Some(text) => writeln!(out, "{}", text),
        None => listing.entries().iter().try_for_each(|entry| {
            let marker = if entry.is_folder() { 'd' } else { 'f' };
            writeln!(out, "{} {}", marker, entry.name)
        }),
    };
    match written {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code::ERROR as u8)
        }
    }
}

fn run_with_config(config: Config) -> anyhow::Result<i32> {
    // Initialize terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let format = config.output_format;
    let result = run_app(&mut terminal, config);

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;

    // Selection is printed after the alternate screen is gone
    let app_result = result?;
    Ok(app_result.result.output(format)?)
}
