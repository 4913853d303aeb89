//! Main event loop for the application

use std::cell::RefCell;
use std::fs;
use std::io::Stdout;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::*;
use tracing::{debug, warn};

use crate::app::{Config, InputMode, ViewState};
use crate::core::{Button, CompositeMode, Ignored, Outcome, Snapshot, Title};
use crate::dialog::{DialogEvent, FilePickerDialog, PickerListener};
use crate::handler::{handle_key_event, KeyAction};
use crate::integrate::PickResult;
use crate::listing::{FileSystem, StdFileSystem};

use super::render::{list_height, render_frame, RenderContext};

/// Result of running the app
pub struct AppResult {
    pub exit_code: i32,
    pub result: PickResult,
}

/// Listener that reports dialog notifications on the status line
struct StatusListener(Rc<RefCell<Option<String>>>);

impl PickerListener for StatusListener {
    fn on_navigate(&mut self, _title: Option<&Title>, path: &Path, _mode: CompositeMode, _tag: &str) {
        *self.0.borrow_mut() = Some(format!("Opened {}", path.display()));
    }

    fn on_result(&mut self, tag: &str, result: &PickResult) {
        debug!(event = "app.result", tag, code = result.exit_code(), "picker finished");
    }
}

/// Build the dialog, resuming from the state file when one is readable
fn build_dialog(
    config: &Config,
    status: Rc<RefCell<Option<String>>>,
) -> anyhow::Result<FilePickerDialog<StdFileSystem>> {
    let mut builder = FilePickerDialog::builder()
        .path(&config.path)
        .storage_root(&config.storage_root)
        .mode(config.mode)
        .filterable(config.filterable, config.highlight)
        .listener(StatusListener(status));
    if let Some(title) = &config.title {
        builder = builder.title(title.clone());
    }

    if let Some(file) = config.state_file.as_deref().filter(|f| f.exists()) {
        match Snapshot::load_from(file) {
            Ok(snapshot) => builder = builder.restore(snapshot),
            Err(e) => warn!(error = %e, file = %file.display(), "ignoring unreadable state file"),
        }
    }

    Ok(builder.build(StdFileSystem)?)
}

/// Status text for an event the dialog ignored
fn ignored_message(reason: &Ignored) -> Option<String> {
    let text = match reason {
        Ignored::Disabled(Button::Up) => "Already at the storage root".to_string(),
        Ignored::Disabled(Button::Open) => "Check exactly one folder to open".to_string(),
        Ignored::Disabled(Button::Select) => "Nothing selectable is checked".to_string(),
        Ignored::NotCheckable => "Entries cannot be checked in this mode".to_string(),
        Ignored::NotAcceptable(path) => format!("Outside storage root: {}", path.display()),
        Ignored::InvalidSelection => "Only files can be selected".to_string(),
        Ignored::Finished | Ignored::OutOfRange(_) | Ignored::NoOpenTarget | Ignored::NoParent => {
            return None;
        }
    };
    Some(text)
}

/// Apply a dialog event and keep the view in step with its outcome
fn dispatch<F: FileSystem>(dialog: &mut FilePickerDialog<F>, view: &mut ViewState, event: DialogEvent) {
    match dialog.handle(event) {
        Outcome::Navigated { .. } => view.reset(),
        Outcome::Updated(_) => view.message = None,
        Outcome::Ignored(reason) => {
            if let Some(msg) = ignored_message(&reason) {
                view.set_message(msg);
            }
        }
        Outcome::Completed(_) => {}
    }
}

/// Main event loop
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: Config,
) -> anyhow::Result<AppResult> {
    let status = Rc::new(RefCell::new(None));
    let mut dialog = build_dialog(&config, status.clone())?;
    let mut view = ViewState::new(config.filterable);
    let title = config.title_text();

    loop {
        if let Some(msg) = status.borrow_mut().take() {
            view.set_message(msg);
        }

        let rows = dialog.visible_rows();
        view.clamp_focus(rows.len());
        let size = terminal.size()?;
        let height = list_height(Rect::new(0, 0, size.width, size.height));
        view.adjust_viewport(height);

        terminal.draw(|frame| {
            let ctx = RenderContext {
                dialog: &dialog,
                view: &view,
                title: title.as_deref(),
                rows: &rows,
            };
            render_frame(frame, &ctx);
        })?;

        if dialog.is_closed() {
            break;
        }

        // 100ms timeout keeps the loop idle between keystrokes
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key_event(&view, key) {
            KeyAction::None => {}
            KeyAction::MoveUp => view.move_focus(-1, rows.len()),
            KeyAction::MoveDown => view.move_focus(1, rows.len()),
            KeyAction::MoveToTop => view.focus = 0,
            KeyAction::MoveToBottom => view.focus = rows.len().saturating_sub(1),
            KeyAction::Toggle => {
                if !rows.is_empty() {
                    let row = view.focus;
                    dispatch(&mut dialog, &mut view, DialogEvent::Toggle(row));
                }
            }
            KeyAction::PressUp => dispatch(&mut dialog, &mut view, DialogEvent::Up),
            KeyAction::PressOpen => dispatch(&mut dialog, &mut view, DialogEvent::Open),
            KeyAction::PressSelect => dispatch(&mut dialog, &mut view, DialogEvent::Select),
            KeyAction::Cancel => dispatch(&mut dialog, &mut view, DialogEvent::Cancel),
            KeyAction::StartFilter => {
                let query = dialog.filter().map(|f| f.query().to_string()).unwrap_or_default();
                let cursor = query.len();
                view.input = InputMode::Filter { query, cursor };
            }
            KeyAction::UpdateFilter { query, cursor } => {
                dialog.set_filter_query(query.as_str());
                view.filter_active = !query.is_empty();
                view.focus = 0;
                view.viewport_top = 0;
                view.input = InputMode::Filter { query, cursor };
            }
            KeyAction::ConfirmFilter => view.input = InputMode::Browse,
            KeyAction::ClearFilter => {
                dialog.set_filter_query("");
                view.filter_active = false;
                view.input = InputMode::Browse;
            }
        }
    }

    let result = dialog.result().cloned().unwrap_or(PickResult::Cancelled);
    if let Some(file) = &config.state_file {
        persist_state(file, &dialog.save(), &result);
    }

    Ok(AppResult {
        exit_code: result.exit_code(),
        result,
    })
}

/// Keep the state file for a cancelled dialog, drop it after a selection
fn persist_state(file: &Path, snapshot: &Snapshot, result: &PickResult) {
    let outcome = match result {
        PickResult::Cancelled => snapshot.save_to(file).map_err(anyhow::Error::from),
        PickResult::Selected(_) if file.exists() => fs::remove_file(file).map_err(Into::into),
        PickResult::Selected(_) => Ok(()),
    };
    if let Err(e) = outcome {
        warn!(error = %e, file = %file.display(), "could not update state file");
    }
}
