//! Keyboard event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{InputMode, ViewState};

/// Actions that can result from key handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Move focus up
    MoveUp,
    /// Move focus down
    MoveDown,
    /// Move to top
    MoveToTop,
    /// Move to bottom
    MoveToBottom,
    /// Check/uncheck the focused row
    Toggle,
    /// Press Up (parent folder)
    PressUp,
    /// Press Open (enter checked folder)
    PressOpen,
    /// Press Select (finish)
    PressSelect,
    /// Dismiss the picker without a result
    Cancel,
    /// Start typing a filter query
    StartFilter,
    /// Filter query edited
    UpdateFilter { query: String, cursor: usize },
    /// Leave filter input, keeping the query
    ConfirmFilter,
    /// Leave filter input and clear the query
    ClearFilter,
}

/// Handle key event and return the resulting action
pub fn handle_key_event(view: &ViewState, key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Cancel;
    }

    match &view.input {
        InputMode::Browse => handle_browse_mode(view, key),
        InputMode::Filter { query, cursor } => handle_filter_mode(key, query, *cursor),
    }
}

/// Handle keys in browse mode
fn handle_browse_mode(view: &ViewState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') => KeyAction::Cancel,
        KeyCode::Esc => {
            if view.filter_active {
                KeyAction::ClearFilter
            } else {
                KeyAction::Cancel
            }
        }

        KeyCode::Up | KeyCode::Char('k') => KeyAction::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::MoveDown,
        KeyCode::Home | KeyCode::Char('g') => KeyAction::MoveToTop,
        KeyCode::End | KeyCode::Char('G') => KeyAction::MoveToBottom,

        KeyCode::Char(' ') => KeyAction::Toggle,
        KeyCode::Char('u') | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
            KeyAction::PressUp
        }
        KeyCode::Char('o') | KeyCode::Right | KeyCode::Char('l') => KeyAction::PressOpen,
        KeyCode::Enter => KeyAction::PressSelect,

        KeyCode::Char('/') if view.filterable => KeyAction::StartFilter,
        _ => KeyAction::None,
    }
}

/// Handle keys while typing a filter query
fn handle_filter_mode(key: KeyEvent, query: &str, cursor: usize) -> KeyAction {
    match key.code {
        KeyCode::Enter => KeyAction::ConfirmFilter,
        KeyCode::Esc => KeyAction::ClearFilter,
        _ => match update_input_buffer(key, query, cursor) {
            Some((query, cursor)) => KeyAction::UpdateFilter { query, cursor },
            None => KeyAction::None,
        },
    }
}

/// Apply an editing key to `buffer`; `cursor` is a byte offset on a char boundary
pub fn update_input_buffer(key: KeyEvent, buffer: &str, cursor: usize) -> Option<(String, usize)> {
    let prev = buffer[..cursor].chars().next_back().map(char::len_utf8);
    let next = buffer[cursor..].chars().next().map(char::len_utf8);

    match key.code {
        KeyCode::Char(c) => {
            let mut new_buffer = buffer.to_string();
            new_buffer.insert(cursor, c);
            Some((new_buffer, cursor + c.len_utf8()))
        }
        KeyCode::Backspace => {
            let width = prev?;
            let mut new_buffer = buffer.to_string();
            new_buffer.replace_range(cursor - width..cursor, "");
            Some((new_buffer, cursor - width))
        }
        KeyCode::Delete => {
            let width = next?;
            let mut new_buffer = buffer.to_string();
            new_buffer.replace_range(cursor..cursor + width, "");
            Some((new_buffer, cursor))
        }
        KeyCode::Left => prev.map(|w| (buffer.to_string(), cursor - w)),
        KeyCode::Right => next.map(|w| (buffer.to_string(), cursor + w)),
        KeyCode::Home if cursor > 0 => Some((buffer.to_string(), 0)),
        KeyCode::End if cursor < buffer.len() => Some((buffer.to_string(), buffer.len())),
        _ => None,
    }
}
