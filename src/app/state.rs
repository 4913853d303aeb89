//! Presentation state of the terminal picker

/// What keystrokes currently edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys drive the dialog
    #[default]
    Browse,
    /// Keys edit the filter query
    Filter { query: String, cursor: usize },
}

/// Cursor, scroll and status line of the list presenter
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Focused row among visible rows
    pub focus: usize,
    /// Top of viewport (scroll position)
    pub viewport_top: usize,
    /// Current input mode
    pub input: InputMode,
    /// Whether the dialog accepts a filter query
    pub filterable: bool,
    /// Whether a non-empty filter query is applied
    pub filter_active: bool,
    /// Status message
    pub message: Option<String>,
}

impl ViewState {
    pub fn new(filterable: bool) -> Self {
        Self {
            filterable,
            ..Self::default()
        }
    }

    /// Move focus by `delta` rows within `rows`
    pub fn move_focus(&mut self, delta: isize, rows: usize) {
        if rows == 0 {
            self.focus = 0;
            return;
        }
        let target = self.focus as isize + delta;
        self.focus = target.clamp(0, rows as isize - 1) as usize;
    }

    /// Keep focus inside `rows` after the list changed
    pub fn clamp_focus(&mut self, rows: usize) {
        self.focus = self.focus.min(rows.saturating_sub(1));
    }

    /// Reset cursor and scroll for a freshly shown folder
    pub fn reset(&mut self) {
        self.focus = 0;
        self.viewport_top = 0;
        self.filter_active = false;
        self.input = InputMode::Browse;
    }

    /// Adjust viewport to keep focus visible
    pub fn adjust_viewport(&mut self, visible_height: usize) {
        if self.focus < self.viewport_top {
            self.viewport_top = self.focus;
        } else if visible_height > 0 && self.focus >= self.viewport_top + visible_height {
            self.viewport_top = self.focus + 1 - visible_height;
        }
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_focus_clamps() {
        let mut view = ViewState::new(false);
        view.move_focus(-1, 3);
        assert_eq!(view.focus, 0);
        view.move_focus(5, 3);
        assert_eq!(view.focus, 2);
        view.move_focus(1, 0);
        assert_eq!(view.focus, 0);
    }

    #[test]
    fn test_viewport_follows_focus() {
        let mut view = ViewState::new(false);
        view.focus = 25;
        view.adjust_viewport(10);
        assert_eq!(view.viewport_top, 16);

        view.focus = 5;
        view.adjust_viewport(10);
        assert_eq!(view.viewport_top, 5);
    }

    #[test]
    fn test_reset_leaves_filter_mode() {
        let mut view = ViewState::new(true);
        view.focus = 4;
        view.filter_active = true;
        view.input = InputMode::Filter {
            query: "x".into(),
            cursor: 1,
        };
        view.reset();
        assert_eq!(view.focus, 0);
        assert!(!view.filter_active);
        assert_eq!(view.input, InputMode::Browse);
        assert!(view.filterable);
    }
}
