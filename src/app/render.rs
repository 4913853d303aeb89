//! Rendering helpers for the event loop

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::{InputMode, ViewState};
use crate::core::{Buttons, ChoiceMode};
use crate::dialog::FilePickerDialog;
use crate::listing::{Entry, FileSystem};

/// Context for rendering a frame
pub struct RenderContext<'a, F> {
    pub dialog: &'a FilePickerDialog<F>,
    pub view: &'a ViewState,
    pub title: Option<&'a str>,
    /// Visible listing indices, in display order
    pub rows: &'a [usize],
}

/// Rows available to the list for a frame of this size
pub fn list_height(area: Rect) -> usize {
    area.height.saturating_sub(3).saturating_sub(2) as usize
}

/// Render a complete frame
pub fn render_frame<F: FileSystem>(frame: &mut Frame, ctx: &RenderContext<F>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(frame.area());

    render_list(frame, ctx, chunks[0]);
    render_footer(frame, ctx, chunks[1]);
}

fn render_list<F: FileSystem>(frame: &mut Frame, ctx: &RenderContext<F>, area: Rect) {
    let controller = ctx.dialog.controller();
    let path = controller.current_path().display().to_string();
    let title = match ctx.title {
        Some(t) => format!(" {} - {} ", t, path),
        None => format!(" {} ", path),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if let Some(text) = ctx.dialog.listing().empty_text() {
        let para = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    }

    let height = area.height.saturating_sub(2) as usize;
    let checkable = controller.mode().choice_mode() != ChoiceMode::None;

    let items: Vec<ListItem> = ctx
        .rows
        .iter()
        .enumerate()
        .skip(ctx.view.viewport_top)
        .take(height)
        .filter_map(|(row, &index)| {
            let entry = ctx.dialog.listing().get(index)?;
            let focused = row == ctx.view.focus;
            let checked = controller.is_checked(index);
            Some(render_entry(ctx, entry, focused, checkable.then_some(checked)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Render a single entry as a ListItem
fn render_entry<'a, F: FileSystem>(
    ctx: &RenderContext<F>,
    entry: &'a Entry,
    focused: bool,
    checked: Option<bool>,
) -> ListItem<'a> {
    let mut spans = Vec::new();

    spans.push(Span::raw(if focused { "> " } else { "  " }));
    match checked {
        Some(true) => spans.push(Span::styled("[x] ", Style::default().fg(Color::Green))),
        Some(false) => spans.push(Span::raw("[ ] ")),
        None => {}
    }

    let name_style = if entry.is_folder() {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let range = ctx
        .dialog
        .filter()
        .and_then(|f| f.highlight_range(&entry.name))
        .filter(|r| !r.is_empty());
    match range {
        Some(r) => {
            spans.push(Span::styled(&entry.name[..r.start], name_style));
            spans.push(Span::styled(
                &entry.name[r.clone()],
                name_style.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::styled(&entry.name[r.end..], name_style));
        }
        None => spans.push(Span::styled(entry.name.as_str(), name_style)),
    }
    if entry.is_folder() {
        spans.push(Span::styled("/", name_style));
    }

    let item = ListItem::new(Line::from(spans));
    if focused {
        item.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        item
    }
}

fn render_footer<F: FileSystem>(frame: &mut Frame, ctx: &RenderContext<F>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let buttons = Paragraph::new(button_line(ctx.dialog.buttons()))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(buttons, chunks[0]);

    let status = match &ctx.view.input {
        InputMode::Filter { query, .. } => format!("/{}", query),
        InputMode::Browse => {
            let counts = ctx.dialog.controller().checked_counts();
            let filter = ctx
                .dialog
                .filter()
                .filter(|f| f.is_active())
                .map(|f| format!("filter: {} | ", f.query()))
                .unwrap_or_default();
            let message = ctx.view.message.as_deref().unwrap_or("? Space check, Enter select");
            format!("{}Checked: {} | {}", filter, counts.total, message)
        }
    };
    let status = Paragraph::new(status).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[1]);
}

fn button_line(buttons: Buttons) -> Line<'static> {
    let style = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    Line::from(vec![
        Span::styled("[ Up ]", style(buttons.up)),
        Span::raw(" "),
        Span::styled("[ Open ]", style(buttons.open)),
        Span::raw(" "),
        Span::styled("[ Select ]", style(buttons.select)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompositeMode, Title};
    use crate::dialog::PickerListener;
    use crate::integrate::PickResult;
    use crate::listing::StdFileSystem;
    use ratatui::backend::TestBackend;
    use std::fs;
    use tempfile::TempDir;

    struct Quiet;

    impl PickerListener for Quiet {
        fn on_result(&mut self, _tag: &str, _result: &PickResult) {}
    }

    fn screen(dialog: &FilePickerDialog<StdFileSystem>, view: &ViewState) -> String {
        let rows = dialog.visible_rows();
        let ctx = RenderContext {
            dialog,
            view,
            title: Some("Pick"),
            rows: &rows,
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| render_frame(frame, &ctx)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_entries_and_buttons() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("b")).unwrap();
        let mut dialog = FilePickerDialog::builder()
            .storage_root(temp.path())
            .mode(CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE)
            .title(Title::from("Pick"))
            .listener(Quiet)
            .build(StdFileSystem)
            .unwrap();
        dialog.handle(crate::dialog::DialogEvent::Toggle(0));

        let text = screen(&dialog, &ViewState::new(false));
        assert!(text.contains("[x] a.txt"));
        assert!(text.contains("[ ] b/"));
        assert!(text.contains("[ Select ]"));
        assert!(text.contains("Checked: 1"));
    }

    #[test]
    fn test_renders_empty_placeholder() {
        let temp = TempDir::new().unwrap();
        let dialog = FilePickerDialog::builder()
            .storage_root(temp.path())
            .listener(Quiet)
            .build(StdFileSystem)
            .unwrap();
        assert!(screen(&dialog, &ViewState::new(false)).contains("List is empty!"));
    }

    #[test]
    fn test_list_height_leaves_room_for_footer() {
        assert_eq!(list_height(Rect::new(0, 0, 80, 24)), 19);
        assert_eq!(list_height(Rect::new(0, 0, 80, 2)), 0);
    }
}
