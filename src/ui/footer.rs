use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ViewMode};
use crate::drag::DragState;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    match &app.view_mode {
        ViewMode::BoardPicker => {
            spans.push(hint("↑↓", "navigate"));
            spans.push(hint("enter", "open"));
            spans.push(hint("n", "new board"));
            spans.push(hint("e", "rename"));
            spans.push(hint("x", "delete"));
            spans.push(hint("r", "refresh"));
            spans.push(hint("q", "quit"));
        }
        ViewMode::Board => {
            spans.push(hint("↑↓←→", "navigate"));
            spans.push(hint("enter", "open card"));
            spans.push(hint("n", "card"));
            spans.push(hint("N", "list"));
            spans.push(hint("<>", "move card"));
            spans.push(hint("x", "delete"));
            spans.push(hint("b", "boards"));
            spans.push(hint("q", "quit"));
        }
        ViewMode::CardDetail(_) => {
            spans.push(hint("↑↓", "checklist"));
            spans.push(hint("space", "toggle"));
            spans.push(hint("e", "title"));
            spans.push(hint("d", "description"));
            spans.push(hint("p", "priority"));
            spans.push(hint("u", "due"));
            spans.push(hint("l", "label"));
            spans.push(hint("c", "check item"));
            spans.push(hint("m", "comment"));
            spans.push(hint("x", "delete"));
            spans.push(hint("esc", "back"));
        }
    }

    // Drag indicator
    match app.drag.state() {
        DragState::Dragging { .. } => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                " DRAG ",
                Style::default()
                    .fg(ratatui::style::Color::Black)
                    .bg(ratatui::style::Color::Yellow),
            ));
        }
        DragState::Committing { .. } => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                " SAVING ",
                Style::default()
                    .fg(ratatui::style::Color::Black)
                    .bg(ratatui::style::Color::Cyan),
            ));
        }
        _ => {}
    }

    // Flash message
    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            msg,
            Style::default().fg(ratatui::style::Color::Yellow),
        ));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);
    f.render_widget(paragraph, area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(ratatui::style::Color::DarkGray),
    )
}
