use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputTarget};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(input) = &app.input else {
        return;
    };

    let title = match input.target {
        InputTarget::NewBoard => " New board ",
        InputTarget::RenameBoard(_) => " Rename board ",
        InputTarget::NewList => " New list ",
        InputTarget::RenameList(_) => " Rename list ",
        InputTarget::NewCard(_) => " New card ",
        InputTarget::CardTitle(_) => " Edit title ",
        InputTarget::CardDescription(_) => " Edit description ",
        InputTarget::CardDueDate(_) => " Due date (YYYY-MM-DD) ",
        InputTarget::CardLabel(_) => " Add label ",
        InputTarget::CardChecklistItem(_) => " Add checklist item ",
        InputTarget::CardComment(_) => " Add comment ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Yellow))
        .title(title);

    let paragraph = Paragraph::new(input.buffer.as_str()).block(block);
    f.render_widget(paragraph, area);

    // Cursor sits at the end of the buffer
    let cursor = input.buffer.chars().count() as u16;
    let x = (area.x + 1 + cursor).min(area.x + area.width.saturating_sub(2));
    f.set_cursor_position((x, area.y + 1));
}
