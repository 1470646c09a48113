use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .boards
        .iter()
        .enumerate()
        .map(|(i, board)| {
            let selected = i == app.selected_board;

            let marker = if app.current_board == Some(board.id) {
                Span::styled("● ", Style::default().fg(ratatui::style::Color::Green))
            } else {
                Span::raw("  ")
            };

            let star = if board.is_starred {
                Span::styled("★ ", Style::default().fg(ratatui::style::Color::Yellow))
            } else {
                Span::raw("  ")
            };

            let title_style = if selected {
                Style::default()
                    .fg(ratatui::style::Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let title = Span::styled(board.title.clone(), title_style);

            let description = board
                .description
                .as_deref()
                .map(|d| {
                    Span::styled(
                        format!("  {d}"),
                        Style::default().fg(ratatui::style::Color::DarkGray),
                    )
                })
                .unwrap_or_else(|| Span::raw(""));

            ListItem::new(Line::from(vec![marker, star, title, description]))
        })
        .collect();

    let title = if app.loading {
        " Boards (loading...) "
    } else {
        " Boards "
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Cyan))
            .title(title),
    );

    f.render_widget(list, area);
}
