use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::{due_color, label_color, priority_color};

pub fn render(f: &mut Frame, area: Rect, app: &App, card_id: i64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Cyan))
        .title(" Card ");

    // The card can vanish under us when a refetch lands; the app switches
    // back to the board on its next update.
    let Some(card) = app.board.card(card_id) else {
        f.render_widget(block, area);
        return;
    };

    let gray = Style::default().fg(ratatui::style::Color::Gray);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        card.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::raw(""));

    if let Some(list) = app.board.list(card.list_id) {
        lines.push(Line::from(vec![
            Span::styled("List: ", gray),
            Span::raw(list.title.clone()),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled("Priority: ", gray),
        Span::styled(
            card.priority.as_str(),
            Style::default().fg(priority_color(card.priority)),
        ),
    ]));

    if let Some(due) = card.due_date {
        let mut spans = vec![
            Span::styled("Due: ", gray),
            Span::styled(
                due.format("%b %-d, %Y").to_string(),
                Style::default().fg(due_color(card)),
            ),
        ];
        if card.is_overdue() {
            spans.push(Span::styled(
                " Overdue",
                Style::default()
                    .fg(ratatui::style::Color::Red)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }

    if !card.labels.is_empty() {
        let mut spans = vec![Span::styled("Labels: ", gray)];
        for (i, label) in card.labels.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("[{label}]"),
                Style::default().fg(label_color(i)),
            ));
        }
        lines.push(Line::from(spans));
    }

    if !card.attachments.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Attachments: ", gray),
            Span::raw(format!("{}", card.attachments.len())),
        ]));
    }

    if let Some(desc) = &card.description {
        lines.push(Line::raw(""));
        lines.push(Line::raw(desc.clone()));
    }

    if !card.checklist.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("Checklist {}/{}", card.checklist_done(), card.checklist.len()),
            gray,
        )));
        for (i, item) in card.checklist.iter().enumerate() {
            let cursor = if i == app.detail_row { "› " } else { "  " };
            let mark = if item.completed { "[x] " } else { "[ ] " };
            let style = if i == app.detail_row {
                Style::default()
                    .fg(ratatui::style::Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if item.completed {
                Style::default().fg(ratatui::style::Color::DarkGray)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{cursor}{mark}{}", item.text),
                style,
            )));
        }
    }

    if !card.comments.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("Comments ({})", card.comments.len()),
            gray,
        )));
        for comment in &card.comments {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} · {}: ", comment.author, comment.timestamp.format("%b %-d")),
                    Style::default().fg(ratatui::style::Color::DarkGray),
                ),
                Span::raw(comment.text.clone()),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
