use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, MAX_LISTS};
use crate::drag::DropTarget;
use crate::model::card::TaskCard;
use crate::ui::theme::{due_color, label_color, list_border, priority_color};

const CARD_HEIGHT: u16 = 4;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    let header_area = rows[0];
    let columns_area = rows[1];

    let board_title = app.current_board_title().unwrap_or("Board").to_string();
    let header = if app.loading {
        format!(" {board_title} (loading...)")
    } else {
        format!(" {board_title}")
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        header_area,
    );

    // One column per list plus the add-list placeholder
    let list_count = app.board.lists.len();
    let columns = list_count + 1;
    let constraints: Vec<Constraint> = (0..columns)
        .map(|_| Constraint::Ratio(1, columns as u32))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(columns_area);

    for i in 0..list_count {
        render_list(f, chunks[i], app, i);
    }
    render_list_placeholder(f, chunks[list_count], list_count);

    render_drag_overlay(f, area, app);
}

fn render_list(f: &mut Frame, column: Rect, app: &mut App, index: usize) {
    let list = &app.board.lists[index];
    let list_id = list.id;
    let selected = index == app.selected_list;
    let hovered = app
        .drag
        .pointer()
        .is_some_and(|(x, y)| column.contains(Position::new(x, y)));

    let cards = app.board.cards_in_list(list_id);
    let title = format!(" {} ({}) ", list.title, cards.len());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(list_border(selected, hovered)))
        .title(title);
    let inner = block.inner(column);
    f.render_widget(block, column);
    app.hit_map.push(column, DropTarget::List(list_id));

    if cards.is_empty() {
        let hint_area = Rect::new(
            inner.x,
            inner.y + (inner.height / 2).min(2),
            inner.width,
            1,
        )
        .intersection(inner);
        f.render_widget(
            Paragraph::new("Drop cards here")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            hint_area,
        );
        return;
    }

    let mut y = inner.y;
    for (ci, &card) in cards.iter().enumerate() {
        if y + CARD_HEIGHT > inner.bottom() {
            let remaining = cards.len() - ci;
            if y < inner.bottom() {
                f.render_widget(
                    Paragraph::new(format!("… {remaining} more"))
                        .style(Style::default().fg(Color::DarkGray)),
                    Rect::new(inner.x, y, inner.width, 1),
                );
            }
            break;
        }
        let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        let card_selected = selected && ci == app.selected_card;
        let card_dragged = app.drag.dragging_card() == Some(card.id);
        render_card(f, card_area, card, card_selected, card_dragged);
        app.hit_map.push(card_area, DropTarget::Card(card.id));
        y += CARD_HEIGHT;
    }
}

fn render_card(f: &mut Frame, area: Rect, card: &TaskCard, selected: bool, dragged: bool) {
    let border = if selected { Color::Cyan } else { Color::DarkGray };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if dragged {
        // The source card dims while its ghost follows the pointer
        block = block.style(Style::default().add_modifier(Modifier::DIM));
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut lines = vec![Line::from(Span::styled(card.title.clone(), title_style))];

    let mut meta: Vec<Span> = vec![Span::styled(
        card.priority.as_str(),
        Style::default().fg(priority_color(card.priority)),
    )];
    if let Some(due) = card.due_date {
        meta.push(Span::raw(" · "));
        meta.push(Span::styled(
            due.format("%b %-d").to_string(),
            Style::default().fg(due_color(card)),
        ));
        if card.is_overdue() {
            meta.push(Span::styled(" overdue", Style::default().fg(Color::Red)));
        }
    }
    if !card.checklist.is_empty() {
        meta.push(Span::raw(" · "));
        meta.push(Span::styled(
            format!("✓{}/{}", card.checklist_done(), card.checklist.len()),
            Style::default().fg(Color::Gray),
        ));
    }
    if !card.comments.is_empty() {
        meta.push(Span::styled(
            format!(" 💬{}", card.comments.len()),
            Style::default().fg(Color::Gray),
        ));
    }
    if !card.attachments.is_empty() {
        meta.push(Span::styled(" 📎", Style::default().fg(Color::Gray)));
    }
    for (i, label) in card.labels.iter().take(3).enumerate() {
        meta.push(Span::raw(" "));
        meta.push(Span::styled(
            format!("[{label}]"),
            Style::default().fg(label_color(i)),
        ));
    }
    if card.labels.len() > 3 {
        meta.push(Span::styled(
            format!(" +{}", card.labels.len() - 3),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(meta));

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_list_placeholder(f: &mut Frame, area: Rect, list_count: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = if list_count < MAX_LISTS {
        vec![
            Line::raw(""),
            Line::from(Span::styled(
                "+ Add another list",
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled("press N", Style::default().fg(Color::DarkGray))),
        ]
    } else {
        vec![
            Line::raw(""),
            Line::from(Span::styled(
                "Maximum of 3 lists reached",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Delete a list to add another",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Ghost of the dragged card, following the pointer.
fn render_drag_overlay(f: &mut Frame, area: Rect, app: &App) {
    let (Some(card_id), Some((x, y))) = (app.drag.dragging_card(), app.drag.pointer()) else {
        return;
    };
    let Some(card) = app.board.card(card_id) else {
        return;
    };

    let text = format!(" {} ", card.title);
    let width = (text.chars().count() as u16).min(area.width);
    let overlay = Rect::new(
        x.min(area.right().saturating_sub(width)),
        y.min(area.bottom().saturating_sub(1)),
        width,
        1,
    )
    .intersection(area);
    if overlay.width == 0 || overlay.height == 0 {
        return;
    }
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Yellow)),
        overlay,
    );
}
