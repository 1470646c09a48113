use ratatui::style::Color;

use crate::model::card::{Priority, TaskCard};

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Blue,
        Priority::Low => Color::Gray,
    }
}

pub fn due_color(card: &TaskCard) -> Color {
    if card.is_overdue() {
        Color::Red
    } else if card.is_due_soon() {
        Color::Blue
    } else {
        Color::Gray
    }
}

pub fn label_color(index: usize) -> Color {
    const COLORS: [Color; 6] = [
        Color::Blue,
        Color::LightBlue,
        Color::Gray,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
    ];
    COLORS[index % COLORS.len()]
}

pub fn list_border(selected: bool, hovered: bool) -> Color {
    if hovered {
        Color::Yellow
    } else if selected {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}
