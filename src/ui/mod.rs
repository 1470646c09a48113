pub mod board;
pub mod board_picker;
pub mod card_detail;
pub mod footer;
pub mod input_bar;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, ViewMode};

pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Bottom bar: input bar (3) while editing, hint footer (1) otherwise
    let bottom_height = if app.input.is_some() { 3 } else { 1 };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(bottom_height)])
        .split(size);

    let main_area = vertical[0];
    let bottom_area = vertical[1];

    // Hit regions are re-recorded on every frame; only the board view has
    // droppable geometry.
    app.hit_map.clear();

    match app.view_mode {
        ViewMode::BoardPicker => board_picker::render(f, main_area, app),
        ViewMode::Board => board::render(f, main_area, app),
        ViewMode::CardDetail(card_id) => card_detail::render(f, main_area, app, card_id),
    }

    if app.input.is_some() {
        input_bar::render(f, bottom_area, app);
    } else {
        footer::render(f, bottom_area, app);
    }
}
