use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::app::Action;

pub async fn run_event_loop(tx: mpsc::UnboundedSender<Action>) {
    let mut reader = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if tx.send(Action::Tick).is_err() {
                    break;
                }
            }
            maybe_event = reader.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if let Some(action) = key_to_action(key) {
                            if tx.send(action).is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        if let Some(action) = mouse_to_action(mouse) {
                            if tx.send(action).is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        // Terminal will re-render on next frame
                    }
                    Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }
}

fn key_to_action(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up => Some(Action::Key(KeyAction::Up)),
        KeyCode::Down => Some(Action::Key(KeyAction::Down)),
        KeyCode::Left => Some(Action::Key(KeyAction::Left)),
        KeyCode::Right => Some(Action::Key(KeyAction::Right)),
        KeyCode::Enter => Some(Action::Key(KeyAction::Select)),
        KeyCode::Esc => Some(Action::Key(KeyAction::Escape)),
        KeyCode::Backspace => Some(Action::Key(KeyAction::Backspace)),
        KeyCode::Tab => Some(Action::Key(KeyAction::Tab)),
        KeyCode::Char(c) => Some(Action::Key(KeyAction::Char(c))),
        _ => None,
    }
}

fn mouse_to_action(mouse: MouseEvent) -> Option<Action> {
    let at = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Pointer(PointerEvent::Press(at))),
        MouseEventKind::Drag(MouseButton::Left) => Some(Action::Pointer(PointerEvent::Move(at))),
        MouseEventKind::Up(MouseButton::Left) => Some(Action::Pointer(PointerEvent::Release(at))),
        MouseEventKind::ScrollUp => Some(Action::Key(KeyAction::Up)),
        MouseEventKind::ScrollDown => Some(Action::Key(KeyAction::Down)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PointerEvent {
    Press((u16, u16)),
    Move((u16, u16)),
    Release((u16, u16)),
}

#[derive(Debug, Clone)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Select,
    Escape,
    Char(char),
    Backspace,
    Tab,
}
