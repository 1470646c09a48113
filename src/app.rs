use std::collections::HashSet;
use std::time::Instant;

use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::sync::mpsc;

use crate::board::BoardState;
use crate::config::{self, AppConfig};
use crate::drag::{DragSession, DragState, DropOutcome, HitMap};
use crate::event::{KeyAction, PointerEvent};
use crate::model::board::TaskBoard;
use crate::model::card::{CardComment, ChecklistItem, TaskCard};
use crate::model::list::TaskList;
use crate::store::{BoardStore, CardPatch, MoveRequest};

/// Lists per board, enforced client-side only.
pub const MAX_LISTS: usize = 3;

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Pointer(PointerEvent),
    Tick,
    BoardsLoaded(Vec<TaskBoard>),
    BoardDataLoaded {
        lists: Vec<TaskList>,
        cards: Vec<TaskCard>,
    },
    FetchError(String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    BoardPicker,
    Board,
    CardDetail(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    NewBoard,
    RenameBoard(i64),
    NewList,
    RenameList(i64),
    NewCard(i64),
    CardTitle(i64),
    CardDescription(i64),
    CardDueDate(i64),
    CardLabel(i64),
    CardChecklistItem(i64),
    CardComment(i64),
}

#[derive(Debug, Clone)]
pub struct InputState {
    pub buffer: String,
    pub target: InputTarget,
}

pub struct App {
    pub boards: Vec<TaskBoard>,
    pub selected_board: usize,
    pub current_board: Option<i64>,
    pub board: BoardState,
    pub selected_list: usize,
    pub selected_card: usize,
    pub detail_row: usize,
    pub view_mode: ViewMode,
    pub drag: DragSession,
    pub hit_map: HitMap,
    pub input: Option<InputState>,
    pub loading: bool,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub action_tx: mpsc::UnboundedSender<Action>,
    pub author: String,
    store: Box<dyn BoardStore>,
}

impl App {
    pub fn new(
        config: &AppConfig,
        store: Box<dyn BoardStore>,
        action_tx: mpsc::UnboundedSender<Action>,
        saved_board: Option<i64>,
    ) -> Self {
        let view_mode = if saved_board.is_some() {
            ViewMode::Board
        } else {
            ViewMode::BoardPicker
        };

        Self {
            boards: Vec::new(),
            selected_board: 0,
            current_board: saved_board,
            board: BoardState::default(),
            selected_list: 0,
            selected_card: 0,
            detail_row: 0,
            view_mode,
            drag: DragSession::default(),
            hit_map: HitMap::default(),
            input: None,
            loading: true,
            flash_message: None,
            should_quit: false,
            action_tx,
            author: config.author(),
            store,
        }
    }

    pub async fn update(&mut self, action: Action) {
        // Clear flash message after 3 seconds
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key).await,
            Action::Pointer(ev) => self.handle_pointer(ev).await,
            Action::Tick => {}
            Action::BoardsLoaded(boards) => self.boards_loaded(boards).await,
            Action::BoardDataLoaded { lists, cards } => {
                self.board.replace(lists, cards);
                self.loading = false;
                self.clamp_selection();
                if let ViewMode::CardDetail(card_id) = self.view_mode {
                    if self.board.card(card_id).is_none() {
                        self.view_mode = ViewMode::Board;
                    }
                }
            }
            Action::FetchError(msg) => {
                self.loading = false;
                self.flash(format!("Fetch error: {msg}"));
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    async fn boards_loaded(&mut self, boards: Vec<TaskBoard>) {
        self.boards = boards;
        self.loading = false;
        if self.selected_board >= self.boards.len() && !self.boards.is_empty() {
            self.selected_board = self.boards.len() - 1;
        }

        // The remembered board may have been deleted elsewhere; fall back to
        // the first board, or to the picker when none are left.
        if let Some(id) = self.current_board {
            if !self.boards.iter().any(|b| b.id == id) {
                if let Some(first_id) = self.boards.first().map(|b| b.id) {
                    self.current_board = Some(first_id);
                    let _ = config::save_selected_board(first_id);
                    self.refresh_board().await;
                } else {
                    self.current_board = None;
                    self.board.clear();
                    self.view_mode = ViewMode::BoardPicker;
                }
            }
        }
    }

    async fn handle_key(&mut self, key: KeyAction) {
        if self.input.is_some() {
            return self.handle_input_key(key).await;
        }
        match self.view_mode {
            ViewMode::BoardPicker => self.handle_picker_key(key).await,
            ViewMode::Board => self.handle_board_key(key).await,
            ViewMode::CardDetail(card_id) => self.handle_detail_key(key, card_id).await,
        }
    }

    async fn handle_pointer(&mut self, ev: PointerEvent) {
        match ev {
            PointerEvent::Press(at) => {
                if self.view_mode != ViewMode::Board || self.input.is_some() {
                    return;
                }
                if let Some(card_id) = self.hit_map.card_at(at) {
                    self.drag.press(card_id, at);
                    self.select_card(card_id);
                }
            }
            PointerEvent::Move(at) => self.drag.motion(at),
            PointerEvent::Release(at) => {
                let target = self.hit_map.target_at(at);
                match self.drag.release(target, &self.board) {
                    DropOutcome::Click(card_id) => self.open_card(card_id),
                    DropOutcome::Move(req) => self.commit_move(req).await,
                    DropOutcome::None => {}
                }
            }
        }
    }

    /// Dispatch one computed move, then re-derive order from the server.
    /// A failed move is flashed and refetched, so the card visibly snaps
    /// back instead of silently staying where it was dropped.
    async fn commit_move(&mut self, req: MoveRequest) {
        match self.store.move_card(&req).await {
            Ok(_) => self.refresh_board().await,
            Err(e) => {
                self.flash(format!("Move failed: {e}"));
                self.refresh_board().await;
            }
        }
        self.drag.finish();
    }

    async fn handle_board_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            KeyAction::Down => {
                let count = self.selected_list_card_count();
                if count > 0 && self.selected_card < count - 1 {
                    self.selected_card += 1;
                }
            }
            KeyAction::Left => {
                if self.selected_list > 0 {
                    self.selected_list -= 1;
                    self.clamp_selection();
                }
            }
            KeyAction::Right | KeyAction::Tab => {
                if !self.board.lists.is_empty() && self.selected_list < self.board.lists.len() - 1
                {
                    self.selected_list += 1;
                    self.clamp_selection();
                }
            }
            KeyAction::Select => {
                if let Some(card_id) = self.selected_card_id() {
                    self.open_card(card_id);
                }
            }
            KeyAction::Escape => self.drag.cancel(),
            KeyAction::Char('q') => self.should_quit = true,
            KeyAction::Char('r') => self.refresh_board().await,
            KeyAction::Char('b') => {
                self.view_mode = ViewMode::BoardPicker;
                self.refresh_boards().await;
            }
            KeyAction::Char('n') => {
                let list_id = self.board.lists.get(self.selected_list).map(|l| l.id);
                if let Some(list_id) = list_id {
                    self.open_input(InputTarget::NewCard(list_id), String::new());
                }
            }
            KeyAction::Char('N') => {
                if self.board.lists.len() >= MAX_LISTS {
                    self.flash("Maximum of 3 lists reached".into());
                } else {
                    self.open_input(InputTarget::NewList, String::new());
                }
            }
            KeyAction::Char('e') => {
                let list = self
                    .board
                    .lists
                    .get(self.selected_list)
                    .map(|l| (l.id, l.title.clone()));
                if let Some((list_id, title)) = list {
                    self.open_input(InputTarget::RenameList(list_id), title);
                }
            }
            KeyAction::Char('X') => self.delete_selected_list().await,
            KeyAction::Char('x') => {
                if let Some(card_id) = self.selected_card_id() {
                    self.delete_card(card_id).await;
                }
            }
            KeyAction::Char('<') | KeyAction::Char(',') => self.move_selected(-1).await,
            KeyAction::Char('>') | KeyAction::Char('.') => self.move_selected(1).await,
            _ => {}
        }
    }

    async fn handle_picker_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                if self.selected_board > 0 {
                    self.selected_board -= 1;
                }
            }
            KeyAction::Down => {
                if !self.boards.is_empty() && self.selected_board < self.boards.len() - 1 {
                    self.selected_board += 1;
                }
            }
            KeyAction::Select => self.select_board().await,
            KeyAction::Escape => {
                if self.current_board.is_some() {
                    self.view_mode = ViewMode::Board;
                }
            }
            KeyAction::Char('q') => self.should_quit = true,
            KeyAction::Char('r') => self.refresh_boards().await,
            KeyAction::Char('n') => self.open_input(InputTarget::NewBoard, String::new()),
            KeyAction::Char('e') => {
                let board = self
                    .boards
                    .get(self.selected_board)
                    .map(|b| (b.id, b.title.clone()));
                if let Some((board_id, title)) = board {
                    self.open_input(InputTarget::RenameBoard(board_id), title);
                }
            }
            KeyAction::Char('x') => self.delete_selected_board().await,
            _ => {}
        }
    }

    async fn handle_detail_key(&mut self, key: KeyAction, card_id: i64) {
        match key {
            KeyAction::Escape | KeyAction::Left => self.view_mode = ViewMode::Board,
            KeyAction::Up => {
                if self.detail_row > 0 {
                    self.detail_row -= 1;
                }
            }
            KeyAction::Down => {
                let len = self.board.card(card_id).map_or(0, |c| c.checklist.len());
                if len > 0 && self.detail_row < len - 1 {
                    self.detail_row += 1;
                }
            }
            KeyAction::Char(' ') => self.toggle_checklist_item(card_id).await,
            KeyAction::Char('e') => {
                let title = self.board.card(card_id).map(|c| c.title.clone());
                if let Some(title) = title {
                    self.open_input(InputTarget::CardTitle(card_id), title);
                }
            }
            KeyAction::Char('d') => {
                let description = self
                    .board
                    .card(card_id)
                    .and_then(|c| c.description.clone())
                    .unwrap_or_default();
                self.open_input(InputTarget::CardDescription(card_id), description);
            }
            KeyAction::Char('p') => self.cycle_priority(card_id).await,
            KeyAction::Char('u') => {
                let prefill = self
                    .board
                    .card(card_id)
                    .and_then(|c| c.due_date)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                self.open_input(InputTarget::CardDueDate(card_id), prefill);
            }
            KeyAction::Char('l') => self.open_input(InputTarget::CardLabel(card_id), String::new()),
            KeyAction::Char('c') => {
                self.open_input(InputTarget::CardChecklistItem(card_id), String::new())
            }
            KeyAction::Char('m') => self.open_input(InputTarget::CardComment(card_id), String::new()),
            KeyAction::Char('x') => self.delete_card(card_id).await,
            KeyAction::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    async fn handle_input_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Escape => self.input = None,
            KeyAction::Select => self.submit_input().await,
            KeyAction::Char(c) => {
                if let Some(input) = &mut self.input {
                    input.buffer.push(c);
                }
            }
            KeyAction::Backspace => {
                if let Some(input) = &mut self.input {
                    input.buffer.pop();
                }
            }
            _ => {}
        }
    }

    fn open_input(&mut self, target: InputTarget, prefill: String) {
        self.input = Some(InputState {
            buffer: prefill,
            target,
        });
    }

    async fn submit_input(&mut self) {
        let Some(input) = self.input.take() else {
            return;
        };
        let text = input.buffer.trim().to_string();

        match input.target {
            InputTarget::NewBoard => {
                if text.is_empty() {
                    return;
                }
                match self.store.create_board(&text).await {
                    Ok(board) => {
                        self.current_board = Some(board.id);
                        let _ = config::save_selected_board(board.id);
                        self.board.clear();
                        self.view_mode = ViewMode::Board;
                        self.flash("Board created".into());
                        self.refresh_boards().await;
                        self.refresh_board().await;
                    }
                    Err(e) => self.flash(format!("Failed to create board: {e}")),
                }
            }
            InputTarget::RenameBoard(board_id) => {
                match self.store.rename_board(board_id, &text).await {
                    Ok(()) => self.refresh_boards().await,
                    Err(e) => self.flash(format!("Failed to rename board: {e}")),
                }
            }
            InputTarget::NewList => {
                let Some(board_id) = self.current_board else {
                    return;
                };
                if text.is_empty() {
                    return;
                }
                if self.board.lists.len() >= MAX_LISTS {
                    self.flash("Maximum of 3 lists reached".into());
                    return;
                }
                match self.store.create_list(board_id, &text).await {
                    Ok(_) => self.refresh_board().await,
                    Err(e) => self.flash(format!("Failed to create list: {e}")),
                }
            }
            InputTarget::RenameList(list_id) => {
                match self.store.rename_list(list_id, &text).await {
                    Ok(()) => self.refresh_board().await,
                    Err(e) => self.flash(format!("Failed to rename list: {e}")),
                }
            }
            InputTarget::NewCard(list_id) => {
                if text.is_empty() {
                    return;
                }
                let position = self.board.append_position(list_id);
                match self.store.create_card(list_id, &text, position).await {
                    Ok(_) => self.refresh_board().await,
                    Err(e) => self.flash(format!("Failed to create card: {e}")),
                }
            }
            InputTarget::CardTitle(card_id) => {
                if text.is_empty() {
                    return;
                }
                self.apply_patch(
                    card_id,
                    CardPatch {
                        title: Some(text),
                        ..Default::default()
                    },
                )
                .await;
            }
            InputTarget::CardDescription(card_id) => {
                self.apply_patch(
                    card_id,
                    CardPatch {
                        description: Some(text),
                        ..Default::default()
                    },
                )
                .await;
            }
            InputTarget::CardDueDate(card_id) => {
                if text.is_empty() {
                    return;
                }
                match NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
                    Ok(date) => {
                        let due = date.and_time(NaiveTime::MIN).and_utc();
                        self.apply_patch(
                            card_id,
                            CardPatch {
                                due_date: Some(due),
                                ..Default::default()
                            },
                        )
                        .await;
                    }
                    Err(_) => {
                        self.flash("Invalid date, use YYYY-MM-DD".into());
                        self.input = Some(input);
                    }
                }
            }
            InputTarget::CardLabel(card_id) => {
                if text.is_empty() {
                    return;
                }
                let Some(card) = self.board.card(card_id) else {
                    return;
                };
                let mut labels = card.labels.clone();
                labels.push(text);
                self.apply_patch(
                    card_id,
                    CardPatch {
                        labels: Some(labels),
                        ..Default::default()
                    },
                )
                .await;
            }
            InputTarget::CardChecklistItem(card_id) => {
                if text.is_empty() {
                    return;
                }
                let Some(card) = self.board.card(card_id) else {
                    return;
                };
                let mut checklist = card.checklist.clone();
                let next_id = checklist.iter().map(|i| i.id).max().unwrap_or(0) + 1;
                checklist.push(ChecklistItem {
                    id: next_id,
                    text,
                    completed: false,
                });
                self.apply_patch(
                    card_id,
                    CardPatch {
                        checklist: Some(checklist),
                        ..Default::default()
                    },
                )
                .await;
            }
            InputTarget::CardComment(card_id) => {
                if text.is_empty() {
                    return;
                }
                let author = self.author.clone();
                let Some(card) = self.board.card(card_id) else {
                    return;
                };
                let mut comments = card.comments.clone();
                let next_id = comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
                comments.push(CardComment {
                    id: next_id,
                    text,
                    author,
                    timestamp: Utc::now(),
                });
                self.apply_patch(
                    card_id,
                    CardPatch {
                        comments: Some(comments),
                        ..Default::default()
                    },
                )
                .await;
            }
        }
    }

    async fn apply_patch(&mut self, card_id: i64, patch: CardPatch) {
        match self.store.update_card(card_id, &patch).await {
            Ok(()) => self.refresh_board().await,
            Err(e) => self.flash(format!("Update failed: {e}")),
        }
    }

    async fn toggle_checklist_item(&mut self, card_id: i64) {
        let Some(card) = self.board.card(card_id) else {
            return;
        };
        if card.checklist.is_empty() {
            return;
        }
        let row = self.detail_row.min(card.checklist.len() - 1);
        let mut checklist = card.checklist.clone();
        checklist[row].completed = !checklist[row].completed;
        self.apply_patch(
            card_id,
            CardPatch {
                checklist: Some(checklist),
                ..Default::default()
            },
        )
        .await;
    }

    async fn cycle_priority(&mut self, card_id: i64) {
        let Some(priority) = self.board.card(card_id).map(|c| c.priority.cycle()) else {
            return;
        };
        self.apply_patch(
            card_id,
            CardPatch {
                priority: Some(priority),
                ..Default::default()
            },
        )
        .await;
    }

    async fn delete_card(&mut self, card_id: i64) {
        match self.store.delete_card(card_id).await {
            Ok(()) => {
                if self.view_mode == ViewMode::CardDetail(card_id) {
                    self.view_mode = ViewMode::Board;
                }
                self.refresh_board().await;
            }
            Err(e) => self.flash(format!("Failed to delete card: {e}")),
        }
    }

    async fn delete_selected_list(&mut self) {
        let Some(list_id) = self.board.lists.get(self.selected_list).map(|l| l.id) else {
            return;
        };
        match self.store.delete_list(list_id).await {
            Ok(()) => {
                self.flash("List deleted".into());
                self.refresh_board().await;
            }
            Err(e) => self.flash(format!("Failed to delete list: {e}")),
        }
    }

    async fn delete_selected_board(&mut self) {
        let Some(board_id) = self.boards.get(self.selected_board).map(|b| b.id) else {
            return;
        };
        match self.store.delete_board(board_id).await {
            Ok(()) => {
                if self.current_board == Some(board_id) {
                    self.current_board = None;
                    self.board.clear();
                }
                self.flash("Board deleted".into());
                self.refresh_boards().await;
            }
            Err(e) => self.flash(format!("Failed to delete board: {e}")),
        }
    }

    async fn select_board(&mut self) {
        let Some(board_id) = self.boards.get(self.selected_board).map(|b| b.id) else {
            return;
        };
        if let Err(e) = config::save_selected_board(board_id) {
            self.flash(format!("Failed to save selection: {e}"));
        }
        self.current_board = Some(board_id);
        self.board.clear();
        self.selected_list = 0;
        self.selected_card = 0;
        self.view_mode = ViewMode::Board;
        self.refresh_board().await;
    }

    /// Move the selected card to the neighbouring list, appended at the end.
    /// Same request path as a pointer drop on that list.
    async fn move_selected(&mut self, step: isize) {
        if self.drag.state() != DragState::Idle {
            return;
        }
        let Some(card_id) = self.selected_card_id() else {
            return;
        };
        let target_idx = self.selected_list as isize + step;
        if target_idx < 0 || target_idx as usize >= self.board.lists.len() {
            return;
        }
        let target_list_id = self.board.lists[target_idx as usize].id;
        let req = MoveRequest {
            card_id,
            target_list_id,
            position: self.board.append_position(target_list_id),
        };
        self.commit_move(req).await;
    }

    fn open_card(&mut self, card_id: i64) {
        self.select_card(card_id);
        self.detail_row = 0;
        self.view_mode = ViewMode::CardDetail(card_id);
    }

    fn select_card(&mut self, card_id: i64) {
        let Some(list_id) = self.board.card(card_id).map(|c| c.list_id) else {
            return;
        };
        let Some(list_idx) = self.board.lists.iter().position(|l| l.id == list_id) else {
            return;
        };
        if let Some(card_idx) = self
            .board
            .cards_in_list(list_id)
            .iter()
            .position(|c| c.id == card_id)
        {
            self.selected_list = list_idx;
            self.selected_card = card_idx;
        }
    }

    fn selected_list_card_count(&self) -> usize {
        self.board
            .lists
            .get(self.selected_list)
            .map_or(0, |l| self.board.cards_in_list(l.id).len())
    }

    pub fn selected_card_id(&self) -> Option<i64> {
        let list = self.board.lists.get(self.selected_list)?;
        self.board
            .cards_in_list(list.id)
            .get(self.selected_card)
            .map(|c| c.id)
    }

    pub fn current_board_title(&self) -> Option<&str> {
        let id = self.current_board?;
        self.boards
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.title.as_str())
    }

    fn clamp_selection(&mut self) {
        if self.board.lists.is_empty() {
            self.selected_list = 0;
            self.selected_card = 0;
            return;
        }
        if self.selected_list >= self.board.lists.len() {
            self.selected_list = self.board.lists.len() - 1;
        }
        let count = self.selected_list_card_count();
        if count == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= count {
            self.selected_card = count - 1;
        }
    }

    fn flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub async fn refresh_boards(&mut self) {
        self.loading = true;
        let tx = self.action_tx.clone();
        match self.store.fetch_boards().await {
            Ok(boards) => {
                let _ = tx.send(Action::BoardsLoaded(boards));
            }
            Err(e) => {
                let _ = tx.send(Action::FetchError(e.to_string()));
            }
        }
    }

    pub async fn refresh_board(&mut self) {
        let Some(board_id) = self.current_board else {
            return;
        };
        self.loading = true;
        let tx = self.action_tx.clone();
        match tokio::try_join!(self.store.fetch_lists(board_id), self.store.fetch_cards()) {
            Ok((lists, cards)) => {
                // The cards endpoint returns every card; keep this board's.
                let list_ids: HashSet<i64> = lists.iter().map(|l| l.id).collect();
                let cards = cards
                    .into_iter()
                    .filter(|c| list_ids.contains(&c.list_id))
                    .collect();
                let _ = tx.send(Action::BoardDataLoaded { lists, cards });
            }
            Err(e) => {
                let _ = tx.send(Action::FetchError(e.to_string()));
            }
        }
    }
}
