use ratatui::layout::{Position, Rect};

use crate::board::BoardState;
use crate::store::MoveRequest;

/// Pointer travel, in cells, before a press becomes a drag instead of a
/// click. One cell is the smallest motion the terminal reports.
pub const ACTIVATION_DISTANCE: u16 = 1;

/// What the pointer was released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    List(i64),
    Card(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on a card, travel still under the activation distance.
    Pending { card_id: i64, origin: (u16, u16) },
    Dragging { card_id: i64, at: (u16, u16) },
    /// A move request is in flight; no new session may start.
    Committing { card_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    None,
    /// Released without ever activating: a plain click on the card.
    Click(i64),
    Move(MoveRequest),
}

/// The drag session controller: Idle -> Pending -> Dragging -> Committing.
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn press(&mut self, card_id: i64, at: (u16, u16)) {
        if matches!(self.state, DragState::Idle) {
            self.state = DragState::Pending {
                card_id,
                origin: at,
            };
        }
    }

    pub fn motion(&mut self, at: (u16, u16)) {
        match self.state {
            DragState::Pending { card_id, origin } if travel(origin, at) >= ACTIVATION_DISTANCE => {
                self.state = DragState::Dragging { card_id, at };
            }
            DragState::Dragging { card_id, .. } => {
                self.state = DragState::Dragging { card_id, at };
            }
            _ => {}
        }
    }

    /// The card rendered as the drag overlay, if a drag is active.
    pub fn dragging_card(&self) -> Option<i64> {
        match self.state {
            DragState::Dragging { card_id, .. } => Some(card_id),
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<(u16, u16)> {
        match self.state {
            DragState::Dragging { at, .. } => Some(at),
            _ => None,
        }
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.state, DragState::Committing { .. })
    }

    /// Ends the session. Position math uses the board snapshot as it stands
    /// at the moment of the drop, not a server-confirmed one.
    pub fn release(&mut self, target: Option<DropTarget>, board: &BoardState) -> DropOutcome {
        let outcome = match self.state {
            DragState::Idle | DragState::Committing { .. } => DropOutcome::None,
            DragState::Pending { card_id, .. } => DropOutcome::Click(card_id),
            DragState::Dragging { card_id, .. } => match compute_move(card_id, target, board) {
                Some(req) => DropOutcome::Move(req),
                None => DropOutcome::None,
            },
        };
        self.state = match &outcome {
            DropOutcome::Move(req) => DragState::Committing {
                card_id: req.card_id,
            },
            _ => DragState::Idle,
        };
        outcome
    }

    /// The in-flight move resolved (either way); the session may start over.
    pub fn finish(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn cancel(&mut self) {
        if !self.is_committing() {
            self.state = DragState::Idle;
        }
    }
}

fn travel(from: (u16, u16), to: (u16, u16)) -> u16 {
    from.0.abs_diff(to.0).max(from.1.abs_diff(to.1))
}

fn compute_move(
    card_id: i64,
    target: Option<DropTarget>,
    board: &BoardState,
) -> Option<MoveRequest> {
    let card = board.card(card_id)?;
    match target? {
        // Drop on a list: append to the end of that list. Dropping on the
        // list the card already lives in is a no-op.
        DropTarget::List(list_id) => {
            if card.list_id == list_id {
                return None;
            }
            Some(MoveRequest {
                card_id,
                target_list_id: list_id,
                position: board.append_position(list_id),
            })
        }
        // Drop on a card: take that card's slot in its list's display
        // order. Dropping a card on itself is a no-op; a different card in
        // the same list is a reorder.
        DropTarget::Card(target_id) => {
            if target_id == card_id {
                return None;
            }
            let target = board.card(target_id)?;
            let position = board
                .cards_in_list(target.list_id)
                .iter()
                .position(|c| c.id == target_id)? as i32;
            Some(MoveRequest {
                card_id,
                target_list_id: target.list_id,
                position,
            })
        }
    }
}

/// Screen regions recorded during render, queried on pointer events. Card
/// regions are pushed after the list that contains them, so the innermost
/// match wins.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, DropTarget)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: DropTarget) {
        self.regions.push((area, target));
    }

    pub fn target_at(&self, at: (u16, u16)) -> Option<DropTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(Position::new(at.0, at.1)))
            .map(|(_, target)| *target)
    }

    pub fn card_at(&self, at: (u16, u16)) -> Option<i64> {
        match self.target_at(at) {
            Some(DropTarget::Card(id)) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::{Priority, TaskCard};
    use crate::model::list::TaskList;

    fn list(id: i64, position: i32) -> TaskList {
        TaskList {
            id,
            board_id: 1,
            title: format!("List {id}"),
            position,
        }
    }

    fn card(id: i64, list_id: i64, position: i32) -> TaskCard {
        TaskCard {
            id,
            list_id,
            title: format!("Card {id}"),
            description: None,
            position,
            priority: Priority::Medium,
            due_date: None,
            labels: vec![],
            checklist: vec![],
            comments: vec![],
            attachments: vec![],
        }
    }

    /// To Do (1): X=10, Y=11. Done (2): Z=12.
    fn sample_board() -> BoardState {
        let mut board = BoardState::default();
        board.replace(
            vec![list(1, 0), list(2, 1)],
            vec![card(10, 1, 0), card(11, 1, 1), card(12, 2, 0)],
        );
        board
    }

    fn start_drag(session: &mut DragSession, card_id: i64) {
        session.press(card_id, (0, 0));
        session.motion((0, ACTIVATION_DISTANCE));
        assert_eq!(session.dragging_card(), Some(card_id));
    }

    #[test]
    fn press_and_release_in_place_is_a_click() {
        let board = sample_board();
        let mut session = DragSession::default();
        session.press(10, (4, 4));
        let outcome = session.release(Some(DropTarget::Card(10)), &board);
        assert_eq!(outcome, DropOutcome::Click(10));
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn motion_under_threshold_stays_pending() {
        let mut session = DragSession::default();
        session.press(10, (4, 4));
        session.motion((4, 4));
        assert_eq!(session.dragging_card(), None);
    }

    #[test]
    fn drop_on_other_list_appends_to_end() {
        let board = sample_board();
        let mut session = DragSession::default();
        start_drag(&mut session, 10);
        let outcome = session.release(Some(DropTarget::List(2)), &board);
        assert_eq!(
            outcome,
            DropOutcome::Move(MoveRequest {
                card_id: 10,
                target_list_id: 2,
                position: 1,
            })
        );
        assert!(session.is_committing());
    }

    #[test]
    fn drop_on_own_list_is_noop() {
        let board = sample_board();
        let mut session = DragSession::default();
        start_drag(&mut session, 10);
        let outcome = session.release(Some(DropTarget::List(1)), &board);
        assert_eq!(outcome, DropOutcome::None);
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn drop_on_card_takes_its_slot() {
        let board = sample_board();
        let mut session = DragSession::default();
        start_drag(&mut session, 11);
        let outcome = session.release(Some(DropTarget::Card(12)), &board);
        assert_eq!(
            outcome,
            DropOutcome::Move(MoveRequest {
                card_id: 11,
                target_list_id: 2,
                position: 0,
            })
        );
    }

    #[test]
    fn drop_on_card_in_same_list_reorders() {
        let board = sample_board();
        let mut session = DragSession::default();
        start_drag(&mut session, 11);
        let outcome = session.release(Some(DropTarget::Card(10)), &board);
        assert_eq!(
            outcome,
            DropOutcome::Move(MoveRequest {
                card_id: 11,
                target_list_id: 1,
                position: 0,
            })
        );
    }

    #[test]
    fn drop_on_self_is_noop() {
        let board = sample_board();
        let mut session = DragSession::default();
        start_drag(&mut session, 10);
        let outcome = session.release(Some(DropTarget::Card(10)), &board);
        assert_eq!(outcome, DropOutcome::None);
    }

    #[test]
    fn drop_over_nothing_clears_the_session() {
        let board = sample_board();
        let mut session = DragSession::default();
        start_drag(&mut session, 10);
        let outcome = session.release(None, &board);
        assert_eq!(outcome, DropOutcome::None);
        assert_eq!(session.dragging_card(), None);
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn no_new_session_while_committing() {
        let board = sample_board();
        let mut session = DragSession::default();
        start_drag(&mut session, 10);
        session.release(Some(DropTarget::List(2)), &board);
        assert!(session.is_committing());

        session.press(11, (0, 0));
        session.motion((5, 5));
        assert_eq!(session.dragging_card(), None);

        session.finish();
        session.press(11, (0, 0));
        assert!(matches!(session.state(), DragState::Pending { .. }));
    }

    #[test]
    fn second_drag_uses_the_pre_drop_snapshot() {
        // X -> Done while Done has one card, then Y -> Z before any refetch:
        // the second request must be computed from the same snapshot.
        let board = sample_board();
        let mut session = DragSession::default();

        start_drag(&mut session, 10);
        let first = session.release(Some(DropTarget::List(2)), &board);
        assert_eq!(
            first,
            DropOutcome::Move(MoveRequest {
                card_id: 10,
                target_list_id: 2,
                position: 1,
            })
        );
        session.finish();

        start_drag(&mut session, 11);
        let second = session.release(Some(DropTarget::Card(12)), &board);
        assert_eq!(
            second,
            DropOutcome::Move(MoveRequest {
                card_id: 11,
                target_list_id: 2,
                position: 0,
            })
        );
    }

    #[test]
    fn hit_map_prefers_inner_card_regions() {
        let mut map = HitMap::default();
        map.push(Rect::new(0, 0, 20, 20), DropTarget::List(1));
        map.push(Rect::new(1, 1, 18, 4), DropTarget::Card(10));

        assert_eq!(map.target_at((5, 2)), Some(DropTarget::Card(10)));
        assert_eq!(map.card_at((5, 2)), Some(10));
        assert_eq!(map.target_at((5, 10)), Some(DropTarget::List(1)));
        assert_eq!(map.card_at((5, 10)), None);
        assert_eq!(map.target_at((30, 30)), None);
    }
}
