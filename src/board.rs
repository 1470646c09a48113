use crate::model::card::TaskCard;
use crate::model::list::TaskList;

/// Per-render snapshot of the active board's lists and cards.
///
/// The snapshot is replaced wholesale after every mutation; display order is
/// always re-derived from the server's `position` values, never mutated in
/// place.
#[derive(Debug, Default)]
pub struct BoardState {
    pub lists: Vec<TaskList>,
    pub cards: Vec<TaskCard>,
}

impl BoardState {
    pub fn replace(&mut self, mut lists: Vec<TaskList>, cards: Vec<TaskCard>) {
        lists.sort_by_key(|l| l.position);
        self.lists = lists;
        self.cards = cards;
    }

    pub fn clear(&mut self) {
        self.lists.clear();
        self.cards.clear();
    }

    pub fn list(&self, list_id: i64) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn card(&self, card_id: i64) -> Option<&TaskCard> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    /// Cards of one list in display order: ascending `position`, ties broken
    /// by snapshot order (stable sort).
    pub fn cards_in_list(&self, list_id: i64) -> Vec<&TaskCard> {
        let mut cards: Vec<&TaskCard> = self
            .cards
            .iter()
            .filter(|c| c.list_id == list_id)
            .collect();
        cards.sort_by_key(|c| c.position);
        cards
    }

    /// Position for a card appended at the end of a list. Both card creation
    /// and drop-on-list moves use this.
    pub fn append_position(&self, list_id: i64) -> i32 {
        self.cards.iter().filter(|c| c.list_id == list_id).count() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::Priority;

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

    #[test]
    fn cards_render_in_position_order() {
        let mut board = BoardState::default();
        board.replace(
            vec![list(1, 0)],
            vec![card(10, 1, 2), card(11, 1, 0), card(12, 1, 1)],
        );
        let ids: Vec<i64> = board.cards_in_list(1).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[test]
    fn position_ties_keep_snapshot_order() {
        let mut board = BoardState::default();
        board.replace(vec![list(1, 0)], vec![card(10, 1, 0), card(11, 1, 0)]);
        let ids: Vec<i64> = board.cards_in_list(1).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn append_position_counts_only_that_list() {
        let mut board = BoardState::default();
        board.replace(
            vec![list(1, 0), list(2, 1)],
            vec![card(10, 1, 0), card(11, 1, 1), card(12, 2, 0)],
        );
        assert_eq!(board.append_position(1), 2);
        assert_eq!(board.append_position(2), 1);
        assert_eq!(board.append_position(99), 0);
    }

    #[test]
    fn lists_sort_by_position_on_replace() {
        let mut board = BoardState::default();
        board.replace(vec![list(2, 1), list(1, 0)], vec![]);
        let ids: Vec<i64> = board.lists.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
