use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::{BoardStore, CardPatch, MoveRequest};
use crate::model::board::TaskBoard;
use crate::model::card::{Priority, TaskCard};
use crate::model::list::TaskList;

/// A mock store that serves fixed data and records every mutation.
#[derive(Default)]
pub struct MockStore {
    pub boards: Vec<TaskBoard>,
    pub lists: Vec<TaskList>,
    pub cards: Vec<TaskCard>,
    pub moves: Arc<Mutex<Vec<MoveRequest>>>,
    pub created_lists: Arc<Mutex<Vec<(i64, String)>>>,
    pub created_cards: Arc<Mutex<Vec<(i64, String, i32)>>>,
    pub patches: Arc<Mutex<Vec<(i64, CardPatch)>>>,
    pub deleted_cards: Arc<Mutex<Vec<i64>>>,
    pub deleted_lists: Arc<Mutex<Vec<i64>>>,
    pub fail_moves: bool,
}

impl MockStore {
    pub fn with_failing_moves(mut self) -> Self {
        self.fail_moves = true;
        self
    }
}

pub fn make_list(id: i64, board_id: i64, position: i32) -> TaskList {
    TaskList {
        id,
        board_id,
        title: format!("List {id}"),
        position,
    }
}

pub fn make_card(id: i64, list_id: i64, position: i32) -> TaskCard {
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

#[async_trait]
impl BoardStore for MockStore {
    async fn fetch_boards(&self) -> Result<Vec<TaskBoard>> {
        Ok(self.boards.clone())
    }

    async fn create_board(&self, title: &str) -> Result<TaskBoard> {
        Ok(TaskBoard {
            id: 900,
            title: title.to_string(),
            description: None,
            position: 0,
            is_starred: false,
        })
    }

    async fn rename_board(&self, _board_id: i64, _title: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_board(&self, _board_id: i64) -> Result<()> {
        Ok(())
    }

    async fn fetch_lists(&self, board_id: i64) -> Result<Vec<TaskList>> {
        Ok(self
            .lists
            .iter()
            .filter(|l| l.board_id == board_id)
            .cloned()
            .collect())
    }

    async fn create_list(&self, board_id: i64, title: &str) -> Result<TaskList> {
        self.created_lists
            .lock()
            .unwrap()
            .push((board_id, title.to_string()));
        Ok(make_list(800, board_id, self.lists.len() as i32))
    }

    async fn rename_list(&self, _list_id: i64, _title: &str) -> Result<()> {
        Ok(())
    }

    async fn delete_list(&self, list_id: i64) -> Result<()> {
        self.deleted_lists.lock().unwrap().push(list_id);
        Ok(())
    }

    async fn fetch_cards(&self) -> Result<Vec<TaskCard>> {
        Ok(self.cards.clone())
    }

    async fn create_card(&self, list_id: i64, title: &str, position: i32) -> Result<TaskCard> {
        self.created_cards
            .lock()
            .unwrap()
            .push((list_id, title.to_string(), position));
        let mut card = make_card(700, list_id, position);
        card.title = title.to_string();
        Ok(card)
    }

    async fn update_card(&self, card_id: i64, patch: &CardPatch) -> Result<()> {
        self.patches.lock().unwrap().push((card_id, patch.clone()));
        Ok(())
    }

    async fn delete_card(&self, card_id: i64) -> Result<()> {
        self.deleted_cards.lock().unwrap().push(card_id);
        Ok(())
    }

    async fn move_card(&self, req: &MoveRequest) -> Result<TaskCard> {
        if self.fail_moves {
            anyhow::bail!("Mock move failure");
        }
        self.moves.lock().unwrap().push(req.clone());
        let mut card = self
            .cards
            .iter()
            .find(|c| c.id == req.card_id)
            .cloned()
            .unwrap_or_else(|| make_card(req.card_id, req.target_list_id, req.position));
        card.list_id = req.target_list_id;
        card.position = req.position;
        Ok(card)
    }
}

#[tokio::test]
async fn move_card_records_the_request() {
    let store = MockStore {
        cards: vec![make_card(10, 1, 0)],
        ..Default::default()
    };
    let moves = store.moves.clone();

    let moved = store
        .move_card(&MoveRequest {
            card_id: 10,
            target_list_id: 2,
            position: 3,
        })
        .await
        .unwrap();

    assert_eq!(moved.list_id, 2);
    assert_eq!(moved.position, 3);
    assert_eq!(
        moves.lock().unwrap().as_slice(),
        &[MoveRequest {
            card_id: 10,
            target_list_id: 2,
            position: 3,
        }]
    );
}

#[tokio::test]
async fn move_card_propagates_errors() {
    let store = MockStore::default().with_failing_moves();
    let result = store
        .move_card(&MoveRequest {
            card_id: 10,
            target_list_id: 2,
            position: 0,
        })
        .await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Mock move failure"));
}

#[test]
fn move_request_body_omits_the_card_id() {
    let req = MoveRequest {
        card_id: 42,
        target_list_id: 7,
        position: 2,
    };
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "targetListId": 7, "position": 2 })
    );
}

#[test]
fn card_patch_serializes_only_set_fields() {
    let patch = CardPatch {
        title: Some("New title".into()),
        ..Default::default()
    };
    let body = serde_json::to_value(&patch).unwrap();
    assert_eq!(body, serde_json::json!({ "title": "New title" }));

    let patch = CardPatch {
        priority: Some(Priority::High),
        labels: Some(vec!["fleet".into()]),
        ..Default::default()
    };
    let body = serde_json::to_value(&patch).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "priority": "High", "labels": ["fleet"] })
    );
}
