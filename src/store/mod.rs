pub mod http;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::model::board::TaskBoard;
use crate::model::card::{CardComment, ChecklistItem, Priority, TaskCard};
use crate::model::list::TaskList;

/// A computed card move: reassign the card's list and position in one call.
/// Serializes as the move endpoint's body; the card id travels in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    #[serde(skip)]
    pub card_id: i64,
    pub target_list_id: i64,
    pub position: i32,
}

/// Partial card update. Only the fields that are `Some` go on the wire.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<ChecklistItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CardComment>>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("server returned {status} for {path}")]
    Status { status: u16, path: String },
}

/// The backend boundary. Everything the UI mutates goes through one of these
/// calls; after a successful mutation the caller refetches lists and cards
/// and re-renders from the server's order.
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn fetch_boards(&self) -> Result<Vec<TaskBoard>>;
    async fn create_board(&self, title: &str) -> Result<TaskBoard>;
    async fn rename_board(&self, board_id: i64, title: &str) -> Result<()>;
    async fn delete_board(&self, board_id: i64) -> Result<()>;

    async fn fetch_lists(&self, board_id: i64) -> Result<Vec<TaskList>>;
    async fn create_list(&self, board_id: i64, title: &str) -> Result<TaskList>;
    async fn rename_list(&self, list_id: i64, title: &str) -> Result<()>;
    async fn delete_list(&self, list_id: i64) -> Result<()>;

    async fn fetch_cards(&self) -> Result<Vec<TaskCard>>;
    async fn create_card(&self, list_id: i64, title: &str, position: i32) -> Result<TaskCard>;
    async fn update_card(&self, card_id: i64, patch: &CardPatch) -> Result<()>;
    async fn delete_card(&self, card_id: i64) -> Result<()>;

    /// Returns the card as the server now sees it. The caller still
    /// refetches, since sibling positions may have been renumbered.
    async fn move_card(&self, req: &MoveRequest) -> Result<TaskCard>;
}

#[cfg(test)]
pub mod tests;
