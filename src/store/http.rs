use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::json;

use super::{BoardStore, CardPatch, MoveRequest, StoreError};
use crate::config::ApiConfig;
use crate::model::board::TaskBoard;
use crate::model::card::TaskCard;
use crate::model::list::TaskList;

/// REST client for the planner backend.
pub struct HttpStore {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<reqwest::Response> {
        let resp = builder
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        if !resp.status().is_success() {
            return Err(StoreError::Status {
                status: resp.status().as_u16(),
                path: path.to_string(),
            }
            .into());
        }
        Ok(resp)
    }
}

#[async_trait]
impl BoardStore for HttpStore {
    async fn fetch_boards(&self) -> Result<Vec<TaskBoard>> {
        let path = "/api/task-boards";
        let resp = self.send(self.request(reqwest::Method::GET, path), path).await?;
        resp.json().await.context("Failed to parse boards response")
    }

    async fn create_board(&self, title: &str) -> Result<TaskBoard> {
        let path = "/api/task-boards";
        let builder = self
            .request(reqwest::Method::POST, path)
            .json(&json!({ "title": title }));
        let resp = self.send(builder, path).await?;
        resp.json().await.context("Failed to parse created board")
    }

    async fn rename_board(&self, board_id: i64, title: &str) -> Result<()> {
        let path = format!("/api/task-boards/{board_id}");
        let builder = self
            .request(reqwest::Method::PUT, &path)
            .json(&json!({ "title": title }));
        self.send(builder, &path).await?;
        Ok(())
    }

    async fn delete_board(&self, board_id: i64) -> Result<()> {
        let path = format!("/api/task-boards/{board_id}");
        self.send(self.request(reqwest::Method::DELETE, &path), &path)
            .await?;
        Ok(())
    }

    async fn fetch_lists(&self, board_id: i64) -> Result<Vec<TaskList>> {
        let path = format!("/api/task-boards/{board_id}/lists");
        let resp = self
            .send(self.request(reqwest::Method::GET, &path), &path)
            .await?;
        resp.json().await.context("Failed to parse lists response")
    }

    async fn create_list(&self, board_id: i64, title: &str) -> Result<TaskList> {
        let path = "/api/task-lists";
        let builder = self
            .request(reqwest::Method::POST, path)
            .json(&json!({ "boardId": board_id, "title": title }));
        let resp = self.send(builder, path).await?;
        resp.json().await.context("Failed to parse created list")
    }

    async fn rename_list(&self, list_id: i64, title: &str) -> Result<()> {
        let path = format!("/api/task-lists/{list_id}");
        let builder = self
            .request(reqwest::Method::PUT, &path)
            .json(&json!({ "title": title }));
        self.send(builder, &path).await?;
        Ok(())
    }

    async fn delete_list(&self, list_id: i64) -> Result<()> {
        let path = format!("/api/task-lists/{list_id}");
        self.send(self.request(reqwest::Method::DELETE, &path), &path)
            .await?;
        Ok(())
    }

    async fn fetch_cards(&self) -> Result<Vec<TaskCard>> {
        let path = "/api/task-cards";
        let resp = self.send(self.request(reqwest::Method::GET, path), path).await?;
        resp.json().await.context("Failed to parse cards response")
    }

    async fn create_card(&self, list_id: i64, title: &str, position: i32) -> Result<TaskCard> {
        let path = "/api/task-cards";
        let builder = self.request(reqwest::Method::POST, path).json(&json!({
            "listId": list_id,
            "title": title,
            "position": position,
        }));
        let resp = self.send(builder, path).await?;
        resp.json().await.context("Failed to parse created card")
    }

    async fn update_card(&self, card_id: i64, patch: &CardPatch) -> Result<()> {
        let path = format!("/api/task-cards/{card_id}");
        let builder = self.request(reqwest::Method::PUT, &path).json(patch);
        self.send(builder, &path).await?;
        Ok(())
    }

    async fn delete_card(&self, card_id: i64) -> Result<()> {
        let path = format!("/api/task-cards/{card_id}");
        self.send(self.request(reqwest::Method::DELETE, &path), &path)
            .await?;
        Ok(())
    }

    async fn move_card(&self, req: &MoveRequest) -> Result<TaskCard> {
        let path = format!("/api/task-cards/{}/move", req.card_id);
        let builder = self.request(reqwest::Method::POST, &path).json(req);
        let resp = self.send(builder, &path).await?;
        resp.json().await.context("Failed to parse moved card")
    }
}
