use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub id: i64,
    pub board_id: i64,
    pub title: String,
    #[serde(default)]
    pub position: i32,
}
