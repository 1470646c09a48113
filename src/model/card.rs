use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardComment {
    pub id: i64,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCard {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
    // The server stores priority/labels/checklist/comments as nullable
    // columns; null and absent both mean "empty".
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<CardComment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<String>,
}

impl TaskCard {
    pub fn checklist_done(&self) -> usize {
        self.checklist.iter().filter(|i| i.completed).count()
    }

    pub fn is_overdue(&self) -> bool {
        self.due_date.is_some_and(|d| d < Utc::now())
    }

    pub fn is_due_soon(&self) -> bool {
        self.due_date
            .is_some_and(|d| d < Utc::now() + Duration::hours(24))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "listId": 2,
            "title": "Renew insurance",
            "position": 1,
            "priority": "High",
            "labels": ["fleet"],
            "checklist": [{"id": 1, "text": "Get quote", "completed": true}],
            "comments": []
        }"#;
        let card: TaskCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.list_id, 2);
        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.checklist_done(), 1);
    }

    #[test]
    fn card_tolerates_null_collections() {
        let json = r#"{
            "id": 7,
            "listId": 2,
            "title": "Renew insurance",
            "priority": null,
            "labels": null,
            "checklist": null,
            "comments": null,
            "attachments": null
        }"#;
        let card: TaskCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.priority, Priority::Medium);
        assert!(card.labels.is_empty());
        assert!(card.checklist.is_empty());
    }

    #[test]
    fn priority_cycles_low_medium_high() {
        assert_eq!(Priority::Low.cycle(), Priority::Medium);
        assert_eq!(Priority::Medium.cycle(), Priority::High);
        assert_eq!(Priority::High.cycle(), Priority::Low);
    }
}
