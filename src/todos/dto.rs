use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::todos::repo::{Todo, TodoStatus};

/// Todo item as exposed on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub done_at: Option<OffsetDateTime>,
}

impl From<Todo> for TodoItem {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            status: todo.status,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
            done_at: todo.done_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub data: TodoItem,
}

#[derive(Debug, Serialize)]
pub struct TodoList {
    pub data: Vec<TodoItem>,
}

#[derive(Debug, Deserialize)]
pub struct TodoCreateInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TodoStatus,
}

/// Partial update with "exclude unset" semantics: for the nullable
/// `description`, an omitted field preserves the value while an explicit
/// null clears it.
#[derive(Debug, Default, Deserialize)]
pub struct TodoUpdateInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<TodoStatus>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query parameters of the list endpoint; fields compose with AND.
#[derive(Debug, Default, Deserialize)]
pub struct TodoFilter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TodoStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(TodoStatus::Draft).unwrap(),
            serde_json::json!("draft")
        );
        let status: TodoStatus = serde_json::from_str(r#""done""#).unwrap();
        assert_eq!(status, TodoStatus::Done);
    }

    #[test]
    fn create_input_defaults_status_to_todo() {
        let input: TodoCreateInput = serde_json::from_str(r#"{"title": "wash up"}"#).unwrap();
        assert_eq!(input.status, TodoStatus::Todo);
        assert!(input.description.is_none());
    }

    #[test]
    fn update_input_distinguishes_null_from_absent() {
        let input: TodoUpdateInput = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.description.is_none());

        let input: TodoUpdateInput = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(input.description, Some(None));

        let input: TodoUpdateInput = serde_json::from_str(r#"{"description": "milk"}"#).unwrap();
        assert_eq!(input.description, Some(Some("milk".into())));
    }

    #[test]
    fn todo_item_serializes_camel_case_rfc3339() {
        let item = TodoItem {
            id: Uuid::new_v4(),
            title: "wash up".into(),
            description: None,
            status: TodoStatus::Done,
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00:00 UTC),
            done_at: Some(datetime!(2024-01-03 08:00:00 UTC)),
        };
        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["status"], "done");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["doneAt"], "2024-01-03T08:00:00Z");
        assert_eq!(json["description"], serde_json::Value::Null);
    }
}
