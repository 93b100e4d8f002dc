//! Data models for todo
//!
//! Defines the `Todo` record and the request bodies of the REST protocol.
//! These types are shared by the store, the HTTP service and the sync client,
//! so the JSON shape is defined exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task
///
/// `id` and `text` never change after creation; only `completed` is mutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    /// Unique identifier assigned by the store
    #[serde(alias = "_id")]
    pub id: String,
    /// Task description, never empty
    pub text: String,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// When the store created this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the store last changed this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Create a record with the given id and text, not completed
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether two records carry the same user-visible state
    ///
    /// Timestamps are ignored.
    pub fn same_content(&self, other: &Todo) -> bool {
        self.id == other.id && self.text == other.text && self.completed == other.completed
    }
}

/// Body of `POST /todos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub text: String,
}

/// Body of `PATCH /todos/{id}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub completed: bool,
}

/// Error body returned by the service for any non-success status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Normalize user input for creation
///
/// Returns the trimmed text, or `None` when nothing is left.
pub fn normalize_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_defaults() {
        let todo = Todo::new("abc", "buy milk");
        assert_eq!(todo.id, "abc");
        assert_eq!(todo.text, "buy milk");
        assert!(!todo.completed);
        assert!(todo.created_at.is_none());
    }

    #[test]
    fn test_serialize_minimal_shape() {
        let todo = Todo::new("1", "walk dog");
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1", "text": "walk dog", "completed": false})
        );
    }

    #[test]
    fn test_deserialize_accepts_underscore_id() {
        let todo: Todo =
            serde_json::from_str(r#"{"_id": "65f0", "text": "x", "completed": true}"#).unwrap();
        assert_eq!(todo.id, "65f0");
        assert!(todo.completed);
    }

    #[test]
    fn test_deserialize_tolerates_missing_completed() {
        let todo: Todo = serde_json::from_str(r#"{"id": "1", "text": "x"}"#).unwrap();
        assert!(!todo.completed);
    }

    #[test]
    fn test_same_content_ignores_timestamps() {
        let a = Todo::new("1", "x");
        let mut b = a.clone();
        b.updated_at = Some(Utc::now());
        assert!(a.same_content(&b));

        b.completed = true;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  buy milk \n"), Some("buy milk"));
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text("   \t"), None);
    }
}
