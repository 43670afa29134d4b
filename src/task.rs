//! Task data structure.
//!
//! A `Task` is the only record on the board. Its serialized form is the
//! element type of the stored snapshot, so field names follow the snapshot
//! layout (`tagColor`), not Rust naming.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::{Status, TagColor};

/// Tag given to tasks entered without one.
pub const DEFAULT_TAG: &str = "General";

/// Opaque task identifier. Assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        TaskId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: Status,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub tag_color: TagColor,
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

/// Resolve the tag a user typed into the one stored on the task.
pub fn tag_or_default(tag: Option<&str>) -> String {
    match tag {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => default_tag(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_snapshot_field_names() {
        let task = Task {
            id: TaskId::new("42"),
            title: "Title".into(),
            description: "Body".into(),
            status: Status::Todo,
            tag: "Ops".into(),
            tag_color: TagColor::Pink,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], "42");
        assert_eq!(value["tagColor"], "bg-pink-500");
        assert_eq!(value["status"], "todo");
    }

    #[test]
    fn missing_tag_fields_fall_back() {
        let json = r#"{"id":"7","title":"t","description":"d","status":"done"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.tag, DEFAULT_TAG);
        assert_eq!(task.tag_color, TagColor::Blue);
    }

    #[test]
    fn blank_tag_becomes_general() {
        assert_eq!(tag_or_default(None), "General");
        assert_eq!(tag_or_default(Some("   ")), "General");
        assert_eq!(tag_or_default(Some("Backend")), "Backend");
    }
}
