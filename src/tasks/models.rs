//! Task model types shared by the store, gateway, and forms.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Backend-assigned task identifier.
pub type TaskId = u64;

/// Backend-assigned category identifier.
pub type CategoryId = u64;

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses, in workflow order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Get the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }

    /// The status a card toggle moves to: TODO, IN_PROGRESS, DONE, then back to TODO.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Todo => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Todo,
        }
    }

    /// Display class name, e.g. `status-in-progress`.
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("status-{}", self.as_str().to_lowercase().replace('_', "-"))
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            _ => Err(InvalidStatus(s.to_string())),
        }
    }
}

/// Error when an invalid status string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl std::fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid status: '{}' (must be one of: TODO, IN_PROGRESS, DONE)", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal work (default).
    #[default]
    Medium,
    /// Should be done soon.
    High,
}

impl TaskPriority {
    /// Get the wire representation of the priority.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Display class name, e.g. `priority-high`.
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("priority-{}", self.as_str().to_lowercase())
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(InvalidPriority(s.to_string())),
        }
    }
}

/// Error when an invalid priority string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPriority(pub String);

impl std::fmt::Display for InvalidPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid priority: '{}' (must be one of: LOW, MEDIUM, HIGH)", self.0)
    }
}

impl std::error::Error for InvalidPriority {}

/// A task as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier assigned by the backend.
    pub id: TaskId,
    /// Short title.
    pub title: String,
    /// Free-text description, possibly empty.
    #[serde(default)]
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Priority level.
    pub priority: TaskPriority,
    /// Category the task belongs to. Not checked for existence client-side.
    pub category_id: CategoryId,
    /// Calendar date the task is due.
    pub due_date: NaiveDate,
    /// When the task was created. Stamped by the gateway.
    pub created_at: DateTime<Utc>,
    /// When the task was last updated. Stamped by the gateway.
    pub updated_at: DateTime<Utc>,
}

/// A new task, before the backend assigns an id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Priority level.
    pub priority: TaskPriority,
    /// Category the task belongs to.
    pub category_id: CategoryId,
    /// Calendar date the task is due.
    pub due_date: NaiveDate,
}

/// A partial change to a task. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    /// A patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }
}

/// A named, colored grouping tag. Read-only for this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Display color hint, e.g. `#ff8800`.
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_task_json() -> serde_json::Value {
        json!({
            "id": 1,
            "title": "Task 1",
            "description": "Desc 1",
            "status": "IN_PROGRESS",
            "priority": "HIGH",
            "categoryId": 2,
            "dueDate": "2026-03-01",
            "createdAt": "2026-02-01T00:00:00Z",
            "updatedAt": "2026-02-01T00:00:00.000Z"
        })
    }

    #[test]
    fn test_task_deserializes_wire_format() {
        let task: Task = serde_json::from_value(sample_task_json()).unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.category_id, 2);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task: Task = serde_json::from_value(sample_task_json()).unwrap();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["categoryId"], 2);
        assert_eq!(value["dueDate"], "2026-03-01");
        assert_eq!(value["status"], "IN_PROGRESS");
        assert!(value.get("category_id").is_none());
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let mut value = sample_task_json();
        value.as_object_mut().unwrap().remove("description");
        let task: Task = serde_json::from_value(value).unwrap();
        assert!(task.description.is_empty());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("TODO".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("Done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("blocked".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_all_statuses_in_workflow_order() {
        assert_eq!(TaskStatus::ALL, [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done]);
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_next_cycles() {
        assert_eq!(TaskStatus::Todo.next(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::InProgress.next(), TaskStatus::Done);
        assert_eq!(TaskStatus::Done.next(), TaskStatus::Todo);
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(TaskStatus::InProgress.css_class(), "status-in-progress");
        assert_eq!(TaskStatus::Todo.css_class(), "status-todo");
        assert_eq!(TaskPriority::High.css_class(), "priority-high");
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("low".parse::<TaskPriority>().unwrap(), TaskPriority::Low);
        assert_eq!("MEDIUM".parse::<TaskPriority>().unwrap(), TaskPriority::Medium);
        let err = "urgent".parse::<TaskPriority>().unwrap_err();
        assert!(err.to_string().contains("urgent"));
    }

    #[test]
    fn test_invalid_status_display() {
        let err = InvalidStatus("nope".to_string());
        assert!(err.to_string().contains("'nope'"));
    }

    #[test]
    fn test_patch_skips_unset_fields() {
        let patch = TaskPatch::status(TaskStatus::Done);
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "status": "DONE" }));
        assert_eq!(serde_json::to_value(TaskPatch::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_category_round_trip_fields() {
        let category: Category =
            serde_json::from_value(json!({ "id": 3, "name": "Work", "color": "#3366ff" }))
                .unwrap();
        assert_eq!(category.name, "Work");
        assert_eq!(category.color, "#3366ff");
    }
}
