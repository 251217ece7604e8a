//! Persisted record types for kb.
//!
//! Records serialize with camelCase keys (`statusId`, `projectId`,
//! `createdAt`, `parentId`), the board's wire format. Deserialization is
//! lenient: missing fields fall back to defaults, because the store is not
//! schema-enforced.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};

/// Fresh identifier for statuses, tasks, and comments.
///
/// ULIDs are timestamp-ordered, so insertion order and id order agree for
/// sequential single-user calls, and collisions are effectively impossible.
pub fn fresh_id() -> String {
    Ulid::new().to_string()
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Require a non-empty value for a named field, trimmed
pub fn non_empty<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::EmptyField(field))
    } else {
        Ok(trimmed)
    }
}

/// A project: grouping entity owning columns and tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Member logins; grows via invitation acceptance, never shrinks
    #[serde(default)]
    pub members: Vec<String>,
}

/// A board column. Ordering among a project's statuses is insertion order;
/// there is no rank field and no column reordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: String,
    pub name: String,
    pub project_id: String,
}

/// A card on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Insertion-ordered, duplicate-free; normalized on every write
    #[serde(default)]
    pub tags: Vec<String>,
    pub status_id: String,
    pub project_id: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub completed: bool,
}

/// One stored comment. `parent_id` links replies into a per-task tree; a
/// dangling parent degrades to root placement when the tree is rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Fields supplied when creating a task
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub tags: Vec<String>,
}

/// Partial update merged shallowly into an existing task.
///
/// `None` leaves the stored field untouched; the nested options distinguish
/// "don't touch" from "clear". Comments are never patchable.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<Option<NaiveDate>>,
    pub assignee: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub status_id: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.assignee.is_none()
            && self.tags.is_none()
            && self.status_id.is_none()
            && self.completed.is_none()
    }

    /// Merge into `task`. Title and status changes are validated by the
    /// repository before this runs; tags are normalized here.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(deadline) = &self.deadline {
            task.deadline = *deadline;
        }
        if let Some(assignee) = &self.assignee {
            task.assignee = assignee.clone();
        }
        if let Some(tags) = &self.tags {
            task.tags = normalize_tags(tags);
        }
        if let Some(status_id) = &self.status_id {
            task.status_id = status_id.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Trim, drop empties, dedupe while preserving first-occurrence order
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.iter().any(|existing| existing == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: "t1".to_string(),
            title: "Write docs".to_string(),
            description: "intro page".to_string(),
            deadline: None,
            assignee: Some("Ann".to_string()),
            tags: vec!["docs".to_string()],
            status_id: "s1".to_string(),
            project_id: "p1".to_string(),
            comments: vec![Comment {
                id: "c1".to_string(),
                text: "started".to_string(),
                author: "Ann".to_string(),
                created_at: Utc::now(),
                parent_id: None,
            }],
            completed: false,
        }
    }

    #[test]
    fn normalize_tags_dedupes_in_order() {
        let tags = normalize_tags(&["backend", " frontend ", "backend", "", "infra"]);
        assert_eq!(tags, vec!["backend", "frontend", "infra"]);
    }

    #[test]
    fn patch_merges_shallowly() {
        let mut task = sample_task();
        let patch = TaskPatch {
            completed: Some(true),
            ..TaskPatch::default()
        };
        patch.apply(&mut task);

        assert!(task.completed);
        assert_eq!(task.tags, vec!["docs"]);
        assert_eq!(task.description, "intro page");
        assert_eq!(task.comments.len(), 1);
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let mut task = sample_task();
        let patch = TaskPatch {
            assignee: Some(None),
            deadline: Some(None),
            ..TaskPatch::default()
        };
        patch.apply(&mut task);

        assert!(task.assignee.is_none());
        assert!(task.deadline.is_none());
    }

    #[test]
    fn lenient_task_deserialization_fills_defaults() {
        let raw = r#"{"id":"t1","title":"Bare","statusId":"s1","projectId":"p1"}"#;
        let task: Task = serde_json::from_str(raw).expect("task");
        assert_eq!(task.description, "");
        assert!(task.tags.is_empty());
        assert!(task.comments.is_empty());
        assert!(!task.completed);
    }

    #[test]
    fn records_serialize_with_camel_case_keys() {
        let task = sample_task();
        let raw = serde_json::to_string(&task).expect("json");
        assert!(raw.contains("\"statusId\""));
        assert!(raw.contains("\"projectId\""));
        assert!(raw.contains("\"createdAt\""));
    }

    #[test]
    fn non_empty_rejects_whitespace() {
        assert!(non_empty("  ", "task title").is_err());
        assert_eq!(non_empty(" ok ", "task title").unwrap(), "ok");
    }
}
