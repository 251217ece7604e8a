//! Board view helpers: task filtering and the per-project tag vocabulary.
//!
//! These are pure functions over slices so the CLI and the repositories can
//! share them, and so filter semantics are testable without storage.

use crate::model::Task;

/// Completion facet of the task filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    /// No completion constraint
    #[default]
    All,
    /// Only tasks not yet completed
    ActiveOnly,
    /// Only completed tasks
    CompletedOnly,
}

impl Completion {
    fn admits(self, task: &Task) -> bool {
        match self {
            Completion::All => true,
            Completion::ActiveOnly => !task.completed,
            Completion::CompletedOnly => task.completed,
        }
    }
}

/// Active filters for a board view.
///
/// Facets combine conjunctively: a task is visible only when every active
/// facet admits it. Matches are exact. An empty filter set shows everything
/// in stored order.
#[derive(Debug, Clone, Default)]
pub struct TaskFilters {
    pub completion: Completion,
    pub assignee: Option<String>,
    pub tag: Option<String>,
}

impl TaskFilters {
    pub fn is_empty(&self) -> bool {
        self.completion == Completion::All && self.assignee.is_none() && self.tag.is_none()
    }

    pub fn admits(&self, task: &Task) -> bool {
        if !self.completion.admits(task) {
            return false;
        }
        if let Some(assignee) = &self.assignee {
            if task.assignee.as_deref() != Some(assignee.as_str()) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !task.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }
}

/// Tasks admitted by `filters`, preserving stored order
pub fn visible_tasks<'a>(tasks: &'a [Task], filters: &TaskFilters) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filters.admits(task)).collect()
}

/// Grow a project's tag vocabulary with the tags of one task.
///
/// The vocabulary is monotone: known tags keep their position, unseen tags
/// append in the task's order, and nothing is ever removed. Deleting the last
/// task carrying a tag does not retire the tag.
pub fn merge_vocabulary(vocabulary: &[String], task_tags: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = vocabulary.to_vec();
    for tag in task_tags {
        if !merged.iter().any(|known| known == tag) {
            merged.push(tag.clone());
        }
    }
    merged
}
