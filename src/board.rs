//! Task and status repository.
//!
//! `BoardStore` is the single mutation path for columns and cards. It holds
//! no state of its own: every operation re-reads the relevant collection from
//! storage, applies the change, and writes the whole collection back
//! (last-writer-wins on the fetched snapshot). Outcomes surface through the
//! injected [`Notifier`].
//!
//! Two degradation policies coexist deliberately. Deleting a column that
//! still has cards is an explicit rejection with an error notification, while
//! moving a card onto an unknown or unchanged column is a silent no-op. The
//! first protects data the user can see; the second absorbs stale drop
//! targets from an interactive gesture.

use crate::error::{Error, Result};
use crate::model::{self, Comment, Status, Task, TaskDraft, TaskPatch};
use crate::notify::{Notification, Notifier};
use crate::storage::{keys, Storage};
use crate::view;

pub struct BoardStore<'a> {
    storage: &'a dyn Storage,
    notifier: &'a dyn Notifier,
}

impl<'a> BoardStore<'a> {
    pub fn new(storage: &'a dyn Storage, notifier: &'a dyn Notifier) -> Self {
        Self { storage, notifier }
    }

    // --- reads ---

    /// Statuses of one project, stored order
    pub fn list_statuses(&self, project_id: &str) -> Vec<Status> {
        self.all_statuses()
            .into_iter()
            .filter(|status| status.project_id == project_id)
            .collect()
    }

    /// Tasks of one project, stored order
    pub fn list_tasks(&self, project_id: &str) -> Vec<Task> {
        self.all_tasks()
            .into_iter()
            .filter(|task| task.project_id == project_id)
            .collect()
    }

    pub fn find_task(&self, task_id: &str) -> Option<Task> {
        self.all_tasks().into_iter().find(|task| task.id == task_id)
    }

    pub fn find_status(&self, status_id: &str) -> Option<Status> {
        self.all_statuses()
            .into_iter()
            .find(|status| status.id == status_id)
    }

    /// Persisted tag cache unioned with tags currently on the project's
    /// tasks, cache order first. The cache never shrinks.
    pub fn tag_vocabulary(&self, project_id: &str) -> Vec<String> {
        let mut vocabulary: Vec<String> =
            self.storage.read_array(&keys::project_tags(project_id));
        for task in self.list_tasks(project_id) {
            vocabulary = view::merge_vocabulary(&vocabulary, &task.tags);
        }
        vocabulary
    }

    // --- status mutations ---

    pub fn create_status(&self, project_id: &str, name: &str) -> Result<Status> {
        let name = model::non_empty(name, "status name")?;
        let status = Status {
            id: model::fresh_id(),
            name: name.to_string(),
            project_id: project_id.to_string(),
        };

        let mut statuses = self.all_statuses();
        statuses.push(status.clone());
        self.write_statuses(&statuses)?;

        self.notifier.notify(Notification::success(
            "Status created",
            format!("'{}'", status.name),
        ));
        Ok(status)
    }

    /// Rename in place. Empty names are a no-op, not an error: the board UI
    /// treats an emptied rename field as an abandoned edit.
    pub fn rename_status(&self, status_id: &str, new_name: &str) -> Result<bool> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(false);
        }

        let mut statuses = self.all_statuses();
        let status = statuses
            .iter_mut()
            .find(|status| status.id == status_id)
            .ok_or_else(|| Error::StatusNotFound(status_id.to_string()))?;
        status.name = new_name.to_string();
        let renamed = status.name.clone();
        self.write_statuses(&statuses)?;

        self.notifier.notify(Notification::success(
            "Status renamed",
            format!("'{renamed}'"),
        ));
        Ok(true)
    }

    /// Remove a column. Rejected while any task still references it; the
    /// rejection is both an error and a user-visible notification.
    pub fn delete_status(&self, status_id: &str) -> Result<()> {
        let mut statuses = self.all_statuses();
        let position = statuses
            .iter()
            .position(|status| status.id == status_id)
            .ok_or_else(|| Error::StatusNotFound(status_id.to_string()))?;

        let in_use = self
            .all_tasks()
            .iter()
            .filter(|task| task.status_id == status_id)
            .count();
        if in_use > 0 {
            let name = statuses[position].name.clone();
            self.notifier.notify(Notification::error(
                "Cannot delete status",
                format!("'{name}' still has {in_use} task(s)"),
            ));
            return Err(Error::StatusInUse {
                id: status_id.to_string(),
                name,
                tasks: in_use,
            });
        }

        let removed = statuses.remove(position);
        self.write_statuses(&statuses)?;

        self.notifier.notify(Notification::success(
            "Status deleted",
            format!("'{}'", removed.name),
        ));
        Ok(())
    }

    // --- task mutations ---

    pub fn create_task(
        &self,
        project_id: &str,
        status_id: &str,
        draft: TaskDraft,
    ) -> Result<Task> {
        let title = model::non_empty(&draft.title, "task title")?;
        if self
            .list_statuses(project_id)
            .iter()
            .all(|status| status.id != status_id)
        {
            return Err(Error::StatusNotFound(status_id.to_string()));
        }

        let task = Task {
            id: model::fresh_id(),
            title: title.to_string(),
            description: draft.description,
            deadline: draft.deadline,
            assignee: draft.assignee,
            tags: model::normalize_tags(&draft.tags),
            status_id: status_id.to_string(),
            project_id: project_id.to_string(),
            comments: Vec::new(),
            completed: false,
        };

        let mut tasks = self.all_tasks();
        tasks.push(task.clone());
        self.write_tasks(&tasks)?;
        self.bump_vocabulary(project_id, &task.tags)?;

        self.notifier.notify(Notification::success(
            "Task created",
            format!("'{}'", task.title),
        ));
        Ok(task)
    }

    /// Shallow-merge `patch` into the stored task. Fields the patch does not
    /// carry stay untouched; comments are never patchable.
    pub fn update_task(&self, task_id: &str, patch: &TaskPatch) -> Result<Task> {
        if let Some(title) = &patch.title {
            model::non_empty(title, "task title")?;
        }

        let mut tasks = self.all_tasks();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;

        if let Some(status_id) = &patch.status_id {
            let project_id = task.project_id.clone();
            if self
                .list_statuses(&project_id)
                .iter()
                .all(|status| &status.id != status_id)
            {
                return Err(Error::StatusNotFound(status_id.clone()));
            }
        }

        patch.apply(task);
        let updated = task.clone();
        self.write_tasks(&tasks)?;
        if patch.tags.is_some() {
            self.bump_vocabulary(&updated.project_id, &updated.tags)?;
        }

        self.notifier.notify(Notification::success(
            "Task updated",
            format!("'{}'", updated.title),
        ));
        Ok(updated)
    }

    pub fn delete_task(&self, task_id: &str) -> Result<()> {
        let mut tasks = self.all_tasks();
        let position = tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        let removed = tasks.remove(position);
        self.write_tasks(&tasks)?;

        self.notifier.notify(Notification::success(
            "Task deleted",
            format!("'{}'", removed.title),
        ));
        Ok(())
    }

    /// Move a card to another column.
    ///
    /// Returns `Ok(false)` without touching storage or notifying when the
    /// target status does not exist or already holds the task; drop gestures
    /// over stale or unchanged targets must be absorbed silently. Returns
    /// `Ok(true)` and notifies on an actual move.
    pub fn move_task(&self, task_id: &str, target_status_id: &str) -> Result<bool> {
        let mut tasks = self.all_tasks();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;

        if task.status_id == target_status_id {
            return Ok(false);
        }
        let project_id = task.project_id.clone();
        let target = match self
            .list_statuses(&project_id)
            .into_iter()
            .find(|status| status.id == target_status_id)
        {
            Some(status) => status,
            None => return Ok(false),
        };

        task.status_id = target.id.clone();
        let title = task.title.clone();
        self.write_tasks(&tasks)?;

        self.notifier.notify(Notification::success(
            "Task moved",
            format!("'{}' -> '{}'", title, target.name),
        ));
        Ok(true)
    }

    /// Append a comment to a task's thread.
    ///
    /// Empty text or an unresolvable task is a silent no-op returning `None`;
    /// a draft that fails to land must never escalate into an error.
    pub fn add_comment(
        &self,
        task_id: &str,
        text: &str,
        author: &str,
        parent_id: Option<&str>,
    ) -> Result<Option<Comment>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let mut tasks = self.all_tasks();
        let Some(task) = tasks.iter_mut().find(|task| task.id == task_id) else {
            return Ok(None);
        };

        let comment = Comment {
            id: model::fresh_id(),
            text: text.to_string(),
            author: author.to_string(),
            created_at: chrono::Utc::now(),
            parent_id: parent_id.map(str::to_string),
        };
        task.comments.push(comment.clone());
        let title = task.title.clone();
        self.write_tasks(&tasks)?;

        self.notifier.notify(Notification::success(
            "Comment added",
            format!("on '{title}'"),
        ));
        Ok(Some(comment))
    }

    // --- storage plumbing ---

    fn all_statuses(&self) -> Vec<Status> {
        self.storage.read_array(keys::STATUSES)
    }

    fn all_tasks(&self) -> Vec<Task> {
        self.storage.read_array(keys::TASKS)
    }

    fn write_statuses(&self, statuses: &[Status]) -> Result<()> {
        self.storage.write_array(keys::STATUSES, statuses)
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.storage.write_array(keys::TASKS, tasks)
    }

    fn bump_vocabulary(&self, project_id: &str, tags: &[String]) -> Result<()> {
        if tags.is_empty() {
            return Ok(());
        }
        let key = keys::project_tags(project_id);
        let vocabulary: Vec<String> = self.storage.read_array(&key);
        let merged = view::merge_vocabulary(&vocabulary, tags);
        if merged.len() != vocabulary.len() {
            self.storage.write_array(&key, &merged)?;
        }
        Ok(())
    }
}
