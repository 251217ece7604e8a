//! Project repository: creation, listing, and invitation acceptance.
//!
//! Projects have no delete operation; a board accumulates them. Creating a
//! project also seeds its default columns so a fresh board is usable
//! immediately, each column with its own fresh id so two projects never share
//! a status record.

use crate::error::{Error, Result};
use crate::model::{self, Project, Status};
use crate::notify::{Notification, Notifier};
use crate::storage::{keys, Storage};

pub struct ProjectStore<'a> {
    storage: &'a dyn Storage,
    notifier: &'a dyn Notifier,
}

impl<'a> ProjectStore<'a> {
    pub fn new(storage: &'a dyn Storage, notifier: &'a dyn Notifier) -> Self {
        Self { storage, notifier }
    }

    pub fn list(&self) -> Vec<Project> {
        self.storage.read_array(keys::PROJECTS)
    }

    pub fn find(&self, project_id: &str) -> Option<Project> {
        self.list()
            .into_iter()
            .find(|project| project.id == project_id)
    }

    pub fn get(&self, project_id: &str) -> Result<Project> {
        self.find(project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))
    }

    /// Create a project owned by `owner` and seed its default columns.
    pub fn create(
        &self,
        title: &str,
        description: &str,
        owner: &str,
        default_columns: &[String],
    ) -> Result<Project> {
        let title = model::non_empty(title, "project title")?;

        let project = Project {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: chrono::Utc::now(),
            members: vec![owner.to_string()],
        };

        let mut projects = self.list();
        projects.push(project.clone());
        self.storage.write_array(keys::PROJECTS, &projects)?;

        let mut statuses: Vec<Status> = self.storage.read_array(keys::STATUSES);
        for name in default_columns {
            statuses.push(Status {
                id: model::fresh_id(),
                name: name.clone(),
                project_id: project.id.clone(),
            });
        }
        self.storage.write_array(keys::STATUSES, &statuses)?;

        self.notifier.notify(Notification::success(
            "Project created",
            format!("'{}'", project.title),
        ));
        Ok(project)
    }

    /// Add `login` to the member list. Idempotent: accepting an invitation
    /// twice returns `false` the second time and changes nothing. Members
    /// never shrink.
    pub fn accept_invite(&self, project_id: &str, login: &str) -> Result<bool> {
        let login = model::non_empty(login, "member login")?;

        let mut projects = self.list();
        let project = projects
            .iter_mut()
            .find(|project| project.id == project_id)
            .ok_or_else(|| Error::ProjectNotFound(project_id.to_string()))?;

        if project.members.iter().any(|member| member == login) {
            return Ok(false);
        }
        project.members.push(login.to_string());
        let title = project.title.clone();
        self.storage.write_array(keys::PROJECTS, &projects)?;

        self.notifier.notify(Notification::success(
            "Joined project",
            format!("'{login}' joined '{title}'"),
        ));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::storage::MemoryStorage;

    fn columns() -> Vec<String> {
        vec![
            "To Do".to_string(),
            "In Progress".to_string(),
            "Done".to_string(),
        ]
    }

    #[test]
    fn create_seeds_default_columns_with_distinct_ids() {
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::new();
        let store = ProjectStore::new(&storage, &notifier);

        let first = store.create("Alpha", "", "Ann", &columns()).unwrap();
        let second = store.create("Beta", "", "Ann", &columns()).unwrap();

        let statuses: Vec<Status> = (&storage as &dyn Storage).read_array(keys::STATUSES);
        assert_eq!(statuses.len(), 6);

        let first_ids: Vec<_> = statuses
            .iter()
            .filter(|s| s.project_id == first.id)
            .map(|s| s.id.clone())
            .collect();
        let second_ids: Vec<_> = statuses
            .iter()
            .filter(|s| s.project_id == second.id)
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(first_ids.len(), 3);
        assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
    }

    #[test]
    fn create_rejects_empty_title() {
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::new();
        let store = ProjectStore::new(&storage, &notifier);

        assert!(store.create("  ", "", "Ann", &columns()).is_err());
        assert!(store.list().is_empty());
    }

    #[test]
    fn owner_is_the_first_member() {
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::new();
        let store = ProjectStore::new(&storage, &notifier);

        let project = store.create("Alpha", "", "Ann", &columns()).unwrap();
        assert_eq!(project.members, vec!["Ann"]);
    }

    #[test]
    fn accept_invite_is_idempotent() {
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::new();
        let store = ProjectStore::new(&storage, &notifier);

        let project = store.create("Alpha", "", "Ann", &columns()).unwrap();
        assert!(store.accept_invite(&project.id, "Bob").unwrap());
        assert!(!store.accept_invite(&project.id, "Bob").unwrap());

        let members = store.get(&project.id).unwrap().members;
        assert_eq!(members, vec!["Ann", "Bob"]);
    }

    #[test]
    fn invite_to_unknown_project_is_a_user_error() {
        let storage = MemoryStorage::new();
        let notifier = RecordingNotifier::new();
        let store = ProjectStore::new(&storage, &notifier);

        let err = store.accept_invite("nope", "Bob").unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
