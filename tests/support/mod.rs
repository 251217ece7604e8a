use std::path::Path;

use kb::model::{Project, Status, Task, TaskDraft};
use kb::notify::NullNotifier;
use kb::storage::JsonDirStorage;
use tempfile::TempDir;

/// A board rooted in a temp directory, initialized and ready for commands.
pub struct TestBoard {
    dir: TempDir,
    pub storage: JsonDirStorage,
}

impl TestBoard {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let storage = JsonDirStorage::for_root(dir.path());
        storage.init().expect("init data dir");
        Self { dir, storage }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a project with the stock three columns
    pub fn seed_project(&self, title: &str) -> (Project, Vec<Status>) {
        let notifier = NullNotifier;
        let store = kb::project::ProjectStore::new(&self.storage, &notifier);
        let columns = vec![
            "To Do".to_string(),
            "In Progress".to_string(),
            "Done".to_string(),
        ];
        let project = store
            .create(title, "", "Ann", &columns)
            .expect("create project");
        let board = kb::board::BoardStore::new(&self.storage, &notifier);
        let statuses = board.list_statuses(&project.id);
        (project, statuses)
    }

    pub fn seed_task(&self, project: &Project, status: &Status, title: &str) -> Task {
        let notifier = NullNotifier;
        let board = kb::board::BoardStore::new(&self.storage, &notifier);
        board
            .create_task(
                &project.id,
                &status.id,
                TaskDraft {
                    title: title.to_string(),
                    ..TaskDraft::default()
                },
            )
            .expect("create task")
    }
}
