mod support;

use kb::board::BoardStore;
use kb::model::{TaskDraft, TaskPatch};
use kb::notify::{RecordingNotifier, Severity};

use support::TestBoard;

#[test]
fn created_task_is_listed_with_defaults() {
    let fixture = TestBoard::init();
    let (project, statuses) = fixture.seed_project("Alpha");

    let notifier = RecordingNotifier::new();
    let board = BoardStore::new(&fixture.storage, &notifier);
    let draft = TaskDraft {
        title: "Fix login".to_string(),
        description: "cookie expires too early".to_string(),
        assignee: Some("Ann".to_string()),
        tags: vec!["auth".to_string()],
        ..TaskDraft::default()
    };
    let created = board
        .create_task(&project.id, &statuses[0].id, draft)
        .unwrap();

    let listed = board.list_tasks(&project.id);
    assert_eq!(listed.len(), 1);
    let task = &listed[0];
    assert_eq!(task.id, created.id);
    assert_eq!(task.title, "Fix login");
    assert_eq!(task.assignee.as_deref(), Some("Ann"));
    assert!(!task.completed);
    assert!(task.comments.is_empty());
}

#[test]
fn same_column_move_changes_nothing_and_stays_quiet() {
    let fixture = TestBoard::init();
    let (project, statuses) = fixture.seed_project("Alpha");
    let task = fixture.seed_task(&project, &statuses[0], "Stay put");

    let notifier = RecordingNotifier::new();
    let board = BoardStore::new(&fixture.storage, &notifier);

    assert!(!board.move_task(&task.id, &statuses[0].id).unwrap());
    assert!(notifier.sent().is_empty());
    assert_eq!(
        board.find_task(&task.id).unwrap().status_id,
        statuses[0].id
    );
}

#[test]
fn status_with_tasks_cannot_be_deleted() {
    let fixture = TestBoard::init();
    let (project, statuses) = fixture.seed_project("Alpha");
    fixture.seed_task(&project, &statuses[0], "Blocker");

    let notifier = RecordingNotifier::new();
    let board = BoardStore::new(&fixture.storage, &notifier);

    let err = board.delete_status(&statuses[0].id).unwrap_err();
    assert_eq!(err.exit_code(), 3);

    // columns unchanged, and the rejection was surfaced to the user
    assert_eq!(board.list_statuses(&project.id).len(), 3);
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].severity, Severity::Error);

    // once the tasks are gone the same delete succeeds
    for task in board.list_tasks(&project.id) {
        board.delete_task(&task.id).unwrap();
    }
    board.delete_status(&statuses[0].id).unwrap();
    assert_eq!(board.list_statuses(&project.id).len(), 2);
}

#[test]
fn completing_a_task_does_not_touch_other_fields() {
    let fixture = TestBoard::init();
    let (project, statuses) = fixture.seed_project("Alpha");

    let notifier = RecordingNotifier::new();
    let board = BoardStore::new(&fixture.storage, &notifier);
    let task = board
        .create_task(
            &project.id,
            &statuses[0].id,
            TaskDraft {
                title: "Keep fields".to_string(),
                description: "original text".to_string(),
                tags: vec!["infra".to_string(), "ci".to_string()],
                ..TaskDraft::default()
            },
        )
        .unwrap();
    board.add_comment(&task.id, "first note", "Ann", None).unwrap();

    let patch = TaskPatch {
        completed: Some(true),
        ..TaskPatch::default()
    };
    let updated = board.update_task(&task.id, &patch).unwrap();

    assert!(updated.completed);
    assert_eq!(updated.description, "original text");
    assert_eq!(updated.tags, vec!["infra", "ci"]);
    assert_eq!(updated.comments.len(), 1);
}

#[test]
fn state_survives_reopening_the_storage() {
    let fixture = TestBoard::init();
    let (project, statuses) = fixture.seed_project("Alpha");
    let task = fixture.seed_task(&project, &statuses[0], "Durable");

    // a fresh handle over the same directory sees the same records
    let reopened = kb::storage::JsonDirStorage::for_root(fixture.path());
    let notifier = RecordingNotifier::new();
    let board = BoardStore::new(&reopened, &notifier);
    assert_eq!(board.find_task(&task.id).unwrap().title, "Durable");
    assert_eq!(board.list_statuses(&project.id).len(), 3);
}
