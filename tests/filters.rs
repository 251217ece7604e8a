mod support;

use kb::board::BoardStore;
use kb::model::{TaskDraft, TaskPatch};
use kb::notify::NullNotifier;
use kb::view::{visible_tasks, Completion, TaskFilters};

use support::TestBoard;

#[test]
fn active_tasks_for_one_assignee() {
    let fixture = TestBoard::init();
    let (project, statuses) = fixture.seed_project("Alpha");

    let notifier = NullNotifier;
    let board = BoardStore::new(&fixture.storage, &notifier);
    let mk = |title: &str, assignee: Option<&str>| {
        board
            .create_task(
                &project.id,
                &statuses[0].id,
                TaskDraft {
                    title: title.to_string(),
                    assignee: assignee.map(str::to_string),
                    ..TaskDraft::default()
                },
            )
            .unwrap()
    };

    let ann_open = mk("Ann open", Some("Ann"));
    let ann_done = mk("Ann done", Some("Ann"));
    mk("Bob open", Some("Bob"));
    mk("Nobody", None);
    board
        .update_task(
            &ann_done.id,
            &TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    let tasks = board.list_tasks(&project.id);
    let filters = TaskFilters {
        completion: Completion::ActiveOnly,
        assignee: Some("Ann".to_string()),
        tag: None,
    };
    let visible = visible_tasks(&tasks, &filters);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, ann_open.id);

    // empty filters return the input unchanged
    let all = visible_tasks(&tasks, &TaskFilters::default());
    let ids: Vec<_> = all.iter().map(|t| t.id.as_str()).collect();
    let stored: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, stored);
}

#[test]
fn vocabulary_outlives_the_tags_that_seeded_it() {
    let fixture = TestBoard::init();
    let (project, statuses) = fixture.seed_project("Alpha");

    let notifier = NullNotifier;
    let board = BoardStore::new(&fixture.storage, &notifier);
    let task = board
        .create_task(
            &project.id,
            &statuses[0].id,
            TaskDraft {
                title: "Tagged".to_string(),
                tags: vec!["backend".to_string(), "urgent".to_string()],
                ..TaskDraft::default()
            },
        )
        .unwrap();
    assert_eq!(board.tag_vocabulary(&project.id), vec!["backend", "urgent"]);

    // strip the tags, then delete the task entirely
    board
        .update_task(
            &task.id,
            &TaskPatch {
                tags: Some(Vec::new()),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert_eq!(board.tag_vocabulary(&project.id), vec!["backend", "urgent"]);

    board.delete_task(&task.id).unwrap();
    assert_eq!(board.tag_vocabulary(&project.id), vec!["backend", "urgent"]);
}

#[test]
fn vocabularies_are_scoped_per_project() {
    let fixture = TestBoard::init();
    let (alpha, alpha_statuses) = fixture.seed_project("Alpha");
    let (beta, beta_statuses) = fixture.seed_project("Beta");

    let notifier = NullNotifier;
    let board = BoardStore::new(&fixture.storage, &notifier);
    board
        .create_task(
            &alpha.id,
            &alpha_statuses[0].id,
            TaskDraft {
                title: "A".to_string(),
                tags: vec!["alpha-only".to_string()],
                ..TaskDraft::default()
            },
        )
        .unwrap();
    board
        .create_task(
            &beta.id,
            &beta_statuses[0].id,
            TaskDraft {
                title: "B".to_string(),
                tags: vec!["beta-only".to_string()],
                ..TaskDraft::default()
            },
        )
        .unwrap();

    assert_eq!(board.tag_vocabulary(&alpha.id), vec!["alpha-only"]);
    assert_eq!(board.tag_vocabulary(&beta.id), vec!["beta-only"]);
}
