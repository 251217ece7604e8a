//! `kb task` - create, edit, move, and list tasks

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::board::BoardStore;
use crate::cli::{resolve_project, resolve_task, BoardContext};
use crate::drag::DragGesture;
use crate::error::{Error, Result};
use crate::model::{Task, TaskDraft, TaskPatch};
use crate::output::{emit_success, HumanOutput};
use crate::view::{visible_tasks, Completion, TaskFilters};

fn parse_deadline(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        Error::InvalidArgument(format!("invalid deadline '{raw}': expected YYYY-MM-DD"))
    })
}

pub struct AddOptions {
    pub project: String,
    pub title: String,
    pub status: Option<String>,
    pub description: String,
    pub deadline: Option<String>,
    pub assignee: Option<String>,
    pub tags: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let project = resolve_project(&ctx, &opts.project)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let status = match &opts.status {
        Some(selector) => crate::cli::resolve_status(&ctx, &project.id, selector)?,
        None => board
            .list_statuses(&project.id)
            .into_iter()
            .next()
            .ok_or_else(|| Error::StatusNotFound("<first column>".to_string()))?,
    };

    let deadline = opts.deadline.as_deref().map(parse_deadline).transpose()?;
    let draft = TaskDraft {
        title: opts.title,
        description: opts.description,
        deadline,
        assignee: opts.assignee,
        tags: opts.tags,
    };
    let task = board.create_task(&project.id, &status.id, draft)?;

    let mut human = HumanOutput::new(format!("Created task '{}'", task.title));
    human.push_summary("id", &task.id);
    human.push_summary("column", &status.name);
    if !task.tags.is_empty() {
        human.push_summary("tags", task.tags.join(", "));
    }

    emit_success(ctx.output, "task add", &task, Some(&human))
}

pub struct EditOptions {
    pub task: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub clear_deadline: bool,
    pub assignee: Option<String>,
    pub clear_assignee: bool,
    pub tags: Vec<String>,
    pub no_tags: bool,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_edit(opts: EditOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let target = resolve_task(&ctx, &opts.task)?;

    let deadline = match (&opts.deadline, opts.clear_deadline) {
        (Some(raw), _) => Some(Some(parse_deadline(raw)?)),
        (None, true) => Some(None),
        (None, false) => None,
    };
    let assignee = match (&opts.assignee, opts.clear_assignee) {
        (Some(name), _) => Some(Some(name.clone())),
        (None, true) => Some(None),
        (None, false) => None,
    };
    let tags = if opts.no_tags {
        Some(Vec::new())
    } else if opts.tags.is_empty() {
        None
    } else {
        Some(opts.tags.clone())
    };

    let patch = TaskPatch {
        title: opts.title,
        description: opts.description,
        deadline,
        assignee,
        tags,
        status_id: None,
        completed: None,
    };
    if patch.is_empty() {
        return Err(Error::InvalidArgument(
            "nothing to edit: pass at least one field".to_string(),
        ));
    }

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let task = board.update_task(&target.id, &patch)?;

    let human = HumanOutput::new(format!("Updated task '{}'", task.title));
    emit_success(ctx.output, "task edit", &task, Some(&human))
}

pub struct CompletionOptions {
    pub task: String,
    pub completed: bool,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_completion(opts: CompletionOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let target = resolve_task(&ctx, &opts.task)?;

    let patch = TaskPatch {
        completed: Some(opts.completed),
        ..TaskPatch::default()
    };
    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let task = board.update_task(&target.id, &patch)?;

    let command = if opts.completed { "task done" } else { "task undone" };
    let human = HumanOutput::new(format!(
        "'{}' marked {}",
        task.title,
        if task.completed { "done" } else { "not done" }
    ));
    emit_success(ctx.output, command, &task, Some(&human))
}

pub struct MoveOptions {
    pub task: String,
    pub onto: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct MoveOutput {
    task: Task,
    moved: bool,
}

/// Move a card by running a full drag gesture: pick the card up, hover the
/// drop target, and drop. The target may be a column (id or name) or another
/// card; dropping onto a card lands in that card's column.
pub fn run_move(opts: MoveOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let target = resolve_task(&ctx, &opts.task)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let statuses = board.list_statuses(&target.project_id);
    let tasks = board.list_tasks(&target.project_id);

    // Map the selector to a droppable identifier: column name -> column id,
    // task title -> task id; ids pass through. Unknown selectors stay as-is
    // and the drop degrades to a no-op.
    let hovered = statuses
        .iter()
        .find(|status| status.id == opts.onto || status.name == opts.onto)
        .map(|status| status.id.clone())
        .or_else(|| {
            tasks
                .iter()
                .find(|task| task.id == opts.onto || task.title == opts.onto)
                .map(|task| task.id.clone())
        })
        .unwrap_or_else(|| opts.onto.clone());

    let mut gesture = DragGesture::new();
    gesture.start(target.id.clone());
    gesture.over(Some(&hovered), &statuses, &tasks);

    let moved = match gesture.finish() {
        Some(pending) => board.move_task(&pending.task_id, &pending.status_id)?,
        None => false,
    };

    let task = board
        .find_task(&target.id)
        .ok_or_else(|| Error::TaskNotFound(target.id.clone()))?;

    let human = HumanOutput::new(if moved {
        format!("Moved '{}'", task.title)
    } else {
        format!("'{}' did not move", task.title)
    });
    emit_success(
        ctx.output,
        "task move",
        &MoveOutput { task, moved },
        Some(&human),
    )
}

pub struct RmOptions {
    pub task: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct RmOutput {
    removed: Task,
}

pub fn run_rm(opts: RmOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let target = resolve_task(&ctx, &opts.task)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    board.delete_task(&target.id)?;

    let human = HumanOutput::new(format!("Deleted task '{}'", target.title));
    emit_success(
        ctx.output,
        "task rm",
        &RmOutput { removed: target },
        Some(&human),
    )
}

pub struct ListOptions {
    pub project: String,
    pub active: bool,
    pub completed: bool,
    pub assignee: Option<String>,
    pub tag: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct TaskList {
    tasks: Vec<Task>,
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let project = resolve_project(&ctx, &opts.project)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let statuses = board.list_statuses(&project.id);
    let all = board.list_tasks(&project.id);

    let filters = TaskFilters {
        completion: if opts.active {
            Completion::ActiveOnly
        } else if opts.completed {
            Completion::CompletedOnly
        } else {
            Completion::All
        },
        assignee: opts.assignee,
        tag: opts.tag,
    };
    let tasks: Vec<Task> = visible_tasks(&all, &filters)
        .into_iter()
        .cloned()
        .collect();

    let mut human = HumanOutput::new(format!(
        "{} task(s) in '{}'",
        tasks.len(),
        project.title
    ));
    for task in &tasks {
        let column = statuses
            .iter()
            .find(|status| status.id == task.status_id)
            .map(|status| status.name.as_str())
            .unwrap_or("?");
        let mark = if task.completed { "x" } else { " " };
        let mut line = format!("[{mark}] {} - {} ({column})", task.id, task.title);
        if let Some(assignee) = &task.assignee {
            line.push_str(&format!(" @{assignee}"));
        }
        if !task.tags.is_empty() {
            line.push_str(&format!(" #{}", task.tags.join(" #")));
        }
        human.push_detail(line);
    }

    emit_success(ctx.output, "task list", &TaskList { tasks }, Some(&human))
}
