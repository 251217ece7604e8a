//! `kb status` - manage a project's columns

use std::path::PathBuf;

use serde::Serialize;

use crate::board::BoardStore;
use crate::cli::{resolve_project, resolve_status, BoardContext};
use crate::error::Result;
use crate::model::Status;
use crate::output::{emit_success, HumanOutput};

pub struct AddOptions {
    pub project: String,
    pub name: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let project = resolve_project(&ctx, &opts.project)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let status = board.create_status(&project.id, &opts.name)?;

    let mut human = HumanOutput::new(format!(
        "Added column '{}' to '{}'",
        status.name, project.title
    ));
    human.push_summary("id", &status.id);

    emit_success(ctx.output, "status add", &status, Some(&human))
}

pub struct RenameOptions {
    pub project: String,
    pub status: String,
    pub name: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct RenameOutput {
    status: Status,
    renamed: bool,
}

pub fn run_rename(opts: RenameOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let project = resolve_project(&ctx, &opts.project)?;
    let target = resolve_status(&ctx, &project.id, &opts.status)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let renamed = board.rename_status(&target.id, &opts.name)?;
    let status = resolve_status(&ctx, &project.id, &target.id)?;

    let human = HumanOutput::new(if renamed {
        format!("Renamed column to '{}'", status.name)
    } else {
        "Empty name; column unchanged".to_string()
    });

    emit_success(
        ctx.output,
        "status rename",
        &RenameOutput { status, renamed },
        Some(&human),
    )
}

pub struct RmOptions {
    pub project: String,
    pub status: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct RmOutput {
    removed: Status,
}

pub fn run_rm(opts: RmOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let project = resolve_project(&ctx, &opts.project)?;
    let target = resolve_status(&ctx, &project.id, &opts.status)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    board.delete_status(&target.id)?;

    let human = HumanOutput::new(format!("Removed column '{}'", target.name));
    emit_success(
        ctx.output,
        "status rm",
        &RmOutput { removed: target },
        Some(&human),
    )
}

pub struct ListOptions {
    pub project: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct StatusList {
    statuses: Vec<StatusRow>,
}

#[derive(Serialize)]
struct StatusRow {
    #[serde(flatten)]
    status: Status,
    tasks: usize,
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let project = resolve_project(&ctx, &opts.project)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let tasks = board.list_tasks(&project.id);
    let statuses: Vec<StatusRow> = board
        .list_statuses(&project.id)
        .into_iter()
        .map(|status| {
            let count = tasks.iter().filter(|t| t.status_id == status.id).count();
            StatusRow {
                status,
                tasks: count,
            }
        })
        .collect();

    let mut human = HumanOutput::new(format!(
        "{} column(s) in '{}'",
        statuses.len(),
        project.title
    ));
    for row in &statuses {
        human.push_detail(format!(
            "{} - {} ({} task(s))",
            row.status.id, row.status.name, row.tasks
        ));
    }

    emit_success(
        ctx.output,
        "status list",
        &StatusList { statuses },
        Some(&human),
    )
}
