//! `kb project` - create, list, and join projects

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{resolve_project, BoardContext};
use crate::error::Result;
use crate::model::Project;
use crate::output::{emit_success, HumanOutput};
use crate::project::ProjectStore;

pub struct NewOptions {
    pub title: String,
    pub description: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_new(opts: NewOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let store = ProjectStore::new(&ctx.storage, ctx.notifier.as_ref());
    let project = store.create(
        &opts.title,
        &opts.description,
        &ctx.author,
        &ctx.config.board.default_statuses,
    )?;

    let mut human = HumanOutput::new(format!("Created project '{}'", project.title));
    human.push_summary("id", &project.id);
    human.push_summary(
        "columns",
        ctx.config.board.default_statuses.join(", "),
    );
    human.push_next_step(format!("kb task add {} <title>", project.title));

    emit_success(ctx.output, "project new", &project, Some(&human))
}

pub struct ListOptions {
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ProjectList {
    projects: Vec<Project>,
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let store = ProjectStore::new(&ctx.storage, ctx.notifier.as_ref());
    let projects = store.list();

    let mut human = HumanOutput::new(format!("{} project(s)", projects.len()));
    for project in &projects {
        human.push_detail(format!(
            "{} - {} ({} member(s))",
            project.id,
            project.title,
            project.members.len()
        ));
    }
    if projects.is_empty() {
        human.push_next_step("kb project new <title>");
    }

    emit_success(
        ctx.output,
        "project list",
        &ProjectList { projects },
        Some(&human),
    )
}

pub struct InviteOptions {
    pub project: String,
    pub login: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct InviteOutput {
    project: Project,
    joined: bool,
}

pub fn run_invite(opts: InviteOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let target = resolve_project(&ctx, &opts.project)?;

    let store = ProjectStore::new(&ctx.storage, ctx.notifier.as_ref());
    let joined = store.accept_invite(&target.id, &opts.login)?;
    let project = store.get(&target.id)?;

    let mut human = HumanOutput::new(if joined {
        format!("'{}' joined '{}'", opts.login, project.title)
    } else {
        format!("'{}' is already a member of '{}'", opts.login, project.title)
    });
    human.push_summary("members", project.members.join(", "));

    emit_success(
        ctx.output,
        "project invite",
        &InviteOutput { project, joined },
        Some(&human),
    )
}
