//! `kb tags` - show a project's tag vocabulary

use std::path::PathBuf;

use serde::Serialize;

use crate::board::BoardStore;
use crate::cli::{resolve_project, BoardContext};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

pub struct TagsOptions {
    pub project: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct TagsOutput {
    project_id: String,
    tags: Vec<String>,
}

pub fn run(opts: TagsOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let project = resolve_project(&ctx, &opts.project)?;

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let tags = board.tag_vocabulary(&project.id);

    let mut human = HumanOutput::new(format!(
        "{} tag(s) ever used in '{}'",
        tags.len(),
        project.title
    ));
    for tag in &tags {
        human.push_detail(format!("#{tag}"));
    }

    emit_success(
        ctx.output,
        "tags",
        &TagsOutput {
            project_id: project.id.clone(),
            tags,
        },
        Some(&human),
    )
}
