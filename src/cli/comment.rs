//! `kb comment` - threaded discussion on tasks

use std::path::PathBuf;

use serde::Serialize;

use crate::board::BoardStore;
use crate::cli::{resolve_task, BoardContext};
use crate::error::{Error, Result};
use crate::model::Comment;
use crate::output::{emit_success, HumanOutput};
use crate::thread::CommentForest;

pub struct AddOptions {
    pub task: String,
    pub text: String,
    pub reply_to: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct AddOutput {
    comment: Option<Comment>,
    added: bool,
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let target = resolve_task(&ctx, &opts.task)?;

    if let Some(parent) = &opts.reply_to {
        // A bad reply target is a user error at the CLI even though the
        // engine would degrade it to a root comment at render time.
        if !target.comments.iter().any(|c| &c.id == parent) {
            return Err(Error::InvalidArgument(format!(
                "no comment '{parent}' on task '{}'",
                target.title
            )));
        }
    }

    let board = BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    let comment = board.add_comment(
        &target.id,
        &opts.text,
        &ctx.author,
        opts.reply_to.as_deref(),
    )?;
    let added = comment.is_some();

    let human = HumanOutput::new(if added {
        format!("Commented on '{}'", target.title)
    } else {
        "Empty comment; nothing added".to_string()
    });
    emit_success(
        ctx.output,
        "comment add",
        &AddOutput { comment, added },
        Some(&human),
    )
}

pub struct ListOptions {
    pub task: String,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ThreadEntry {
    #[serde(flatten)]
    comment: Comment,
    depth: usize,
}

#[derive(Serialize)]
struct ThreadOutput {
    task_id: String,
    comments: Vec<ThreadEntry>,
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let ctx = BoardContext::open(opts.data_dir, opts.user, opts.json, opts.quiet)?;
    let target = resolve_task(&ctx, &opts.task)?;

    let forest = CommentForest::build(&target.comments);
    let flat = forest.flatten();

    let mut human = HumanOutput::new(format!(
        "{} comment(s) on '{}'",
        flat.len(),
        target.title
    ));
    for entry in &flat {
        let indent = "  ".repeat(entry.depth);
        human.push_detail(format!(
            "{indent}{} [{}]: {}",
            entry.comment.author,
            entry.comment.created_at.format("%Y-%m-%d %H:%M"),
            entry.comment.text
        ));
    }

    let comments = flat
        .into_iter()
        .map(|entry| ThreadEntry {
            comment: entry.comment.clone(),
            depth: entry.depth,
        })
        .collect();

    emit_success(
        ctx.output,
        "comment list",
        &ThreadOutput {
            task_id: target.id.clone(),
            comments,
        },
        Some(&human),
    )
}
