//! Command-line interface for kb
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Project, Status, Task};
use crate::notify::{Notifier, NullNotifier, TermNotifier};
use crate::output::OutputOptions;
use crate::storage::JsonDirStorage;

mod comment;
mod init;
mod project;
mod status;
mod tags;
mod task;

/// kb - local-first kanban board
///
/// Projects contain status columns, columns contain tasks, tasks carry
/// deadlines, tags, assignees, and threaded comments. All state lives in a
/// `.kb/` directory next to where you run the tool.
#[derive(Parser, Debug)]
#[command(name = "kb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the board data directory (defaults to ./.kb)
    #[arg(long, global = true, env = "KB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Acting user name for comments and invitations
    #[arg(long, global = true, env = "KB_USER")]
    pub user: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a board in the current directory
    Init,

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Status column management
    #[command(subcommand)]
    Status(StatusCommands),

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Comment threads on tasks
    #[command(subcommand)]
    Comment(CommentCommands),

    /// Show a project's tag vocabulary
    Tags {
        /// Project id or title
        project: String,
    },
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a project with the default columns
    New {
        /// Project title
        title: String,

        /// Project description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List projects
    List,

    /// Accept an invitation: add a member to a project
    Invite {
        /// Project id or title
        project: String,

        /// Login of the joining member
        login: String,
    },
}

/// Status subcommands
#[derive(Subcommand, Debug)]
pub enum StatusCommands {
    /// Add a column to a project
    Add {
        /// Project id or title
        project: String,

        /// Column name
        name: String,
    },

    /// Rename a column
    Rename {
        /// Project id or title
        project: String,

        /// Status id or current name
        status: String,

        /// New name
        name: String,
    },

    /// Remove an empty column
    Rm {
        /// Project id or title
        project: String,

        /// Status id or name
        status: String,
    },

    /// List a project's columns
    List {
        /// Project id or title
        project: String,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task to a project
    Add {
        /// Project id or title
        project: String,

        /// Task title
        title: String,

        /// Target column (defaults to the project's first column)
        #[arg(long)]
        status: Option<String>,

        /// Task description
        #[arg(long, default_value = "")]
        description: String,

        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,

        /// Assignee name
        #[arg(long)]
        assignee: Option<String>,

        /// Tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Edit task fields; omitted fields stay unchanged
    Edit {
        /// Task id or title
        task: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New deadline as YYYY-MM-DD
        #[arg(long, conflicts_with = "clear_deadline")]
        deadline: Option<String>,

        /// Remove the deadline
        #[arg(long)]
        clear_deadline: bool,

        /// New assignee
        #[arg(long, conflicts_with = "clear_assignee")]
        assignee: Option<String>,

        /// Remove the assignee
        #[arg(long)]
        clear_assignee: bool,

        /// Replace the tag set (repeatable; pass none with --no-tags)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Clear all tags
        #[arg(long, conflicts_with = "tags")]
        no_tags: bool,
    },

    /// Mark a task completed
    Done {
        /// Task id or title
        task: String,
    },

    /// Mark a task not completed
    Undone {
        /// Task id or title
        task: String,
    },

    /// Move a task to another column (drag-and-drop)
    Move {
        /// Task id or title
        task: String,

        /// Drop target: a status id or name, or another task's id
        #[arg(long, required = true)]
        onto: String,
    },

    /// Delete a task
    Rm {
        /// Task id or title
        task: String,
    },

    /// List a project's tasks
    List {
        /// Project id or title
        project: String,

        /// Only tasks not yet completed
        #[arg(long, conflicts_with = "completed")]
        active: bool,

        /// Only completed tasks
        #[arg(long)]
        completed: bool,

        /// Only tasks assigned to this name
        #[arg(long)]
        assignee: Option<String>,

        /// Only tasks carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
}

/// Comment subcommands
#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// Add a comment to a task
    Add {
        /// Task id or title
        task: String,

        /// Comment text
        text: String,

        /// Comment id to reply to
        #[arg(long)]
        reply_to: Option<String>,
    },

    /// Show a task's comment thread
    List {
        /// Task id or title
        task: String,
    },
}

/// Everything a command needs once the board is open
pub(crate) struct BoardContext {
    pub storage: JsonDirStorage,
    pub config: Config,
    pub author: String,
    pub notifier: Box<dyn Notifier>,
    pub output: OutputOptions,
}

impl BoardContext {
    /// Open an initialized board; user errors when the data directory is
    /// missing so every command after `init` has the same failure mode.
    pub fn open(
        data_dir: Option<PathBuf>,
        user: Option<String>,
        json: bool,
        quiet: bool,
    ) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let storage = match data_dir {
            Some(dir) => JsonDirStorage::new(dir),
            None => JsonDirStorage::for_root(&cwd),
        };
        if !storage.is_initialized() {
            return Err(Error::NotInitialized(storage.dir().to_path_buf()));
        }

        let config_root = storage.dir().parent().map(PathBuf::from).unwrap_or(cwd);
        let config = Config::load(&config_root)?;
        let author = user
            .or_else(|| config.author().map(str::to_string))
            .unwrap_or_else(|| "me".to_string());

        // Notifications go to stderr; silence them for scripted output
        let notifier: Box<dyn Notifier> = if json || quiet {
            Box::new(NullNotifier)
        } else {
            Box::new(TermNotifier)
        };

        Ok(Self {
            storage,
            config,
            author,
            notifier,
            output: OutputOptions { json, quiet },
        })
    }
}

/// Resolve a project by id or exact title
pub(crate) fn resolve_project(ctx: &BoardContext, selector: &str) -> Result<Project> {
    let store = crate::project::ProjectStore::new(&ctx.storage, ctx.notifier.as_ref());
    store
        .list()
        .into_iter()
        .find(|project| project.id == selector || project.title == selector)
        .ok_or_else(|| Error::ProjectNotFound(selector.to_string()))
}

/// Resolve a status within a project by id or exact name
pub(crate) fn resolve_status(
    ctx: &BoardContext,
    project_id: &str,
    selector: &str,
) -> Result<Status> {
    let board = crate::board::BoardStore::new(&ctx.storage, ctx.notifier.as_ref());
    board
        .list_statuses(project_id)
        .into_iter()
        .find(|status| status.id == selector || status.name == selector)
        .ok_or_else(|| Error::StatusNotFound(selector.to_string()))
}

/// Resolve a task by id or exact title, across all projects
pub(crate) fn resolve_task(ctx: &BoardContext, selector: &str) -> Result<Task> {
    let storage: &dyn crate::storage::Storage = &ctx.storage;
    let tasks: Vec<Task> = storage.read_array(crate::storage::keys::TASKS);
    tasks
        .into_iter()
        .find(|task| task.id == selector || task.title == selector)
        .ok_or_else(|| Error::TaskNotFound(selector.to_string()))
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => init::run(init::InitOptions {
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Project(cmd) => match cmd {
                ProjectCommands::New { title, description } => {
                    project::run_new(project::NewOptions {
                        title,
                        description,
                        data_dir: self.data_dir,
                        user: self.user,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                ProjectCommands::List => project::run_list(project::ListOptions {
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
                ProjectCommands::Invite { project, login } => {
                    project::run_invite(project::InviteOptions {
                        project,
                        login,
                        data_dir: self.data_dir,
                        user: self.user,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
            },
            Commands::Status(cmd) => match cmd {
                StatusCommands::Add { project, name } => {
                    status::run_add(status::AddOptions {
                        project,
                        name,
                        data_dir: self.data_dir,
                        user: self.user,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
                StatusCommands::Rename {
                    project,
                    status: target,
                    name,
                } => status::run_rename(status::RenameOptions {
                    project,
                    status: target,
                    name,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
                StatusCommands::Rm {
                    project,
                    status: target,
                } => status::run_rm(status::RmOptions {
                    project,
                    status: target,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
                StatusCommands::List { project } => status::run_list(status::ListOptions {
                    project,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add {
                    project,
                    title,
                    status: target,
                    description,
                    deadline,
                    assignee,
                    tags,
                } => task::run_add(task::AddOptions {
                    project,
                    title,
                    status: target,
                    description,
                    deadline,
                    assignee,
                    tags,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Edit {
                    task: target,
                    title,
                    description,
                    deadline,
                    clear_deadline,
                    assignee,
                    clear_assignee,
                    tags,
                    no_tags,
                } => task::run_edit(task::EditOptions {
                    task: target,
                    title,
                    description,
                    deadline,
                    clear_deadline,
                    assignee,
                    clear_assignee,
                    tags,
                    no_tags,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Done { task: target } => task::run_completion(
                    task::CompletionOptions {
                        task: target,
                        completed: true,
                        data_dir: self.data_dir,
                        user: self.user,
                        json: self.json,
                        quiet: self.quiet,
                    },
                ),
                TaskCommands::Undone { task: target } => task::run_completion(
                    task::CompletionOptions {
                        task: target,
                        completed: false,
                        data_dir: self.data_dir,
                        user: self.user,
                        json: self.json,
                        quiet: self.quiet,
                    },
                ),
                TaskCommands::Move {
                    task: target,
                    onto,
                } => task::run_move(task::MoveOptions {
                    task: target,
                    onto,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Rm { task: target } => task::run_rm(task::RmOptions {
                    task: target,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::List {
                    project,
                    active,
                    completed,
                    assignee,
                    tag,
                } => task::run_list(task::ListOptions {
                    project,
                    active,
                    completed,
                    assignee,
                    tag,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Comment(cmd) => match cmd {
                CommentCommands::Add {
                    task: target,
                    text,
                    reply_to,
                } => comment::run_add(comment::AddOptions {
                    task: target,
                    text,
                    reply_to,
                    data_dir: self.data_dir,
                    user: self.user,
                    json: self.json,
                    quiet: self.quiet,
                }),
                CommentCommands::List { task: target } => {
                    comment::run_list(comment::ListOptions {
                        task: target,
                        data_dir: self.data_dir,
                        user: self.user,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
            },
            Commands::Tags { project } => tags::run(tags::TagsOptions {
                project,
                data_dir: self.data_dir,
                user: self.user,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}
