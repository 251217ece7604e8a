//! kb - Local-first Kanban Board Library
//!
//! This library provides the core functionality for the kb CLI tool:
//! a board state engine over a pluggable key-value persistence layer.
//!
//! # Core Concepts
//!
//! - **Projects**: Grouping entities with a member list and their own columns
//! - **Statuses**: Board columns; a task always lives in exactly one
//! - **Tasks**: Cards carrying deadline, assignee, tags, completion, comments
//! - **Drag Gestures**: Explicit state machine for moving cards between columns
//! - **Comment Threads**: Flat stored records rebuilt into a reply forest
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.kb.toml`
//! - `error`: Error types and result aliases
//! - `storage`: Key-value persistence adapter and implementations
//! - `model`: Persisted record types and validation
//! - `notify`: User-facing notification surface
//! - `board`: Task/status repository scoped to a project
//! - `project`: Project repository and invitation handling
//! - `drag`: Drag-and-drop gesture reducer
//! - `thread`: Comment tree reconstruction
//! - `view`: Task filtering and tag vocabulary

pub mod board;
pub mod cli;
pub mod config;
pub mod drag;
pub mod error;
pub mod model;
pub mod notify;
pub mod output;
pub mod project;
pub mod storage;
pub mod thread;
pub mod view;

pub use error::{Error, Result};
