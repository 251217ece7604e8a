//! Error types for kb
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (validation failure, unknown entity, bad args)
//! - 3: Blocked by a referential rule (status still has tasks)
//! - 4: Operation failed (IO, malformed data we refused to write)

use thiserror::Error;

/// Exit codes for the kb CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const RULE_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for kb operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Board not initialized at {}", .0.display())]
    NotInitialized(std::path::PathBuf),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Status not found: {0}")]
    StatusNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Referential rule blocks (exit code 3)
    #[error("Status '{name}' still has {tasks} task(s); move or delete them first")]
    StatusInUse {
        id: String,
        name: String,
        tasks: usize,
    },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::NotInitialized(_)
            | Error::EmptyField(_)
            | Error::ProjectNotFound(_)
            | Error::TaskNotFound(_)
            | Error::StatusNotFound(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Referential rule blocks
            Error::StatusInUse { .. } => exit_codes::RULE_BLOCKED,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error envelopes, when the error carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::StatusInUse { id, name, tasks } => Some(serde_json::json!({
                "statusId": id,
                "statusName": name,
                "tasks": tasks,
            })),
            _ => None,
        }
    }
}

/// Result type alias for kb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
