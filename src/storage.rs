//! Storage layer for kb
//!
//! The board engine talks to a small key-value contract: string keys, each
//! holding one JSON array. Reads of absent or unparsable keys yield the empty
//! collection; writes replace the whole array. The store is not
//! schema-enforced, so corrupted state degrades to an empty board instead of
//! a crash.
//!
//! # Directory Structure
//!
//! ```text
//! .kb/                          # Board data directory
//!   projects.json               # Array of Project
//!   statuses.json               # Array of Status
//!   tasks.json                  # Array of Task
//!   projectTags_<projectId>.json# Tag vocabulary cache, one file per project
//! ```

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Name of the board data directory
pub const LOCAL_DIR: &str = ".kb";

/// Well-known collection keys
pub mod keys {
    pub const PROJECTS: &str = "projects";
    pub const STATUSES: &str = "statuses";
    pub const TASKS: &str = "tasks";

    /// Per-project tag vocabulary cache key
    pub fn project_tags(project_id: &str) -> String {
        format!("projectTags_{project_id}")
    }
}

/// Key-value persistence contract the board engine is written against.
///
/// Injected everywhere a repository needs ground truth, so tests can swap in
/// [`MemoryStorage`] with no behavior change.
pub trait Storage {
    /// Raw JSON document stored under `key`, or `None` when absent
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the document stored under `key`
    fn put(&self, key: &str, raw: &str) -> Result<()>;
}

impl dyn Storage + '_ {
    /// Read the array stored under `key`.
    ///
    /// Absent keys and malformed JSON both read as the empty collection; the
    /// store is not schema-enforced and must never turn stale local state
    /// into a fatal error.
    pub fn read_array<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(raw) = self.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::debug!(key, %err, "unparsable collection, reading as empty");
                Vec::new()
            }
        }
    }

    /// Replace the array stored under `key`
    pub fn write_array<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string_pretty(items)?;
        self.put(key, &raw)
    }
}

/// File-backed storage: one `<key>.json` per key under a data directory.
#[derive(Debug, Clone)]
pub struct JsonDirStorage {
    dir: PathBuf,
}

impl JsonDirStorage {
    /// Storage rooted at an explicit data directory
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Storage at the conventional `.kb/` directory under a board root
    pub fn for_root(root: &Path) -> Self {
        Self::new(root.join(LOCAL_DIR))
    }

    /// Path to the data directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the data directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Check whether the data directory exists
    pub fn is_initialized(&self) -> bool {
        self.dir.exists()
    }

    fn file_for_key(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Write data atomically using temp file + rename
    ///
    /// Ensures a reader in another process never sees a partial write; the
    /// file is either fully written or not at all.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

impl Storage for JsonDirStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.file_for_key(key)).ok()
    }

    fn put(&self, key: &str, raw: &str) -> Result<()> {
        let path = self.file_for_key(key);
        tracing::debug!(key, path = %path.display(), "writing collection");
        self.write_atomic(&path, raw.as_bytes())
    }
}

/// Keep keys filesystem-safe; anything outside [A-Za-z0-9_-] becomes '_'
fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        "_".to_string()
    } else {
        out
    }
}

/// In-memory storage, the test double for [`JsonDirStorage`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cells: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw document, e.g. deliberately malformed JSON in tests
    pub fn seed(&self, key: &str, raw: &str) {
        self.cells
            .lock()
            .expect("storage cells")
            .insert(key.to_string(), raw.to_string());
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.cells.lock().expect("storage cells").get(key).cloned()
    }

    fn put(&self, key: &str, raw: &str) -> Result<()> {
        self.cells
            .lock()
            .expect("storage cells")
            .insert(key.to_string(), raw.to_string());
        Ok(())
    }
}
