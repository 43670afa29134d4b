//! Error types shared across the board, the snapshot store and the CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::task::TaskId;

/// Reasons a board mutation is refused. A refused mutation leaves the board untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("title must not be blank")]
    BlankTitle,
    #[error("description must not be blank")]
    BlankDescription,
    #[error("no task with id {0}")]
    UnknownTask(TaskId),
    #[error("several tasks are titled '{title}' ({}); use an id instead", join_ids(.ids))]
    AmbiguousTitle { title: String, ids: Vec<TaskId> },
}

fn join_ids(ids: &[TaskId]) -> String {
    ids.iter().map(TaskId::as_str).collect::<Vec<_>>().join(", ")
}

/// A stored snapshot that cannot be turned back into a board.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not a valid task list: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("snapshot contains duplicate task id {0}")]
    DuplicateId(TaskId),
}

/// Failure to read or write the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize board: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level error for command handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("board was not saved: {0}")]
    NotSaved(String),
    #[error("failed to create data directory {}: {source}", .path.display())]
    DataDir { path: PathBuf, source: io::Error },
    #[error("no home directory found; pass --db or set KANBAN_DB")]
    NoHome,
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
