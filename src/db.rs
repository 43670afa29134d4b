//! Snapshot persistence for the board.
//!
//! The board is stored as one serialized snapshot under a single storage key.
//! Loading never fails from the caller's point of view: a missing or unusable
//! snapshot yields the seed board. Saving returns a `Result` so callers can
//! log a failed write, but the in-memory board stays authoritative either way.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::{SnapshotError, StoreError};
use crate::seed::seed_board;
use crate::task::Task;

/// Storage key the board is kept under.
pub const STORAGE_KEY: &str = "kanban-tasks";

/// Opaque key/value store holding one serialized snapshot.
pub trait SnapshotStore {
    /// Read the stored snapshot, `None` when nothing has been stored yet.
    fn load(&self) -> io::Result<Option<String>>;
    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &str) -> io::Result<()>;
}

/// Snapshot kept in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> io::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path).map(Some)
    }

    /// Atomic-ish write via temp file + rename.
    fn save(&mut self, snapshot: &str) -> io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let written = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(snapshot.as_bytes())?;
                f.flush()
            })
            .and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        Ok(())
    }
}

/// In-process store for tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub snapshot: Option<String>,
    pub fail_writes: bool,
    pub writes: usize,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        MemoryStore {
            snapshot: Some(snapshot.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl SnapshotStore for MemoryStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::Other, "quota exceeded"));
        }
        self.snapshot = Some(snapshot.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Serialize the full collection.
pub fn to_snapshot(board: &Board) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(board.tasks())?)
}

/// Parse a snapshot back into a board.
pub fn from_snapshot(snapshot: &str) -> Result<Board, SnapshotError> {
    let tasks: Vec<Task> = serde_json::from_str(snapshot)?;
    Board::from_tasks(tasks)
}

/// Load the stored board, falling back to the seed set when the snapshot is
/// absent, unreadable or malformed.
pub fn load_board<S: SnapshotStore + ?Sized>(store: &S) -> Board {
    match store.load() {
        Ok(Some(snapshot)) => match from_snapshot(&snapshot) {
            Ok(board) => {
                info!(tasks = board.len(), "loaded stored board");
                board
            }
            Err(e) => {
                warn!(error = %e, "error parsing stored board, using seed tasks");
                seed_board()
            }
        },
        Ok(None) => {
            debug!("no stored board, using seed tasks");
            seed_board()
        }
        Err(e) => {
            warn!(error = %e, "error reading stored board, using seed tasks");
            seed_board()
        }
    }
}

/// Overwrite the stored snapshot with the full board.
pub fn save_board<S: SnapshotStore + ?Sized>(store: &mut S, board: &Board) -> Result<(), StoreError> {
    let snapshot = to_snapshot(board)?;
    store.save(&snapshot)?;
    debug!(tasks = board.len(), bytes = snapshot.len(), "saved board");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Status;
    use crate::seed::seed_tasks;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_reproduces_board() {
        let mut board = seed_board();
        let id = board.add("Write tests", "cover core logic", Some("QA")).unwrap();
        board.move_task(&id, Status::Inprogress);

        let mut store = MemoryStore::default();
        save_board(&mut store, &board).unwrap();
        let loaded = load_board(&store);

        assert_eq!(loaded.tasks(), board.tasks());
    }

    #[test]
    fn absent_snapshot_yields_seed() {
        let store = MemoryStore::default();
        assert_eq!(load_board(&store).tasks(), seed_tasks().as_slice());
    }

    #[rstest]
    #[case("not json")]
    #[case("{\"id\":\"1\"}")]
    #[case("[{\"id\":\"1\",\"title\":\"t\",\"description\":\"d\",\"status\":\"blocked\"}]")]
    #[case("[{\"id\":\"1\",\"title\":\"t\",\"description\":\"d\",\"status\":\"todo\",\"tagColor\":\"bg-black\"}]")]
    fn malformed_snapshot_yields_seed(#[case] snapshot: &str) {
        let store = MemoryStore::with_snapshot(snapshot);
        assert_eq!(load_board(&store).tasks(), seed_tasks().as_slice());
    }

    #[test]
    fn duplicate_ids_in_snapshot_yield_seed() {
        let mut tasks = seed_tasks();
        tasks[1].id = tasks[0].id.clone();
        let store = MemoryStore::with_snapshot(serde_json::to_string(&tasks).unwrap());
        assert_eq!(load_board(&store).tasks(), seed_tasks().as_slice());
    }

    #[test]
    fn empty_list_is_a_valid_snapshot() {
        let store = MemoryStore::with_snapshot("[]");
        assert!(load_board(&store).is_empty());
    }

    #[test]
    fn failed_write_is_reported() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        assert!(matches!(save_board(&mut store, &seed_board()), Err(StoreError::Io(_))));
        assert!(store.snapshot.is_none());
    }

    #[test]
    fn unreadable_board_file_falls_back_to_seed() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.load().is_err());
        assert_eq!(load_board(&store).tasks(), seed_tasks().as_slice());
    }

    #[test]
    fn failed_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("board.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let mut store = FileStore::new(&target);
        assert!(store.save("[]").is_err());
        assert!(!dir.path().join("board.json.tmp").exists());
        assert!(target.join("keep").exists());
    }

    #[test]
    fn file_store_round_trips_and_overwrites() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join(format!("{STORAGE_KEY}.json")));
        assert!(store.load().unwrap().is_none());

        let mut board = seed_board();
        save_board(&mut store, &board).unwrap();
        let id = board.tasks()[0].id.clone();
        board.remove(&id);
        save_board(&mut store, &board).unwrap();

        assert_eq!(load_board(&store).tasks(), board.tasks());
        assert!(!dir.path().join("kanban-tasks.json.tmp").exists());
    }

    #[test]
    fn snapshot_is_a_plain_task_array() {
        let snapshot = to_snapshot(&seed_board()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["id"], "1");
        assert_eq!(first["status"], "todo");
        assert_eq!(first["tag"], "Design");
        assert_eq!(first["tagColor"], "bg-purple-500");
    }
}
