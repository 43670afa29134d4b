//! Interaction state for a board being worked on.
//!
//! A `Session` owns the board, the store it is mirrored to and the two small
//! state machines that drive the UI: the drag slot (`DragState`) and the
//! board-wide edit slot (`EditState`). Every successful mutation is written
//! through to the store immediately. A failed write is logged and remembered
//! for display; the in-memory board is kept as is.

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::db::{load_board, save_board, SnapshotStore};
use crate::error::{BoardError, StoreError};
use crate::fields::Status;
use crate::task::{Task, TaskId};

/// Scratch copy of the editable fields of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub tag: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, tag: impl Into<String>) -> Self {
        TaskDraft {
            title: title.into(),
            description: description.into(),
            tag: tag.into(),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        TaskDraft::new(task.title.clone(), task.description.clone(), task.tag.clone())
    }

    fn tag(&self) -> Option<&str> {
        Some(self.tag.as_str()).filter(|t| !t.trim().is_empty())
    }
}

/// Which task, if any, is being carried between columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(TaskId),
}

/// Which task, if any, is open in the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing { id: TaskId, draft: TaskDraft },
}

/// What a column says when a dragged card hovers over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    Move,
}

pub struct Session<S: SnapshotStore> {
    board: Board,
    store: S,
    drag: DragState,
    edit: EditState,
    save_error: Option<String>,
}

impl<S: SnapshotStore> Session<S> {
    /// Load the stored board (or the seed set) and start with no drag or edit.
    pub fn open(store: S) -> Self {
        let board = load_board(&store);
        Session {
            board,
            store,
            drag: DragState::Idle,
            edit: EditState::Viewing,
            save_error: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Message from the last failed write, cleared by the next good one.
    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    pub fn editing_id(&self) -> Option<&TaskId> {
        match &self.edit {
            EditState::Editing { id, .. } => Some(id),
            EditState::Viewing => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut TaskDraft> {
        match &mut self.edit {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Viewing => None,
        }
    }

    pub fn add(&mut self, draft: &TaskDraft) -> Result<TaskId, BoardError> {
        let id = self.board.add(&draft.title, &draft.description, draft.tag())?;
        info!(%id, "added task");
        self.persist();
        Ok(id)
    }

    /// Direct edit that bypasses the edit slot.
    pub fn edit(&mut self, id: &TaskId, draft: &TaskDraft) -> Result<(), BoardError> {
        self.board.edit(id, &draft.title, &draft.description, draft.tag())?;
        info!(%id, "edited task");
        self.persist();
        Ok(())
    }

    pub fn move_task(&mut self, id: &TaskId, status: Status) -> bool {
        if !self.board.move_task(id, status) {
            debug!(%id, "move ignored, no such task");
            return false;
        }
        info!(%id, %status, "moved task");
        self.persist();
        true
    }

    /// Delete a task. Any drag or edit on it ends with it.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let removed = self.board.remove(id)?;
        if self.editing_id() == Some(id) {
            self.edit = EditState::Viewing;
        }
        if self.drag == DragState::Dragging(id.clone()) {
            self.drag = DragState::Idle;
        }
        info!(%id, "removed task");
        self.persist();
        Some(removed)
    }

    /// Replace the whole board, e.g. to restore the seed set.
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.drag = DragState::Idle;
        self.edit = EditState::Viewing;
        self.persist();
    }

    /// A task open in the edit form cannot be picked up.
    pub fn is_draggable(&self, id: &TaskId) -> bool {
        self.editing_id() != Some(id)
    }

    /// Pick up a task. The latest drag start replaces any earlier one.
    pub fn drag_start(&mut self, id: &TaskId) -> bool {
        if !self.is_draggable(id) {
            debug!(%id, "drag refused, task is being edited");
            return false;
        }
        self.drag = DragState::Dragging(id.clone());
        true
    }

    /// Columns always accept a hovering card.
    pub fn drag_over(&self, _status: Status) -> DropEffect {
        DropEffect::Move
    }

    /// Drop the carried task on a column. Returns whether a task moved.
    pub fn drop_on(&mut self, status: Status) -> bool {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging(id) => self.move_task(&id, status),
            DragState::Idle => false,
        }
    }

    pub fn drag_cancel(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Open a task in the edit form with a copy of its current fields.
    ///
    /// An edit already open on another task is dropped along with its
    /// unsaved changes.
    pub fn start_edit(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.board.get(id) else {
            return false;
        };
        let draft = TaskDraft::from_task(task);
        if let Some(previous) = self.editing_id() {
            if previous != id {
                debug!(from = %previous, to = %id, "switching edit, unsaved changes dropped");
            }
        }
        if self.drag == DragState::Dragging(id.clone()) {
            self.drag = DragState::Idle;
        }
        self.edit = EditState::Editing { id: id.clone(), draft };
        true
    }

    /// Commit the draft. A blank title or description keeps the form open.
    pub fn save_edit(&mut self) -> Result<(), BoardError> {
        let EditState::Editing { id, draft } = &self.edit else {
            return Ok(());
        };
        match self.board.edit(id, &draft.title, &draft.description, draft.tag()) {
            Ok(()) => {
                info!(%id, "edited task");
                self.edit = EditState::Viewing;
                self.persist();
                Ok(())
            }
            Err(e @ BoardError::UnknownTask(_)) => {
                self.edit = EditState::Viewing;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Viewing;
    }

    /// Write the board through and propagate a failure to the caller.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let result = save_board(&mut self.store, &self.board);
        self.save_error = result.as_ref().err().map(ToString::to_string);
        result
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            warn!(error = %e, "board change kept in memory only");
        }
    }
}
