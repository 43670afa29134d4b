//! The task store.
//!
//! `Board` owns the ordered task collection and is the only place tasks are
//! created, edited, moved or removed. Every mutation either applies in full or
//! returns an error without touching the collection, so callers can persist
//! after any `Ok` without re-checking state.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use rand::Rng;

use crate::error::{BoardError, SnapshotError};
use crate::fields::{Status, TagColor};
use crate::task::{tag_or_default, Task, TaskId};

/// Ordered collection of tasks plus the id allocator state.
#[derive(Debug, Clone, Default)]
pub struct Board {
    tasks: Vec<Task>,
    last_issued: i64,
}

impl Board {
    /// Build a board from a deserialized snapshot, enforcing id uniqueness.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::new();
        for task in &tasks {
            if !seen.insert(&task.id) {
                return Err(SnapshotError::DuplicateId(task.id.clone()));
            }
        }
        Ok(Board { tasks, last_issued: 0 })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    /// Append a new `todo` task with a random palette colour.
    pub fn add(&mut self, title: &str, description: &str, tag: Option<&str>) -> Result<TaskId, BoardError> {
        self.add_with_rng(&mut rand::thread_rng(), title, description, tag)
    }

    /// Same as [`Board::add`] with a caller-supplied colour source.
    pub fn add_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        title: &str,
        description: &str,
        tag: Option<&str>,
    ) -> Result<TaskId, BoardError> {
        validate(title, description)?;
        let id = self.next_id();
        let tag_color = TagColor::PALETTE[rng.gen_range(0..TagColor::PALETTE.len())];
        self.tasks.push(Task {
            id: id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            status: Status::Todo,
            tag: tag_or_default(tag),
            tag_color,
        });
        Ok(id)
    }

    /// Overwrite title, description and tag. Id, status and colour are kept.
    pub fn edit(&mut self, id: &TaskId, title: &str, description: &str, tag: Option<&str>) -> Result<(), BoardError> {
        validate(title, description)?;
        let task = self
            .get_mut(id)
            .ok_or_else(|| BoardError::UnknownTask(id.clone()))?;
        task.title = title.to_string();
        task.description = description.to_string();
        task.tag = tag_or_default(tag);
        Ok(())
    }

    /// Change a task's status in place. Returns `false` when the id is unknown.
    pub fn move_task(&mut self, id: &TaskId, status: Status) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    /// Remove a task, keeping the relative order of the rest.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| &t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    /// Tasks in one column, in collection order.
    pub fn list_by_status(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Number of tasks per column, indexed by [`Status::column`].
    pub fn counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for task in &self.tasks {
            counts[task.status.column()] += 1;
        }
        counts
    }

    /// Distinct tags with their usage counts.
    pub fn tags(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for task in &self.tasks {
            *counts.entry(task.tag.as_str()).or_default() += 1;
        }
        counts
    }

    /// Resolve a user-supplied identifier: an exact id, or else a unique
    /// case-insensitive title.
    pub fn resolve(&self, identifier: &str) -> Result<TaskId, BoardError> {
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == identifier) {
            return Ok(task.id.clone());
        }
        let wanted = identifier.to_lowercase();
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.title.to_lowercase() == wanted)
            .collect();
        match matches.as_slice() {
            [only] => Ok(only.id.clone()),
            [] => Err(BoardError::UnknownTask(TaskId::new(identifier))),
            many => Err(BoardError::AmbiguousTitle {
                title: identifier.to_string(),
                ids: many.iter().map(|t| t.id.clone()).collect(),
            }),
        }
    }

    /// Timestamp-derived id, strictly greater than any id this board issued
    /// and distinct from every id already present.
    fn next_id(&mut self) -> TaskId {
        let mut candidate = Utc::now().timestamp_millis().max(self.last_issued + 1);
        loop {
            let text = candidate.to_string();
            if !self.tasks.iter().any(|t| t.id.as_str() == text) {
                self.last_issued = candidate;
                return TaskId::new(text);
            }
            candidate += 1;
        }
    }
}

fn validate(title: &str, description: &str) -> Result<(), BoardError> {
    if title.trim().is_empty() {
        return Err(BoardError::BlankTitle);
    }
    if description.trim().is_empty() {
        return Err(BoardError::BlankDescription);
    }
    Ok(())
}
