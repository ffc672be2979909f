//! The ordered task list and its write-through persistence.

use crate::domain::{Task, TaskId};
use crate::persistence::{decode_tasks, encode_tasks, KeyValueStore};
use anyhow::Context;
use chrono::Duration;
use thiserror::Error;

/// Storage key for the task sequence
pub const TASKS_KEY: &str = "tasks";

/// Saved task lists expire this long after the last write
pub fn tasks_expiry() -> Duration {
    Duration::days(7)
}

/// Why a task operation did nothing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task text is empty")]
    EmptyText,
    #[error("no task at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Receiver for completed work cycles
pub trait CycleSink {
    /// Count one finished work cycle against a task. Returns false if the task is gone.
    /// Must not touch storage; the caller flushes once the tick step is over.
    fn record_cycle_completion(&mut self, id: TaskId) -> bool;
}

/// Owns the task list; every edit rewrites the full snapshot, cycle
/// completions are held until `flush`
pub struct TaskStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    storage: S,
    /// In-memory list differs from what was last written
    unsaved: bool,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Empty list, nothing read from storage
    #[cfg(test)]
    pub fn new(storage: S) -> Self {
        Self {
            tasks: Vec::new(),
            storage,
            unsaved: false,
        }
    }

    /// Restore the saved list; unreadable or malformed data yields an empty list
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Ok(Some(raw)) => decode_tasks(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "starting with an empty task list");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved tasks");
                Vec::new()
            }
        };

        tracing::debug!(count = tasks.len(), "loaded tasks");
        Self {
            tasks,
            storage,
            unsaved: false,
        }
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

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Current position of a task
    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Whether changes are waiting for a successful write
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Append a task; the text is trimmed and must not be empty
    pub fn add(&mut self, text: &str) -> Result<TaskId, TaskError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }

        let task = Task::new(text.to_string());
        let id = task.id;
        self.tasks.push(task);
        self.persist();
        Ok(id)
    }

    /// Replace a task's text as given. Other fields are untouched.
    pub fn edit(&mut self, index: usize, new_text: &str) -> Result<(), TaskError> {
        let task = self.task_mut(index)?;
        task.text = new_text.to_string();
        self.persist();
        Ok(())
    }

    pub fn toggle_completed(&mut self, index: usize) -> Result<(), TaskError> {
        self.task_mut(index)?.toggle_completed();
        self.persist();
        Ok(())
    }

    /// Remove a task; later tasks shift down by one
    pub fn delete(&mut self, index: usize) -> Result<Task, TaskError> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        self.persist();
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<(), TaskError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TaskError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task, TaskError> {
        self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }

    /// Write the full list if anything changed since the last good write
    pub fn flush(&mut self) -> anyhow::Result<()> {
        if !self.unsaved {
            return Ok(());
        }

        let encoded = encode_tasks(&self.tasks).context("Failed to encode tasks")?;
        self.storage
            .set(TASKS_KEY, &encoded, Some(tasks_expiry()))
            .context("Failed to save tasks")?;
        self.unsaved = false;
        Ok(())
    }

    /// Best-effort write-through after a mutation
    fn persist(&mut self) {
        self.unsaved = true;
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "could not save tasks");
        }
    }
}

impl<S: KeyValueStore> CycleSink for TaskStore<S> {
    fn record_cycle_completion(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.record_pomodoro();
                self.unsaved = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{FileStore, MemoryStore};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn store_with(texts: &[&str]) -> TaskStore<MemoryStore> {
        let mut store = TaskStore::new(MemoryStore::new());
        for text in texts {
            store.add(text).unwrap();
        }
        store
    }

    fn saved_tasks(store: &TaskStore<MemoryStore>) -> Vec<Task> {
        let raw = store.storage().get(TASKS_KEY).unwrap().unwrap();
        decode_tasks(&raw).unwrap()
    }

    #[test]
    fn test_add_trims_and_persists() {
        let mut store = TaskStore::new(MemoryStore::new());
        store.add("  Write report  ").unwrap();

        assert_eq!(store.len(), 1);
        let task = store.get(0).unwrap();
        assert_eq!(task.text, "Write report");
        assert!(!task.completed);
        assert_eq!(task.pomodoros, 0);
        assert_eq!(store.storage().writes(), 1);
        assert_eq!(saved_tasks(&store), store.tasks().to_vec());
    }

    #[test]
    fn test_add_empty_is_rejected_without_write() {
        let mut store = TaskStore::new(MemoryStore::new());

        assert_eq!(store.add(""), Err(TaskError::EmptyText));
        assert_eq!(store.add("   \t"), Err(TaskError::EmptyText));
        assert!(store.is_empty());
        assert_eq!(store.storage().writes(), 0);
    }

    #[test]
    fn test_saved_tasks_expire_in_a_week() {
        let store = store_with(&["a"]);
        let expires = store.storage().expires_at(TASKS_KEY).unwrap();
        let expected = Utc::now() + Duration::days(7);
        assert!((expected - expires).num_seconds().abs() < 5);
    }

    #[test]
    fn test_edit_replaces_text_only() {
        let mut store = store_with(&["Old"]);
        store.toggle_completed(0).unwrap();
        let before = store.get(0).unwrap().clone();

        store.edit(0, "  New text ").unwrap();

        let after = store.get(0).unwrap();
        assert_eq!(after.text, "  New text ");
        assert_eq!(after.id, before.id);
        assert_eq!(after.completed, before.completed);
        assert_eq!(after.completed_at, before.completed_at);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(store.storage().writes(), 3);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut store = store_with(&["a"]);
        let snapshot = store.tasks().to_vec();
        let writes = store.storage().writes();

        assert_eq!(
            store.edit(3, "x"),
            Err(TaskError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert!(store.toggle_completed(1).is_err());
        assert!(store.delete(7).is_err());

        assert_eq!(store.tasks(), snapshot.as_slice());
        assert_eq!(store.storage().writes(), writes);
    }

    #[test]
    fn test_toggle_twice_restores_task() {
        let mut store = store_with(&["a"]);
        let original = store.get(0).unwrap().clone();

        store.toggle_completed(0).unwrap();
        assert!(store.get(0).unwrap().completed);
        assert!(store.get(0).unwrap().completed_at.is_some());

        store.toggle_completed(0).unwrap();
        assert_eq!(store.get(0).unwrap(), &original);
    }

    #[test]
    fn test_delete_shifts_later_tasks() {
        let mut store = store_with(&["a", "b", "c"]);
        let c_id = store.get(2).unwrap().id;

        let removed = store.delete(1).unwrap();

        assert_eq!(removed.text, "b");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().text, "c");
        assert_eq!(store.index_of(c_id), Some(1));
        assert_eq!(saved_tasks(&store).len(), 2);
    }

    #[test]
    fn test_record_cycle_completion() {
        let mut store = store_with(&["a", "b"]);
        let b_id = store.get(1).unwrap().id;

        let writes = store.storage().writes();

        assert!(store.record_cycle_completion(b_id));
        assert!(store.record_cycle_completion(b_id));

        assert_eq!(store.get(0).unwrap().pomodoros, 0);
        assert_eq!(store.get(1).unwrap().pomodoros, 2);

        // Held in memory until flushed
        assert_eq!(store.storage().writes(), writes);
        assert!(store.has_unsaved_changes());
        assert_eq!(saved_tasks(&store)[1].pomodoros, 0);

        store.flush().unwrap();
        assert_eq!(store.storage().writes(), writes + 1);
        assert!(!store.has_unsaved_changes());
        assert_eq!(saved_tasks(&store)[1].pomodoros, 2);

        // Nothing left to write
        store.flush().unwrap();
        assert_eq!(store.storage().writes(), writes + 1);
    }

    #[test]
    fn test_record_cycle_for_missing_task_is_noop() {
        let mut store = store_with(&["a"]);
        let writes = store.storage().writes();

        assert!(!store.record_cycle_completion(TaskId::new()));
        assert_eq!(store.get(0).unwrap().pomodoros, 0);
        assert!(!store.has_unsaved_changes());
        assert_eq!(store.storage().writes(), writes);
    }

    #[test]
    fn test_load_restores_saved_list() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut store = TaskStore::new(FileStore::new(&path));
        store.add("Write report").unwrap();
        store.add("Review PR").unwrap();
        store.toggle_completed(1).unwrap();
        let id = store.get(0).unwrap().id;
        store.record_cycle_completion(id);
        store.flush().unwrap();
        let expected = store.tasks().to_vec();

        let reloaded = TaskStore::load(FileStore::new(&path));
        assert_eq!(reloaded.tasks(), expected.as_slice());
    }

    /// Storage whose writes always fail
    struct FullDisk;

    impl KeyValueStore for FullDisk {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str, _expiry: Option<Duration>) -> anyhow::Result<()> {
            anyhow::bail!("no space left on device")
        }
    }

    #[test]
    fn test_failed_write_is_reported_by_flush() {
        let mut store = TaskStore::new(FullDisk);

        // The mutation itself still succeeds in memory
        store.add("Write report").unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.has_unsaved_changes());

        let err = store.flush().unwrap_err();
        assert!(format!("{:#}", err).contains("no space left on device"));
        assert!(store.has_unsaved_changes());
    }

    #[test]
    fn test_load_malformed_falls_back_to_empty() {
        let mut storage = MemoryStore::new();
        storage.set(TASKS_KEY, "{broken", None).unwrap();

        let store = TaskStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_unreadable_store_falls_back_to_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("store.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = TaskStore::load(FileStore::new(&path));
        assert!(store.is_empty());
    }
}
