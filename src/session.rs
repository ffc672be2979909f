//! Ties the task list to the focus timer.
//!
//! `Session` is the only place both are mutated together: deleting the bound
//! task stops the timer in the same step, and finished work cycles are
//! counted against the bound task. Counting a cycle never writes to storage;
//! callers `flush` after the tick step.

use crate::domain::{Task, TaskId, TimerStatus};
use crate::focus::{FocusController, PhaseCompletion, StartOutcome};
use crate::notifications::{Confirm, Notifier};
use crate::persistence::KeyValueStore;
use crate::store::{TaskError, TaskStore};

pub struct Session<S: KeyValueStore> {
    store: TaskStore<S>,
    focus: FocusController,
}

impl<S: KeyValueStore> Session<S> {
    /// The timer always starts idle, whatever the previous run left behind
    pub fn new(store: TaskStore<S>) -> Self {
        Self {
            store,
            focus: FocusController::new(),
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.store.storage_mut()
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    pub fn status(&self) -> TimerStatus {
        self.focus.status()
    }

    /// Current row of the bound task
    pub fn bound_index(&self) -> Option<usize> {
        self.focus.bound().and_then(|id| self.store.index_of(id))
    }

    pub fn add(&mut self, text: &str) -> Result<TaskId, TaskError> {
        self.store.add(text)
    }

    pub fn edit(&mut self, index: usize, new_text: &str) -> Result<(), TaskError> {
        self.store.edit(index, new_text)
    }

    pub fn toggle_completed(&mut self, index: usize) -> Result<(), TaskError> {
        self.store.toggle_completed(index)
    }

    /// Remove a task, stopping the timer first if it was bound to it
    pub fn delete(&mut self, index: usize) -> Result<Task, TaskError> {
        let id = self
            .store
            .get(index)
            .map(|task| task.id)
            .ok_or(TaskError::IndexOutOfRange {
                index,
                len: self.store.len(),
            })?;

        if self.focus.is_bound_to(id) {
            self.focus.reset();
        }
        self.store.delete(index)
    }

    /// Whether starting the task at `index` would need the user's go-ahead
    pub fn needs_confirmation(&self, index: usize) -> bool {
        self.store
            .get(index)
            .is_some_and(|task| self.focus.needs_confirmation(task.id))
    }

    /// Start a work phase on the task at `index`
    pub fn start(
        &mut self,
        index: usize,
        confirm: &mut dyn Confirm,
    ) -> Result<StartOutcome, TaskError> {
        let id = self
            .store
            .get(index)
            .map(|task| task.id)
            .ok_or(TaskError::IndexOutOfRange {
                index,
                len: self.store.len(),
            })?;
        Ok(self.focus.start(id, confirm))
    }

    pub fn toggle_pause(&mut self) {
        self.focus.toggle_pause();
    }

    pub fn reset(&mut self) {
        self.focus.reset();
    }

    /// One tick of the timer; a completed phase is signalled through `notifier`
    pub fn advance(&mut self, notifier: &dyn Notifier) -> Option<PhaseCompletion> {
        let completion = self.focus.advance(&mut self.store)?;
        if let PhaseCompletion::WorkDone {
            task,
            recorded: false,
        } = completion
        {
            tracing::warn!(%task, "finished a cycle for a task that no longer exists");
        }
        notifier.notify(completion.message());
        Some(completion)
    }

    /// Write out counts held back by `advance`. Failures are logged and retried on the next call.
    pub fn flush(&mut self) {
        if let Err(e) = self.store.flush() {
            tracing::warn!(error = %e, "could not save tasks");
        }
    }
}
