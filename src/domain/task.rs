use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a task, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry in the task list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Older entries were written without an id; they get a fresh one on load
    #[serde(default)]
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
    /// Completed work cycles recorded against this task
    #[serde(default)]
    pub pomodoros: u32,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            id: TaskId::new(),
            text,
            completed: false,
            created_at: Local::now(),
            completed_at: None,
            pomodoros: 0,
        }
    }

    /// Flip completion, stamping or clearing `completed_at`
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        self.completed_at = if self.completed {
            Some(Local::now())
        } else {
            None
        };
    }

    pub fn record_pomodoro(&mut self) {
        self.pomodoros = self.pomodoros.saturating_add(1);
    }
}
