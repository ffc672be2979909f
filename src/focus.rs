//! The single work/break countdown and its binding to one task.

use crate::domain::{format_clock, progress_fraction, Phase, TaskId, TimerStatus};
use crate::notifications::Confirm;
use crate::store::CycleSink;

/// Question asked before moving the timer to a different task
pub const SWITCH_PROMPT: &str = "A timer is already running for another task. Switch?";

/// Emitted when a countdown reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseCompletion {
    /// A work phase finished; `recorded` is false if the task no longer existed
    WorkDone { task: TaskId, recorded: bool },
    BreakOver,
}

impl PhaseCompletion {
    /// Text of the completion signal
    pub fn message(&self) -> &'static str {
        match self {
            Self::WorkDone { .. } => "Focus cycle complete! Time for a break.",
            Self::BreakOver => "Break is over! Back to work.",
        }
    }
}

/// Result of asking the controller to start on a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Moved away from another bound task after confirmation
    Switched { from: TaskId },
    /// The user kept the current binding; nothing changed
    Declined,
}

/// Timer state. Idle means unbound and stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusController {
    bound: Option<TaskId>,
    phase: Phase,
    remaining_secs: u32,
    running: bool,
}

impl Default for FocusController {
    fn default() -> Self {
        Self {
            bound: None,
            phase: Phase::Work,
            remaining_secs: Phase::Work.duration_secs(),
            running: false,
        }
    }
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound(&self) -> Option<TaskId> {
        self.bound
    }

    pub fn is_bound_to(&self, id: TaskId) -> bool {
        self.bound == Some(id)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> TimerStatus {
        match (self.bound, self.running) {
            (None, _) => TimerStatus::Idle,
            (Some(_), true) => TimerStatus::Running(self.phase),
            (Some(_), false) => TimerStatus::Paused(self.phase),
        }
    }

    /// Whether starting on `id` would take the timer away from another task.
    /// Binding presence decides this, paused or not.
    pub fn needs_confirmation(&self, id: TaskId) -> bool {
        matches!(self.bound, Some(current) if current != id)
    }

    /// Begin a fresh work phase on `id`
    pub fn start(&mut self, id: TaskId, confirm: &mut dyn Confirm) -> StartOutcome {
        let previous = self.bound;
        if self.needs_confirmation(id) && !confirm.confirm(SWITCH_PROMPT) {
            tracing::debug!(task = %id, "switch declined");
            return StartOutcome::Declined;
        }

        self.bound = Some(id);
        self.phase = Phase::Work;
        self.remaining_secs = Phase::Work.duration_secs();
        self.running = true;

        match previous {
            Some(from) if from != id => {
                tracing::info!(%from, to = %id, "focus switched");
                StartOutcome::Switched { from }
            }
            _ => {
                tracing::info!(task = %id, "focus started");
                StartOutcome::Started
            }
        }
    }

    pub fn pause(&mut self) {
        if self.bound.is_some() && self.running {
            self.running = false;
            tracing::debug!(remaining = self.remaining_secs, "focus paused");
        }
    }

    pub fn resume(&mut self) {
        if self.bound.is_some() && !self.running {
            self.running = true;
            tracing::debug!(remaining = self.remaining_secs, "focus resumed");
        }
    }

    /// Pause when running, resume when paused
    pub fn toggle_pause(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Back to idle: stopped, unbound, a full work phase loaded
    pub fn reset(&mut self) {
        if self.bound.is_some() {
            tracing::info!("focus reset");
        }
        *self = Self::default();
    }

    /// Advance the countdown by one second.
    ///
    /// Reaching zero completes the phase in the same call: a work phase is
    /// recorded against the bound task, then the phase flips, the countdown
    /// reloads and the timer keeps running.
    pub fn advance(&mut self, sink: &mut dyn CycleSink) -> Option<PhaseCompletion> {
        if !self.running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let completion = match (self.phase, self.bound) {
            (Phase::Work, Some(task)) => {
                let recorded = sink.record_cycle_completion(task);
                PhaseCompletion::WorkDone { task, recorded }
            }
            _ => PhaseCompletion::BreakOver,
        };

        self.phase = self.phase.next();
        self.remaining_secs = self.phase.duration_secs();
        tracing::info!(next = ?self.phase, "phase complete");

        Some(completion)
    }

    /// Elapsed share of the current phase
    pub fn progress(&self) -> f64 {
        progress_fraction(self.phase.duration_secs(), self.remaining_secs)
    }

    pub fn format_remaining(&self) -> String {
        format_clock(self.remaining_secs)
    }
}
