use serde::{Deserialize, Serialize};

/// Seconds in a work phase (25 minutes)
pub const WORK_SECS: u32 = 25 * 60;
/// Seconds in a break phase (5 minutes)
pub const BREAK_SECS: u32 = 5 * 60;

/// Phase of a focus cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// Countdown length for this phase
    pub fn duration_secs(&self) -> u32 {
        match self {
            Self::Work => WORK_SECS,
            Self::Break => BREAK_SECS,
        }
    }

    /// The phase that follows this one
    pub fn next(&self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    /// Heading shown above the countdown
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Work => "Working on task",
            Self::Break => "Break",
        }
    }
}

/// Observable status of the focus controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running(Phase),
    Paused(Phase),
}

impl TimerStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }
}

/// Display appearance (light or dark palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask, // Editing an existing task's text
    ConfirmSwitch, // Asking whether to move the timer to another task
}
