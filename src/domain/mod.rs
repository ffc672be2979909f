pub mod enums;
pub mod task;
pub mod views;

pub use enums::{Appearance, Phase, TimerStatus, UiMode};
pub use task::{Task, TaskId};
pub use views::{checkbox, format_clock, progress_fraction, task_label, timestamps_line};
