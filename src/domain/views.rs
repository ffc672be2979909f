use super::task::Task;
use chrono::{DateTime, Local};

/// Format a countdown as "MM:SS"
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Fraction of a phase already elapsed (0.0 up to, but not including, 1.0 while counting)
pub fn progress_fraction(duration_secs: u32, remaining_secs: u32) -> f64 {
    if duration_secs == 0 {
        return 1.0;
    }
    let elapsed = duration_secs.saturating_sub(remaining_secs) as f64;
    elapsed / duration_secs as f64
}

/// Cycle count suffix shown after a task's text, empty when no cycles yet
pub fn pomodoro_badge(count: u32) -> String {
    if count == 0 {
        String::new()
    } else {
        format!("({} 🍅)", count)
    }
}

/// Checkbox glyph for a task row
pub fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

fn format_timestamp(time: DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// Secondary line: "Added: ..." plus ", Completed: ..." when done
pub fn timestamps_line(task: &Task) -> String {
    let mut line = format!("Added: {}", format_timestamp(task.created_at));
    if let Some(done) = task.completed_at {
        line.push_str(&format!(", Completed: {}", format_timestamp(done)));
    }
    line
}

/// Primary line: text plus cycle badge
pub fn task_label(task: &Task) -> String {
    let badge = pomodoro_badge(task.pomodoros);
    if badge.is_empty() {
        task.text.clone()
    } else {
        format!("{} {}", task.text, badge)
    }
}
