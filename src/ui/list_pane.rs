use crate::app::AppState;
use crate::domain::{checkbox, task_label, timestamps_line, Task, TimerStatus};
use crate::ui::styles::{
    border_style, bound_style, completed_style, default_style, paused_style, running_style,
    selected_style, timestamp_style, title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// How the timer relates to one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowTimer {
    None,
    Running,
    Paused,
}

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let appearance = app.appearance;
    let bound = app.session.bound_index();
    let status = app.session.status();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .style(default_style(appearance))
        .title(Span::styled(" Tasks 🍅 ", title_style(appearance)));

    if app.session.tasks().is_empty() {
        let empty = Paragraph::new(Line::raw("  No tasks yet. Press 'a' to add one."))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .session
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let timer = match (bound == Some(idx), status) {
                (true, TimerStatus::Running(_)) => RowTimer::Running,
                (true, TimerStatus::Paused(_)) => RowTimer::Paused,
                _ => RowTimer::None,
            };
            let lines = create_task_lines(task, timer, app.config.show_timestamps);

            let style = if idx == app.selected_index {
                selected_style(appearance)
            } else if timer != RowTimer::None {
                bound_style(appearance)
            } else {
                default_style(appearance)
            };

            ListItem::new(lines).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Lines for one task
/// Format: [x] Write report (2 🍅) ▶
///             Added: 2024-05-01 09:00, Completed: 2024-05-01 11:30
fn create_task_lines(task: &Task, timer: RowTimer, show_timestamps: bool) -> Vec<Line<'static>> {
    let mut spans = vec![Span::raw(format!("{} ", checkbox(task.completed)))];

    let text_style = if task.completed {
        completed_style()
    } else {
        Style::default()
    };
    spans.push(Span::styled(task_label(task), text_style));

    match timer {
        RowTimer::Running => spans.push(Span::styled(" ▶", running_style())),
        RowTimer::Paused => spans.push(Span::styled(" ⏸", paused_style())),
        RowTimer::None => {}
    }

    let mut lines = vec![Line::from(spans)];
    if show_timestamps {
        lines.push(Line::from(Span::styled(
            format!("    {}", timestamps_line(task)),
            timestamp_style(),
        )));
    }
    lines
}
