use crate::app::AppState;
use crate::domain::{Phase, TimerStatus};
use crate::ui::styles::{
    border_style, default_style, gauge_style, hint_style, paused_style, running_style,
    title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the countdown for the bound task
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let appearance = app.appearance;
    let focus = app.session.focus();
    let Some(index) = app.session.bound_index() else {
        return;
    };
    let task_text = app.session.tasks()[index].text.clone();
    let phase = focus.phase();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .style(default_style(appearance))
        .title(Span::styled(
            format!(" {} ", phase.heading()),
            title_style(appearance),
        ));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Task text
            Constraint::Length(1), // Countdown
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Controls
        ])
        .split(block.inner(area));

    f.render_widget(block, area);

    f.render_widget(
        Paragraph::new(Line::raw(task_text)).alignment(Alignment::Center),
        chunks[0],
    );

    let clock_style = if focus.is_running() {
        running_style()
    } else {
        paused_style()
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(focus.format_remaining(), clock_style)))
            .alignment(Alignment::Center),
        chunks[1],
    );

    let gauge = Gauge::default()
        .gauge_style(gauge_style(phase == Phase::Break))
        .ratio(focus.progress().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[2]);

    f.render_widget(
        Paragraph::new(controls_line(app.session.status()))
            .style(hint_style())
            .alignment(Alignment::Center),
        chunks[3],
    );
}

/// Pause/Resume label follows the running flag
fn controls_line(status: TimerStatus) -> Line<'static> {
    let toggle = if status.is_running() {
        "[p] Pause"
    } else {
        "[p] Resume"
    };
    Line::from(vec![Span::raw(toggle), Span::raw("   [s] Stop")])
}
