pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_alert_modal, render_confirm_switch_modal};
use ratatui::Frame;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.session.bound_index().is_some());

    render_keybindings(f, layout.keybindings_area);

    if let Some(timer_area) = layout.timer_area {
        render_timer_pane(f, app, timer_area);
    }
    render_list_pane(f, app, layout.list_area);

    // Phase alert takes precedence
    if app.alert.is_some() {
        render_alert_modal(f, app, size);
        return;
    }

    render_confirm_switch_modal(f, app, size);

    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Storage;
    use crate::config::Config;
    use crate::domain::Appearance;
    use crate::persistence::MemoryStore;
    use crate::session::Session;
    use crate::store::TaskStore;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn create_test_app() -> AppState {
        let storage: Storage = Box::new(MemoryStore::new());
        let mut session = Session::new(TaskStore::new(storage));
        session.add("Write report").unwrap();
        let config = Config {
            notifications: false,
            show_timestamps: false,
            ..Config::default()
        };
        AppState::new(session, config, Appearance::Dark)
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    fn draw(app: &AppState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_render_idle() {
        let app = create_test_app();
        let screen = draw(&app);

        assert!(screen.contains("Write report"));
        assert!(!screen.contains("Working on task"));
    }

    #[test]
    fn test_render_running_timer() {
        let mut app = create_test_app();
        app.start_selected();
        let screen = draw(&app);

        assert!(screen.contains("Working on task"));
        assert!(screen.contains("25:00"));
        assert!(screen.contains("Pause"));
    }

    #[test]
    fn test_render_alert() {
        let mut app = create_test_app();
        app.alert = Some("Break is over! Back to work.".to_string());
        let screen = draw(&app);

        assert!(screen.contains("Break is over!"));
    }
}
