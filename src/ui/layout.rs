use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the timer panel, borders included
const TIMER_HEIGHT: u16 = 7;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
    pub timer_area: Option<Rect>,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Timer panel (only while a task is bound)
/// - Task list fills the rest
pub fn create_layout(area: Rect, show_timer: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let keybindings_area = main_chunks[0];
    let content_area = main_chunks[1];

    if !show_timer {
        return MainLayout {
            keybindings_area,
            list_area: content_area,
            timer_area: None,
        };
    }

    let vertical_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TIMER_HEIGHT),
            Constraint::Min(0),
        ])
        .split(content_area);

    MainLayout {
        keybindings_area,
        timer_area: Some(vertical_split[0]),
        list_area: vertical_split[1],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);

        let layout = create_layout(area, false);
        assert_eq!(layout.keybindings_area.height, 1);
        assert!(layout.timer_area.is_none());
        assert_eq!(layout.list_area.height, 49);

        let with_timer = create_layout(area, true);
        assert_eq!(with_timer.timer_area.map(|r| r.height), Some(TIMER_HEIGHT));
        assert_eq!(with_timer.list_area.height, 49 - TIMER_HEIGHT);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 9);
    }
}
