use crate::domain::Appearance;
use ratatui::style::{Color, Modifier, Style};

/// Base foreground/background for the chosen appearance
pub fn default_style(appearance: Appearance) -> Style {
    match appearance {
        Appearance::Light => Style::default().fg(Color::Black).bg(Color::White),
        Appearance::Dark => Style::default().fg(Color::White).bg(Color::Black),
    }
}

/// Selected row highlight style
pub fn selected_style(appearance: Appearance) -> Style {
    let bg = match appearance {
        Appearance::Light => Color::LightBlue,
        Appearance::Dark => Color::LightCyan,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// Row holding the running or paused timer
pub fn bound_style(appearance: Appearance) -> Style {
    let fg = match appearance {
        Appearance::Light => Color::Red,
        Appearance::Dark => Color::LightRed,
    };
    default_style(appearance).fg(fg).add_modifier(Modifier::BOLD)
}

/// Completed task text
pub fn completed_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Timestamp line under each task
pub fn timestamp_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}

pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Title style for panes
pub fn title_style(appearance: Appearance) -> Style {
    let fg = match appearance {
        Appearance::Light => Color::Blue,
        Appearance::Dark => Color::Cyan,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Countdown gauge; work and break use different colours
pub fn gauge_style(on_break: bool) -> Style {
    let fg = if on_break { Color::Green } else { Color::Red };
    Style::default().fg(fg).bg(Color::DarkGray)
}
