//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};
use studydash_core::task::Priority;

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for focused elements.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Running timer and completed task color.
pub const SUCCESS: Color = Color::Green;

/// Paused timer color.
pub const WARNING: Color = Color::Yellow;

/// Form error color.
pub const ERROR: Color = Color::Red;

/// Panel title color for the clock panel.
pub const CLOCK_TITLE: Color = Color::Blue;

/// Panel title color for the timer panel.
pub const TIMER_TITLE: Color = Color::Magenta;

/// Panel title color for the tasks panel.
pub const TASKS_TITLE: Color = Color::Green;

/// Panel title color for the materials panel.
pub const MATERIALS_TITLE: Color = Color::LightBlue;

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (metadata, hints).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Highlighted text style (focused panel borders).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Selected item style (in lists).
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for a material that has been picked up for a move.
#[must_use]
pub fn dragging() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(WARNING)
        .add_modifier(Modifier::BOLD)
}

/// Style for the big stopwatch digits.
#[must_use]
pub fn timer_digits(running: bool) -> Style {
    Style::default()
        .fg(if running { SUCCESS } else { FG_PRIMARY })
        .add_modifier(Modifier::BOLD)
}

/// Badge color for a task priority.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Style for the input cursor (bright white, bold).
#[must_use]
pub fn input_cursor() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

/// Style for form errors.
#[must_use]
pub fn error() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::ITALIC)
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Style for panel titles with a given color (bold).
#[must_use]
pub fn panel_title(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Border style for a panel, highlighted when focused.
#[must_use]
pub fn border(focused: bool) -> Style {
    if focused { highlighted() } else { normal() }
}
