//! Terminal UI rendering.

pub mod clock_panel;
pub mod form_popup;
pub mod materials_panel;
pub mod status_bar;
pub mod task_panel;
pub mod theme;
pub mod timer_panel;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::{App, InputMode};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Header, banner, lists, status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Tasks
            Constraint::Percentage(40), // Materials
        ])
        .split(rows[2]);

    clock_panel::render(frame, header[0], app);
    timer_panel::render(frame, header[1], app);
    timer_panel::render_banner(frame, rows[1], app);
    task_panel::render(frame, lists[0], app);
    materials_panel::render(frame, lists[1], app);
    status_bar::render(frame, rows[3], app);

    if app.mode != InputMode::Normal {
        form_popup::render(frame, app);
    }
}
