//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, InputMode, PanelFocus};

/// Context help for the current focus and mode.
#[must_use]
pub fn help_text(app: &App) -> &'static str {
    match (&app.mode, app.focus) {
        (InputMode::AddTask(_) | InputMode::AddMaterial(_), _) => {
            "Enter: save | Tab/↑↓: next field | ←→: priority | Esc: cancel"
        }
        (InputMode::Rename(_), _) => "Enter: save | Esc: cancel",
        (InputMode::Normal, _) if app.dragging.is_some() => {
            "↑↓/jk: choose position | m/Enter: drop | Esc: cancel move"
        }
        (InputMode::Normal, PanelFocus::Tasks) => {
            "a: add | Enter: start/stop | x: done | +/-: progress | e: rename | d: delete | f: filter | o: sort | Tab: materials | q: quit"
        }
        (InputMode::Normal, PanelFocus::Materials) => {
            "a: add | Enter: open | m: move | e: rename | d: delete | Tab: tasks | q: quit"
        }
    }
}

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (dot_color, status_text) = if app.timer.is_running() {
        (theme::SUCCESS, "Timing")
    } else {
        (theme::FG_SECONDARY, "Idle")
    };

    let status_line = Line::from(vec![
        Span::styled(
            concat!("StudyDash v", env!("CARGO_PKG_VERSION")),
            theme::bold(),
        ),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {status_text}")),
        Span::raw(" | "),
        Span::styled(help_text(app), theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
