//! Stopwatch panel and the "currently working on" banner.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;

/// Render the stopwatch.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let running = app.timer.is_running();
    let (dot_color, state) = if running {
        (theme::SUCCESS, "running")
    } else {
        (theme::WARNING, "paused")
    };

    let lines = vec![
        Line::from(Span::styled(
            app.timer.display(),
            theme::timer_digits(running),
        )),
        Line::from(vec![
            Span::styled("●", theme::normal().fg(dot_color)),
            Span::styled(format!(" {state}  s: start/pause  r: reset"), theme::dimmed()),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(
            "Study Timer",
            theme::panel_title(theme::TIMER_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Text for the banner under the stopwatch. Shown whenever the stopwatch
/// carries a label, running or not.
#[must_use]
pub fn banner_text(app: &App) -> String {
    if has_label(app) {
        format!("Currently working on: {}", app.timer.label())
    } else {
        "No active task - Start a timer to begin tracking your study session".to_string()
    }
}

/// Render the banner.
pub fn render_banner(frame: &mut Frame, area: Rect, app: &App) {
    let style = if has_label(app) {
        theme::bold()
    } else {
        theme::dimmed()
    };
    let paragraph = Paragraph::new(Span::styled(banner_text(app), style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn has_label(app: &App) -> bool {
    !app.timer.label().is_empty()
}
