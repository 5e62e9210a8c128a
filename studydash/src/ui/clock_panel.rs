//! Current time and date.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;

/// Render the wall clock.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(app.clock_time(), theme::bold())),
        Line::from(Span::styled(app.clock_date(), theme::dimmed())),
    ];

    let block = Block::default()
        .title(Span::styled(
            "Current Time",
            theme::panel_title(theme::CLOCK_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
