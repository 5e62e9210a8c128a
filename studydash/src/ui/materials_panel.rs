//! Study materials list.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use studydash_core::material::{favicon_url, host_of};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the materials panel: the list plus details of the selection.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Materials;

    let block = Block::default()
        .title(Span::styled(
            "Study Materials",
            theme::panel_title(theme::MATERIALS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(inner);

    let items: Vec<ListItem> = app
        .materials
        .materials()
        .iter()
        .map(|material| {
            let host = host_of(&material.url).unwrap_or_default();
            let mut spans = vec![Span::styled(material.title.clone(), theme::normal())];
            if !host.is_empty() {
                spans.push(Span::styled(format!("  {host}"), theme::dimmed()));
            }
            let item = ListItem::new(Line::from(spans));
            if app.dragging.as_deref() == Some(material.id.as_str()) {
                item.style(theme::dragging())
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).highlight_style(if is_focused {
        theme::selected()
    } else {
        theme::highlighted()
    });
    let mut state = ListState::default().with_selected(Some(app.selected_material));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    if let Some(material) = app.selected_material() {
        let mut lines = vec![Line::from(Span::styled(material.url.clone(), theme::dimmed()))];
        if let Some(description) = &material.description {
            lines.push(Line::from(Span::raw(description.clone())));
        }
        lines.push(Line::from(Span::styled(
            favicon_url(&material.url),
            theme::dimmed(),
        )));
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }),
            chunks[1],
        );
    }
}
