//! Modal forms drawn over the dashboard.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use studydash_core::task::Priority;

use super::theme;
use crate::app::form::{MaterialField, TaskField};
use crate::app::{App, InputMode, RenameTarget, TextField};

/// Render the open form, if any.
pub fn render(frame: &mut Frame, app: &App) {
    let (title, lines, error) = match &app.mode {
        InputMode::Normal => return,
        InputMode::AddTask(form) => (
            "Add Task",
            vec![
                field_line("Name", &form.name, form.field == TaskField::Name),
                field_line("Minutes", &form.minutes, form.field == TaskField::Minutes),
                priority_line(form.priority, form.field == TaskField::Priority),
            ],
            form.error.as_deref(),
        ),
        InputMode::AddMaterial(form) => (
            "Add Study Material",
            vec![
                field_line("Title", &form.title, form.field == MaterialField::Title),
                field_line("URL", &form.url, form.field == MaterialField::Url),
                field_line(
                    "Description",
                    &form.description,
                    form.field == MaterialField::Description,
                ),
            ],
            form.error.as_deref(),
        ),
        InputMode::Rename(form) => (
            match form.target {
                RenameTarget::Task(_) => "Rename Task",
                RenameTarget::Material(_) => "Rename Material",
            },
            vec![field_line("Name", &form.input, true)],
            form.error.as_deref(),
        ),
    };

    let mut lines = lines;
    if let Some(error) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(error.to_string(), theme::error())));
    }

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(frame.area(), 60, height);

    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::HIGHLIGHT)))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One labelled input, with a cursor drawn when focused.
fn field_line(label: &str, field: &TextField, focused: bool) -> Line<'static> {
    let label_style = if focused { theme::highlighted() } else { theme::dimmed() };
    let mut spans = vec![Span::styled(format!("{label:>12}: "), label_style)];

    if focused {
        let before: String = field.value().chars().take(field.cursor()).collect();
        let mut rest = field.value().chars().skip(field.cursor());
        let at = rest.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = rest.collect();
        spans.push(Span::styled(before, theme::normal()));
        spans.push(Span::styled(at, theme::input_cursor()));
        spans.push(Span::styled(after, theme::normal()));
    } else {
        spans.push(Span::styled(field.value().to_string(), theme::normal()));
    }
    Line::from(spans)
}

fn priority_line(current: Priority, focused: bool) -> Line<'static> {
    let label_style = if focused { theme::highlighted() } else { theme::dimmed() };
    let mut spans = vec![Span::styled(format!("{:>12}: ", "Priority"), label_style)];
    for priority in Priority::ALL {
        let style = if priority == current {
            theme::selected().bg(theme::priority_color(priority))
        } else {
            theme::dimmed()
        };
        spans.push(Span::styled(format!(" {priority} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// A rectangle `percent_x` wide and `height` tall, centered in `area`.
fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
