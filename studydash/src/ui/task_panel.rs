//! Task list with statistics.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use studydash_core::task::Task;
use studydash_core::timer::format_duration;

use super::theme;
use crate::app::{App, PanelFocus};

const BAR_WIDTH: usize = 10;

/// Render the task panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::Tasks;

    let block = Block::default()
        .title(Span::styled(
            format!("Tasks ({} / sort: {})", app.filter, app.sort),
            theme::panel_title(theme::TASKS_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let visible = app.visible_tasks();
    if visible.is_empty() {
        let hint = if app.tasks.is_empty() {
            "No tasks yet. Press 'a' to add one."
        } else {
            "No tasks match this filter."
        };
        frame.render_widget(Paragraph::new(Span::styled(hint, theme::dimmed())), chunks[0]);
    } else {
        let items: Vec<ListItem> = visible.iter().copied().map(task_item).collect();
        let list = List::new(items).highlight_style(if is_focused {
            theme::selected()
        } else {
            theme::highlighted()
        });
        let mut state = ListState::default().with_selected(Some(app.selected_task));
        frame.render_stateful_widget(list, chunks[0], &mut state);
    }

    let stats = app.tasks.stats();
    let summary = format!(
        "Total {}  Completed {}  Pending {}  Avg progress {}%",
        stats.total, stats.completed, stats.pending, stats.average_progress
    );
    frame.render_widget(
        Paragraph::new(Span::styled(summary, theme::dimmed())),
        chunks[1],
    );
}

fn task_item(task: &Task) -> ListItem<'static> {
    let checkbox = if task.is_completed { "[✓]" } else { "[ ]" };
    let style = if task.is_completed {
        theme::dimmed()
    } else {
        theme::normal()
    };

    let mut spans = vec![
        Span::styled(checkbox, style),
        Span::raw(" "),
        Span::styled(task.name.clone(), style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", task.priority),
            theme::normal().fg(theme::priority_color(task.priority)),
        ),
    ];
    if task.is_active {
        spans.push(Span::styled(" ● active", theme::normal().fg(theme::SUCCESS)));
    }

    let details = Line::from(vec![
        Span::raw("    "),
        Span::styled(progress_bar(task.progress), theme::normal().fg(theme::HIGHLIGHT)),
        Span::styled(
            format!(
                " {:>3}%  {} spent / {} min expected",
                task.progress,
                format_duration(task.actual_time),
                task.expected_time
            ),
            theme::dimmed(),
        ),
    ]);

    ListItem::new(vec![Line::from(spans), details])
}

/// Renders `progress` percent as a fixed-width bar.
fn progress_bar(progress: u8) -> String {
    let filled = (usize::from(progress) * BAR_WIDTH + 50) / 100;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
