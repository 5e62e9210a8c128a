//! Integration tests for the dashboard driven by key presses.
//!
//! # Verification Focus
//!
//! - Task and material forms
//! - Task timers, manual pause and reset stay consistent with the task list
//! - Filter and sort keys
//! - Rendering the full dashboard into a test backend

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use studydash::app::{App, InputMode, PanelFocus};
use studydash::clock::ManualClock;
use studydash::config::DashConfig;
use studydash::store::{InMemoryStore, KvStore};
use studydash::ui;
use studydash::ui::timer_panel::banner_text;
use studydash_core::codec::TIMER_KEY;
use studydash_core::task::{Priority, TaskFilter, TaskSort};

fn make_app() -> (App, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    let app = App::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(clock.clone()),
        &DashConfig::default(),
    );
    (app, clock)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_str(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn add_task(app: &mut App, name: &str, minutes: &str) {
    press(app, KeyCode::Char('a'));
    type_str(app, name);
    press(app, KeyCode::Tab);
    type_str(app, minutes);
    press(app, KeyCode::Enter);
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Forms
// =============================================================================

#[test]
fn add_task_with_priority() {
    let (mut app, _) = make_app();
    press(&mut app, KeyCode::Char('a'));
    type_str(&mut app, "Read Ch.1");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "30");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, InputMode::Normal);
    let task = &app.tasks.tasks()[0];
    assert_eq!(task.name, "Read Ch.1");
    assert_eq!(task.expected_time, 30);
    assert_eq!(task.priority, Priority::High);
}

#[test]
fn add_material_form_selects_new_entry() {
    let (mut app, _) = make_app();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, PanelFocus::Materials);

    press(&mut app, KeyCode::Char('a'));
    type_str(&mut app, "Khan Academy");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "khanacademy.org");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, InputMode::Normal);
    assert_eq!(app.materials.len(), 5);
    let selected = app.selected_material().unwrap();
    assert_eq!(selected.url, "https://khanacademy.org");
}

#[test]
fn add_material_without_url_keeps_form() {
    let (mut app, _) = make_app();
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('a'));
    type_str(&mut app, "Notes");
    press(&mut app, KeyCode::Enter);

    let InputMode::AddMaterial(form) = &app.mode else {
        panic!("form should stay open");
    };
    assert_eq!(form.title.value(), "Notes");
    assert!(form.error.is_some());
    assert_eq!(app.materials.len(), 4);
}

#[test]
fn seeds_ignore_delete_key() {
    let (mut app, _) = make_app();
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.materials.len(), 4);
}

// =============================================================================
// Timer consistency
// =============================================================================

#[test]
fn exactly_one_active_task_after_switching() {
    let (mut app, clock) = make_app();
    add_task(&mut app, "First", "10");
    clock.advance(Duration::from_secs(1));
    add_task(&mut app, "Second", "10");

    // Newest first: "Second" is row 0.
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);

    let active: Vec<_> = app.tasks.tasks().iter().filter(|t| t.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "First");
    assert_eq!(app.timer.label(), "First");
}

#[test]
fn time_is_split_between_tasks() {
    let (mut app, clock) = make_app();
    add_task(&mut app, "First", "10");
    clock.advance(Duration::from_secs(1));
    add_task(&mut app, "Second", "10");

    press(&mut app, KeyCode::Enter);
    clock.advance(Duration::from_secs(8));
    app.tick();
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);
    clock.advance(Duration::from_secs(4));
    app.tick();

    let by_name = |name: &str| {
        app.tasks
            .tasks()
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.actual_time)
    };
    assert_eq!(by_name("Second"), Some(8));
    assert_eq!(by_name("First"), Some(4));
    assert_eq!(app.timer.elapsed_seconds(), 12);
}

#[test]
fn filter_key_limits_list_and_clamps_selection() {
    let (mut app, clock) = make_app();
    add_task(&mut app, "First", "10");
    clock.advance(Duration::from_secs(1));
    add_task(&mut app, "Second", "10");
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('x'));

    // all -> pending
    press(&mut app, KeyCode::Char('f'));
    assert_eq!(app.filter, TaskFilter::Pending);
    assert_eq!(app.visible_tasks().len(), 1);
    assert_eq!(app.selected_task, 0);
    assert_eq!(app.selected_task().unwrap().name, "Second");

    press(&mut app, KeyCode::Char('o'));
    assert_eq!(app.sort, TaskSort::Name);
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn idle_dashboard_shows_hint_and_seeds() {
    let (app, _) = make_app();
    let screen = render(&app);
    assert!(screen.contains("No active task - Start a timer"));
    assert!(screen.contains("00:00:00"));
    assert!(screen.contains("Google Scholar"));
    assert!(screen.contains("No tasks yet"));
}

#[test]
fn running_task_shows_banner_and_elapsed() {
    let (mut app, clock) = make_app();
    add_task(&mut app, "Thesis", "90");
    press(&mut app, KeyCode::Enter);
    clock.advance(Duration::from_secs(65));
    app.tick();

    let screen = render(&app);
    assert!(screen.contains("Currently working on: Thesis"));
    assert!(screen.contains("00:01:05"));
    assert!(screen.contains("Total 1"));
}

#[test]
fn idle_restored_label_keeps_banner() {
    let store = Arc::new(InMemoryStore::new());
    store
        .set(
            TIMER_KEY,
            r#"{"seconds":42,"isRunning":false,"startTime":0,"task":"Essay"}"#,
        )
        .unwrap();
    let app = App::new(
        store,
        Arc::new(ManualClock::new(1_700_000_000_000)),
        &DashConfig::default(),
    );

    assert!(!app.timer.is_running());
    assert_eq!(banner_text(&app), "Currently working on: Essay");
    let screen = render(&app);
    assert!(screen.contains("Currently working on: Essay"));
    assert!(screen.contains("00:00:42"));
}

#[test]
fn unusable_time_format_still_renders() {
    let config = DashConfig {
        time_format: "%Q".into(),
        ..Default::default()
    };
    let app = App::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(ManualClock::new(1_700_000_000_000)),
        &config,
    );
    let expected = app.now_local().format("%I:%M:%S %p").to_string();
    assert!(render(&app).contains(&expected));
}

#[test]
fn open_form_is_drawn() {
    let (mut app, _) = make_app();
    press(&mut app, KeyCode::Char('a'));
    type_str(&mut app, "Essay");
    let screen = render(&app);
    assert!(screen.contains("Add Task"));
    assert!(screen.contains("Essay"));
}
