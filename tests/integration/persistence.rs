//! Integration tests for saving and restoring dashboard state through a
//! `FileStore` in a temporary directory.

use std::sync::Arc;
use std::time::Duration;

use studydash::app::App;
use studydash::clock::ManualClock;
use studydash::config::DashConfig;
use studydash::materials::MaterialRegistry;
use studydash::store::{FileStore, KvStore};
use studydash::tasks::TaskRegistry;
use studydash::timer::TimerCoordinator;
use studydash_core::codec::{MATERIALS_KEY, TASKS_KEY, TIMER_KEY};
use studydash_core::signal::TimerController;
use studydash_core::task::Priority;
use studydash_core::timer::TimerSnapshot;

const T0: u64 = 1_700_000_000_000;

fn open(dir: &tempfile::TempDir) -> Arc<FileStore> {
    Arc::new(FileStore::open(dir.path()).expect("store should open"))
}

#[test]
fn tasks_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(T0);

    let saved = {
        let mut reg = TaskRegistry::load(open(&dir), Arc::new(clock.clone()));
        let task = reg.add_task("Read Ch.1", 30, Priority::High).unwrap();
        reg.set_progress(&task.id, 35);
        reg.tasks().to_vec()
    };

    let reg = TaskRegistry::load(open(&dir), Arc::new(clock));
    assert_eq!(reg.tasks(), saved.as_slice());
}

#[test]
fn stored_json_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let mut reg = TaskRegistry::load(store.clone(), Arc::new(ManualClock::new(T0)));
    reg.add_task("Essay", 45, Priority::Low).unwrap();

    let text = store.get(TASKS_KEY).unwrap().unwrap();
    for key in ["expectedTime", "actualTime", "isCompleted", "isActive", "createdAt"] {
        assert!(text.contains(key), "missing {key} in {text}");
    }
    assert!(text.contains("\"low\""));
}

#[test]
fn timer_record_matches_external_format() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let clock = ManualClock::new(T0);
    let mut timer = TimerCoordinator::load(store.clone(), Arc::new(clock.clone()));
    timer.on_external_start("Essay");
    clock.advance(Duration::from_secs(3));
    timer.tick();

    let text = store.get(TIMER_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["seconds"], 3);
    assert_eq!(value["isRunning"], true);
    assert_eq!(value["startTime"], T0);
    assert_eq!(value["task"], "Essay");
}

#[test]
fn malformed_files_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    store.set(TASKS_KEY, "{not json").unwrap();
    store.set(TIMER_KEY, "[1,2,3]").unwrap();
    store.set(MATERIALS_KEY, "42").unwrap();

    let clock: Arc<ManualClock> = Arc::new(ManualClock::new(T0));
    let tasks = TaskRegistry::load(store.clone(), clock.clone());
    let timer = TimerCoordinator::load(store.clone(), clock);
    let materials = MaterialRegistry::load(store.clone());

    assert!(tasks.is_empty());
    assert!(!timer.is_running());
    assert_eq!(timer.elapsed_seconds(), 0);
    assert_eq!(materials.len(), 4);

    // Defaults are written back over the bad data.
    let timer_text = store.get(TIMER_KEY).unwrap().unwrap();
    let snapshot: TimerSnapshot = serde_json::from_str(&timer_text).unwrap();
    assert_eq!(snapshot, TimerSnapshot::default());
}

#[test]
fn closed_dashboard_credits_running_task_on_next_launch() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(T0);
    let config = DashConfig::default();

    {
        let mut app = App::new(open(&dir), Arc::new(clock.clone()), &config);
        let task = app.tasks.add_task("Thesis", 90, Priority::High).unwrap();
        let signal = app.tasks.start_timer_for(&task.id).unwrap();
        signal.deliver(&mut app.timer);
        clock.advance(Duration::from_secs(30));
        app.tick();
    }

    // Closed for two minutes.
    clock.advance(Duration::from_secs(120));
    let app = App::new(open(&dir), Arc::new(clock.clone()), &config);

    assert!(app.timer.is_running());
    assert_eq!(app.timer.elapsed_seconds(), 150);
    assert_eq!(app.timer.label(), "Thesis");
    let task = app.tasks.active_task().expect("task should still be active");
    assert_eq!(task.actual_time, 150);
}

#[test]
fn stale_active_flag_is_cleared_when_timer_is_idle() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(T0);
    let store = open(&dir);
    store
        .set(
            TASKS_KEY,
            r#"[{"id":"t1","name":"Old","expectedTime":10,"actualTime":0,
                "isCompleted":false,"progress":0,"isActive":true,
                "priority":"medium","createdAt":"2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();

    let app = App::new(store, Arc::new(clock), &DashConfig::default());
    assert!(!app.timer.is_running());
    assert!(app.tasks.active_task().is_none());
}
