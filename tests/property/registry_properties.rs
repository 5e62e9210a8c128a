//! Property tests for the task registry and the stopwatch.
//!
//! Uses proptest to verify:
//! 1. Any sequence of add/delete/start/stop keeps ids unique, keeps at most
//!    one active task, and `list_filtered` only returns tasks still present.
//! 2. After `start_timer_for(id)`, exactly `id` is active.
//! 3. Pause then immediate resume never changes elapsed time.
//! 4. A running stopwatch reloaded after Δ seconds shows elapsed + Δ.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use studydash::clock::ManualClock;
use studydash::store::InMemoryStore;
use studydash::tasks::TaskRegistry;
use studydash::timer::TimerCoordinator;
use studydash_core::signal::TimerController;
use studydash_core::task::{Priority, TaskFilter, TaskSort};

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Delete(usize),
    Start(usize),
    Stop(usize),
    Complete(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Op::Add),
        any::<usize>().prop_map(Op::Delete),
        any::<usize>().prop_map(Op::Start),
        any::<usize>().prop_map(Op::Stop),
        any::<usize>().prop_map(Op::Complete),
    ]
}

const FILTERS: [TaskFilter; 4] = [
    TaskFilter::All,
    TaskFilter::Completed,
    TaskFilter::Pending,
    TaskFilter::Active,
];

const SORTS: [TaskSort; 4] = [
    TaskSort::Name,
    TaskSort::Priority,
    TaskSort::Progress,
    TaskSort::CreatedAt,
];

proptest! {
    #[test]
    fn registry_invariants_hold(ops in prop::collection::vec(arb_op(), 0..40)) {
        let clock = ManualClock::new(1_700_000_000_000);
        let mut reg = TaskRegistry::load(Arc::new(InMemoryStore::new()), Arc::new(clock.clone()));

        for op in ops {
            clock.advance(Duration::from_millis(10));
            let pick = |i: usize| {
                let tasks = reg.tasks();
                (!tasks.is_empty()).then(|| tasks[i % tasks.len()].id.clone())
            };
            match op {
                Op::Add(name) => {
                    let _ = reg.add_task(&name, 25, Priority::Medium);
                }
                Op::Delete(i) => {
                    if let Some(id) = pick(i) {
                        reg.delete_task(&id);
                    }
                }
                Op::Start(i) => {
                    if let Some(id) = pick(i) {
                        prop_assert!(reg.start_timer_for(&id).is_some());
                        let active: Vec<_> = reg.tasks().iter().filter(|t| t.is_active).collect();
                        prop_assert_eq!(active.len(), 1);
                        prop_assert_eq!(&active[0].id, &id);
                    }
                }
                Op::Stop(i) => {
                    if let Some(id) = pick(i) {
                        reg.stop_timer_for(&id);
                    }
                }
                Op::Complete(i) => {
                    if let Some(id) = pick(i) {
                        reg.toggle_completion(&id);
                    }
                }
            }

            let ids: HashSet<_> = reg.tasks().iter().map(|t| t.id.clone()).collect();
            prop_assert_eq!(ids.len(), reg.len());
            prop_assert!(reg.tasks().iter().filter(|t| t.is_active).count() <= 1);

            for filter in FILTERS {
                for sort in SORTS {
                    let listed = reg.list_filtered(filter, sort);
                    prop_assert!(listed.iter().all(|t| ids.contains(&t.id)));
                    prop_assert!(listed.iter().all(|t| filter.matches(t)));
                }
            }
        }
    }

    #[test]
    fn pause_resume_keeps_elapsed(run_secs in 0u64..10_000, gap_secs in 0u64..10_000) {
        let clock = ManualClock::new(1_700_000_000_000);
        let mut timer = TimerCoordinator::load(Arc::new(InMemoryStore::new()), Arc::new(clock.clone()));

        timer.manual_toggle();
        clock.advance(Duration::from_secs(run_secs));
        timer.manual_toggle();
        let paused = timer.elapsed_seconds();
        prop_assert_eq!(paused, run_secs);

        clock.advance(Duration::from_secs(gap_secs));
        timer.manual_toggle();
        prop_assert_eq!(timer.elapsed_seconds(), paused);
    }

    #[test]
    fn reload_adds_closed_time(
        run_secs in 0u64..100_000,
        closed_secs in 0u64..1_000_000,
        extra_ms in 0u64..1000,
    ) {
        let clock = ManualClock::new(1_700_000_000_000);
        let store = Arc::new(InMemoryStore::new());
        let mut timer = TimerCoordinator::load(store.clone(), Arc::new(clock.clone()));
        timer.on_external_start("Reading");
        clock.advance(Duration::from_secs(run_secs));
        timer.tick();
        let before = timer.elapsed_seconds();

        clock.advance(Duration::from_secs(closed_secs) + Duration::from_millis(extra_ms));
        let reloaded = TimerCoordinator::load(store, Arc::new(clock.clone()));

        prop_assert!(reloaded.is_running());
        let expected = before + closed_secs;
        prop_assert!(reloaded.elapsed_seconds() >= expected);
        prop_assert!(reloaded.elapsed_seconds() <= expected + 1);
        prop_assert_eq!(reloaded.label(), "Reading");
    }
}
