//! The shared study stopwatch.
//!
//! [`TimerCoordinator`] is a two-state machine (idle / running) whose elapsed
//! time is always derived from a wall-clock anchor:
//!
//! ```text
//! running:  elapsed = floor((now - anchor) / 1000)
//! ```
//!
//! Nothing ever increments a counter, so a suspended process or a closed
//! dashboard catches up with a single recomputation. Every state change is
//! written through to the store under [`TIMER_KEY`].

use std::sync::Arc;

use studydash_core::codec::TIMER_KEY;
use studydash_core::signal::TimerController;
use studydash_core::timer::{MANUAL_TIMER_LABEL, TimerSnapshot, format_duration};

use crate::clock::Clock;
use crate::store::{self, KvStore};

/// Coarse stopwatch state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Not counting. Elapsed time is kept.
    Idle,
    /// Counting from the anchor.
    Running,
}

/// Owner of the single stopwatch.
pub struct TimerCoordinator {
    elapsed_seconds: u64,
    running: bool,
    /// Epoch millis; `0` while idle.
    anchor_ms: u64,
    label: String,
    /// Seconds credited by startup reconciliation, not yet claimed.
    resume_credit: u64,
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl TimerCoordinator {
    /// Restores the stopwatch from `store`.
    ///
    /// A running snapshot keeps counting: the wall-clock time that passed
    /// since it was written is credited, and the stored anchor is kept. A
    /// stopped snapshot is restored as-is. Missing or malformed snapshots
    /// give a zeroed, idle stopwatch.
    #[must_use]
    pub fn load(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        let snapshot: TimerSnapshot =
            store::load_snapshot(store.as_ref(), TIMER_KEY).unwrap_or_default();
        let now = clock.now_ms();

        let mut timer = Self {
            elapsed_seconds: snapshot.seconds,
            running: false,
            anchor_ms: 0,
            label: snapshot.task,
            resume_credit: 0,
            store,
            clock,
        };

        if snapshot.is_running && snapshot.start_time > 0 {
            let derived = now.saturating_sub(snapshot.start_time) / 1000;
            if now >= snapshot.start_time && derived >= snapshot.seconds {
                timer.anchor_ms = snapshot.start_time;
                timer.elapsed_seconds = derived;
            } else {
                // The wall clock moved backwards since the write. Keep the
                // stored seconds and re-anchor on them.
                tracing::warn!(
                    start_time = snapshot.start_time,
                    now,
                    "stored timer anchor is in the future, re-anchoring"
                );
                timer.anchor_ms = now.saturating_sub(snapshot.seconds.saturating_mul(1000));
            }
            timer.running = true;
            timer.resume_credit = timer.elapsed_seconds - snapshot.seconds;
            if timer.label.is_empty() {
                timer.label = MANUAL_TIMER_LABEL.to_string();
            }
            tracing::info!(
                elapsed = timer.elapsed_seconds,
                credited = timer.resume_credit,
                label = %timer.label,
                "resumed running timer"
            );
        }

        timer.persist();
        timer
    }

    /// Start/pause button: idle starts a manual session, running pauses.
    pub fn manual_toggle(&mut self) {
        if self.running {
            self.catch_up();
            self.go_idle();
            tracing::info!(elapsed = self.elapsed_seconds, "timer paused");
        } else {
            self.go_running(MANUAL_TIMER_LABEL);
            tracing::info!(elapsed = self.elapsed_seconds, "manual timer started");
        }
        self.persist();
    }

    /// Zeroes the stopwatch and stops it, from any state.
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.running = false;
        self.anchor_ms = 0;
        self.label.clear();
        self.resume_credit = 0;
        tracing::info!("timer reset");
        self.persist();
    }

    /// Recomputes elapsed time from the anchor.
    ///
    /// Returns how many seconds the stopwatch advanced since the previous
    /// recomputation; `0` while idle.
    pub fn tick(&mut self) -> u64 {
        if !self.running {
            return 0;
        }
        let advanced = self.catch_up();
        if advanced > 0 {
            self.persist();
        }
        advanced
    }

    /// Takes the seconds credited while the dashboard was closed.
    ///
    /// Returns them once; later calls return `0`.
    pub const fn take_resume_credit(&mut self) -> u64 {
        let credit = self.resume_credit;
        self.resume_credit = 0;
        credit
    }

    /// Accumulated seconds of the current session.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whether the stopwatch is counting.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else {
            TimerPhase::Idle
        }
    }

    /// What the stopwatch counts toward; empty when nothing is attributed.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Wall-clock anchor in epoch millis, `0` while idle.
    #[must_use]
    pub const fn anchor_ms(&self) -> u64 {
        self.anchor_ms
    }

    /// Elapsed time as `HH:MM:SS`.
    #[must_use]
    pub fn display(&self) -> String {
        format_duration(self.elapsed_seconds)
    }

    /// The record written to the store.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            seconds: self.elapsed_seconds,
            is_running: self.running,
            start_time: self.anchor_ms,
            task: self.label.clone(),
        }
    }

    /// Re-derives elapsed from the anchor; returns the seconds gained.
    fn catch_up(&mut self) -> u64 {
        if !self.running {
            return 0;
        }
        let derived = self.clock.now_ms().saturating_sub(self.anchor_ms) / 1000;
        let advanced = derived.saturating_sub(self.elapsed_seconds);
        self.elapsed_seconds = derived;
        advanced
    }

    fn go_running(&mut self, label: &str) {
        self.catch_up();
        self.anchor_ms = self
            .clock
            .now_ms()
            .saturating_sub(self.elapsed_seconds.saturating_mul(1000));
        self.running = true;
        self.label = label.to_string();
    }

    fn go_idle(&mut self) {
        self.running = false;
        self.anchor_ms = 0;
        self.label.clear();
    }

    fn persist(&self) {
        store::save_snapshot(self.store.as_ref(), TIMER_KEY, &self.snapshot());
    }
}

impl TimerController for TimerCoordinator {
    fn on_external_start(&mut self, label: &str) {
        self.go_running(label);
        tracing::info!(label, elapsed = self.elapsed_seconds, "timer attributed to task");
        self.persist();
    }

    fn on_external_stop(&mut self) {
        self.catch_up();
        self.go_idle();
        tracing::info!(elapsed = self.elapsed_seconds, "timer stopped by task");
        self.persist();
    }
}
