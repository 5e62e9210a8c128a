//! Persisted stopwatch record and duration formatting.

use serde::{Deserialize, Serialize};

/// Label the stopwatch carries when started from its own controls.
pub const MANUAL_TIMER_LABEL: &str = "Manual Timer";

/// On-disk form of the stopwatch, stored under
/// [`TIMER_KEY`](crate::codec::TIMER_KEY).
///
/// `start_time` is the wall-clock anchor in epoch milliseconds: while
/// running, `seconds == (now - start_time) / 1000`. It is `0` when stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Accumulated session seconds at the time of writing.
    pub seconds: u64,
    /// Whether the stopwatch was counting.
    pub is_running: bool,
    /// Anchor instant in epoch milliseconds, `0` while stopped.
    #[serde(default)]
    pub start_time: u64,
    /// What the stopwatch counts toward; empty when idle.
    #[serde(default)]
    pub task: String,
}

/// Formats a second count as `HH:MM:SS`.
///
/// Hours are zero-padded to two digits but never wrap, so 100 hours renders
/// as `100:00:00`.
#[must_use]
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
