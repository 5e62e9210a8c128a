//! Study task model.
//!
//! Tasks are persisted as a single JSON array under
//! [`TASKS_KEY`](crate::codec::TASKS_KEY). Field names are camelCase so that
//! snapshots stay readable by anything that wrote the same layout before.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum allowed task name length in characters.
pub const MAX_TASK_NAME_LENGTH: usize = 256;

/// Upper bound of [`Task::progress`].
pub const MAX_PROGRESS: u8 = 100;

/// Granularity the dashboard uses when nudging progress up or down.
pub const PROGRESS_STEP: u8 = 5;

/// Opaque task identifier.
///
/// New identifiers are UUID v7 text, but any string is accepted when a
/// snapshot is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a fresh, time-ordered identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing identifier string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Numeric rank used for sorting (high = 3, low = 1).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// The next priority in `high -> medium -> low -> high` order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }

    /// The previous priority in cycling order.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Medium => Self::High,
            Self::Low => Self::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// A study task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, immutable identifier.
    pub id: TaskId,
    /// Display name, never empty.
    pub name: String,
    /// Planned effort in minutes (positive).
    pub expected_time: u32,
    /// Seconds of stopwatch time attributed to this task.
    #[serde(default)]
    pub actual_time: u64,
    /// Whether the task is done.
    #[serde(default)]
    pub is_completed: bool,
    /// Completion percentage, `0..=100`.
    #[serde(default)]
    pub progress: u8,
    /// Whether the shared stopwatch is currently attributed to this task.
    #[serde(default)]
    pub is_active: bool,
    /// Priority, medium unless chosen otherwise.
    #[serde(default)]
    pub priority: Priority,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a fresh task with a new identifier and zeroed progress.
    #[must_use]
    pub fn new(
        name: String,
        expected_time: u32,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            name,
            expected_time,
            actual_time: 0,
            is_completed: false,
            progress: 0,
            is_active: false,
            priority,
            created_at,
        }
    }
}

/// Which tasks a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
    Active,
}

impl TaskFilter {
    /// Returns `true` if `task` passes this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.is_completed,
            Self::Pending => !task.is_completed,
            Self::Active => task.is_active,
        }
    }

    /// Cycles `all -> pending -> completed -> active -> all`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Pending,
            Self::Pending => Self::Completed,
            Self::Completed => Self::Active,
            Self::Active => Self::All,
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Completed => write!(f, "completed"),
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSort {
    Name,
    Priority,
    Progress,
    /// Newest first.
    #[default]
    CreatedAt,
}

impl TaskSort {
    /// Compares two tasks under this ordering.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::Priority => b.priority.rank().cmp(&a.priority.rank()),
            Self::Progress => b.progress.cmp(&a.progress),
            Self::CreatedAt => b.created_at.cmp(&a.created_at),
        }
    }

    /// Cycles `created -> name -> priority -> progress -> created`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::CreatedAt => Self::Name,
            Self::Name => Self::Priority,
            Self::Priority => Self::Progress,
            Self::Progress => Self::CreatedAt,
        }
    }
}

impl fmt::Display for TaskSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Priority => write!(f, "priority"),
            Self::Progress => write!(f, "progress"),
            Self::CreatedAt => write!(f, "date created"),
        }
    }
}
