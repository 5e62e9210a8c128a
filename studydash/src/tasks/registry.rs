//! Task registry: CRUD, activity flags and filtered listings.

use std::sync::Arc;

use studydash_core::codec::TASKS_KEY;
use studydash_core::signal::TimerSignal;
use studydash_core::task::{
    MAX_PROGRESS, MAX_TASK_NAME_LENGTH, Priority, Task, TaskFilter, TaskId, TaskSort,
};

use super::TaskError;
use crate::clock::Clock;
use crate::store::{self, KvStore};

/// Aggregate numbers shown under the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Tasks marked complete.
    pub completed: usize,
    /// Tasks not yet complete.
    pub pending: usize,
    /// Mean progress, rounded to the nearest percent; `0` with no tasks.
    pub average_progress: u8,
}

/// Owns the study task list.
///
/// Invariant: at most one task has `is_active` set.
pub struct TaskRegistry {
    tasks: Vec<Task>,
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    max_name_len: usize,
}

impl TaskRegistry {
    /// Loads the task list from `store`, or starts empty if there is no
    /// usable snapshot.
    #[must_use]
    pub fn load(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        let mut tasks: Vec<Task> = store::load_snapshot(store.as_ref(), TASKS_KEY).unwrap_or_default();

        // A hand-edited or stale snapshot may carry several active flags;
        // keep only the first.
        let mut seen_active = false;
        for task in &mut tasks {
            if task.is_active {
                if seen_active {
                    task.is_active = false;
                }
                seen_active = true;
            }
            task.progress = task.progress.min(MAX_PROGRESS);
        }

        tracing::info!(count = tasks.len(), "task list loaded");
        Self {
            tasks,
            store,
            clock,
            max_name_len: MAX_TASK_NAME_LENGTH,
        }
    }

    /// Overrides the maximum task name length.
    #[must_use]
    pub const fn with_max_name_len(mut self, max: usize) -> Self {
        self.max_name_len = max;
        self
    }

    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NameEmpty`] for a blank name,
    /// [`TaskError::NameTooLong`] if it exceeds the configured limit, or
    /// [`TaskError::InvalidExpectedTime`] if `expected_minutes` is zero.
    /// The registry is unchanged in every error case.
    pub fn add_task(
        &mut self,
        name: &str,
        expected_minutes: u32,
        priority: Priority,
    ) -> Result<Task, TaskError> {
        let name = self.validate_name(name)?;
        if expected_minutes == 0 {
            return Err(TaskError::InvalidExpectedTime);
        }

        let task = Task::new(name, expected_minutes, priority, self.clock.now_utc());
        tracing::debug!(task_id = %task.id, name = %task.name, "task added");
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Removes a task. Returns `false` if no task has that id.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            tracing::debug!(task_id = %id, "task deleted");
            self.persist();
        }
        removed
    }

    /// Flips completion.
    ///
    /// Completing a task forces its progress to 100; un-completing leaves
    /// progress where it was.
    pub fn toggle_completion(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        task.is_completed = !task.is_completed;
        if task.is_completed {
            task.progress = MAX_PROGRESS;
        }
        self.persist();
        true
    }

    /// Sets progress, clamped to `0..=100`. Completion is not affected.
    pub fn set_progress(&mut self, id: &TaskId, value: u8) -> bool {
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        task.progress = value.min(MAX_PROGRESS);
        self.persist();
        true
    }

    /// Renames a task. Blank or over-long names are ignored.
    pub fn rename_task(&mut self, id: &TaskId, new_name: &str) -> bool {
        let Ok(name) = self.validate_name(new_name) else {
            return false;
        };
        let Some(task) = self.get_mut(id) else {
            return false;
        };
        task.name = name;
        self.persist();
        true
    }

    /// Makes `id` the only active task and returns the start signal for the
    /// stopwatch.
    ///
    /// Returns `None` (and changes nothing) if the id is unknown.
    pub fn start_timer_for(&mut self, id: &TaskId) -> Option<TimerSignal> {
        let task_name = self.get(id)?.name.clone();
        for task in &mut self.tasks {
            task.is_active = &task.id == id;
        }
        tracing::info!(task_id = %id, task = %task_name, "task timer started");
        self.persist();
        Some(TimerSignal::Start { task_name })
    }

    /// Deactivates `id` and returns the stop signal for the stopwatch.
    ///
    /// The signal is a request; this does not check whether the stopwatch is
    /// running. Returns `None` if the id is unknown.
    pub fn stop_timer_for(&mut self, id: &TaskId) -> Option<TimerSignal> {
        let task = self.get_mut(id)?;
        task.is_active = false;
        tracing::info!(task_id = %id, "task timer stopped");
        self.persist();
        Some(TimerSignal::Stop)
    }

    /// Clears every active flag. Returns `true` if any flag was set.
    pub fn clear_active(&mut self) -> bool {
        let mut changed = false;
        for task in self.tasks.iter_mut().filter(|t| t.is_active) {
            task.is_active = false;
            changed = true;
        }
        if changed {
            self.persist();
        }
        changed
    }

    /// Adds stopwatch seconds to the active task's `actual_time`.
    pub fn credit_active(&mut self, seconds: u64) {
        if seconds == 0 {
            return;
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.is_active) {
            task.actual_time = task.actual_time.saturating_add(seconds);
            self.persist();
        }
    }

    /// Tasks passing `filter`, ordered by `sort`.
    ///
    /// Recomputed from current state on every call; ties keep insertion
    /// order.
    #[must_use]
    pub fn list_filtered(&self, filter: TaskFilter, sort: TaskSort) -> Vec<&Task> {
        let mut listed: Vec<&Task> = self.tasks.iter().filter(|t| filter.matches(t)).collect();
        listed.sort_by(|a, b| sort.compare(a, b));
        listed
    }

    /// Summary counts over all tasks.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn stats(&self) -> TaskStats {
        let total = self.tasks.len();
        if total == 0 {
            return TaskStats::default();
        }
        let completed = self.tasks.iter().filter(|t| t.is_completed).count();
        let sum: usize = self.tasks.iter().map(|t| usize::from(t.progress)).sum();
        // Round half up; the mean of values <= 100 always fits in u8.
        let average_progress = ((sum * 2 + total) / (total * 2)) as u8;
        TaskStats {
            total,
            completed,
            pending: total - completed,
            average_progress,
        }
    }

    /// All tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// The task the stopwatch is attributed to, if any.
    #[must_use]
    pub fn active_task(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.is_active)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    fn validate_name(&self, name: &str) -> Result<String, TaskError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TaskError::NameEmpty);
        }
        if trimmed.chars().count() > self.max_name_len {
            return Err(TaskError::NameTooLong(self.max_name_len));
        }
        Ok(trimmed.to_string())
    }

    fn persist(&self) {
        store::save_snapshot(self.store.as_ref(), TASKS_KEY, self.tasks.as_slice());
    }
}
