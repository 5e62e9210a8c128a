//! Timer signal contract between the task list and the stopwatch.
//!
//! The task registry never holds the stopwatch. Its start/stop operations
//! return a [`TimerSignal`], and whoever owns both sides delivers it to a
//! [`TimerController`]. Delivery is fire-and-forget: there is no reply.

/// A request for the shared stopwatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerSignal {
    /// A task wants the stopwatch attributed to it.
    Start {
        /// Name of the task, used as the stopwatch label.
        task_name: String,
    },
    /// The active task released the stopwatch.
    Stop,
}

impl TimerSignal {
    /// Delivers this signal to `controller`.
    pub fn deliver<C: TimerController + ?Sized>(&self, controller: &mut C) {
        match self {
            Self::Start { task_name } => controller.on_external_start(task_name),
            Self::Stop => controller.on_external_stop(),
        }
    }
}

/// Something that can be driven by [`TimerSignal`]s.
///
/// Both handlers must be total: they are valid in every stopwatch state.
pub trait TimerController {
    /// Forces the stopwatch to run, attributed to `label`.
    fn on_external_start(&mut self, label: &str);

    /// Forces the stopwatch to stop, keeping accumulated time.
    fn on_external_stop(&mut self);
}
