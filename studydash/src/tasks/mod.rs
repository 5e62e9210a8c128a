//! Study task list.
//!
//! [`TaskRegistry`] owns every task, writes the whole list through to the
//! store after each change, and produces [`TimerSignal`]s when a task's
//! timer is started or stopped. It never touches the stopwatch itself.
//!
//! [`TimerSignal`]: studydash_core::signal::TimerSignal

pub mod registry;

pub use registry::{TaskRegistry, TaskStats};

use thiserror::Error;

/// Reasons a task cannot be created or renamed.
///
/// The dashboard treats all of these as silent no-ops; they exist so that
/// callers and tests can tell why nothing happened.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Task name is empty or whitespace.
    #[error("task name cannot be empty")]
    NameEmpty,
    /// Task name exceeds the configured maximum length.
    #[error("task name too long (max {0} characters)")]
    NameTooLong(usize),
    /// Expected time is missing, not a number, or not positive.
    #[error("expected time must be a positive number of minutes")]
    InvalidExpectedTime,
}

/// Parses the expected-time form field.
///
/// # Errors
///
/// Returns [`TaskError::InvalidExpectedTime`] unless the trimmed input is a
/// positive integer.
pub fn parse_expected_minutes(input: &str) -> Result<u32, TaskError> {
    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(TaskError::InvalidExpectedTime),
    }
}
