//! Shared model for `studydash`: tasks, study materials, the persisted
//! stopwatch record, snapshot codec and the timer signal contract.

pub mod codec;
pub mod material;
pub mod signal;
pub mod task;
pub mod timer;
