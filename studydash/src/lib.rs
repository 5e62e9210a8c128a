//! `StudyDash`: terminal study dashboard library.

pub mod app;
pub mod clock;
pub mod config;
pub mod materials;
pub mod store;
pub mod tasks;
pub mod timer;
pub mod ui;
