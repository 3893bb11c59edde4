//! Background tasks for the HTTP presentation layer

mod event_log;

pub use event_log::spawn_event_log_task;
