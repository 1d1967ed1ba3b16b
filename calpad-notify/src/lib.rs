//! Desktop reminders for calpad events.
//!
//! `ReminderScheduler` scans the shared event store once a minute and shows a
//! desktop notification for each event entering its lead-time window, at most
//! once per event over the scheduler's lifetime.

pub mod scheduler;

pub use scheduler::{Reminder, ReminderScheduler, due_reminders, reminder_message};
