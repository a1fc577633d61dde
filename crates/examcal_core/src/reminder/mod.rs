//! Reminder requests and the notification service seam.
//!
//! # Responsibility
//! - Build reminder requests from exam records.
//! - Define the submit-and-return contract with the notification service.
//! - Compute trigger delays through a configurable strategy.
//!
//! # Invariants
//! - Submitting a request never blocks on delivery; callers get a handle.
//! - Dropping a handle never retracts a submitted reminder.

pub mod delay;
pub mod handle;
pub mod outbox;
pub mod request;
pub mod service;

pub use delay::{Clock, DelayStrategy, FixedClock, SystemClock};
pub use handle::{NotificationError, ReminderCompletion, ReminderHandle, ReminderId};
pub use outbox::{OutboxEntry, OutboxNotificationService};
pub use request::{reminder_body, ReminderRequest, DEFAULT_REMINDER_TITLE};
pub use service::NotificationService;
