//! Notification service contract.

use crate::reminder::handle::{NotificationError, ReminderHandle, ReminderId};
use crate::reminder::request::ReminderRequest;
use std::sync::Arc;

/// External mechanism that delivers local reminder notifications.
///
/// # Contract
/// - `schedule_reminder` returns immediately; delivery happens later and is
///   reported through the returned handle.
/// - Implementations must not panic on rejected requests; they report the
///   failure through the handle instead.
pub trait NotificationService {
    fn schedule_reminder(&self, request: ReminderRequest) -> ReminderHandle;

    /// Retracts a reminder that has not fired yet.
    fn cancel_reminder(&self, id: ReminderId) -> Result<(), NotificationError> {
        let _ = id;
        Err(NotificationError::CancellationUnsupported)
    }
}

impl<T: NotificationService + ?Sized> NotificationService for &T {
    fn schedule_reminder(&self, request: ReminderRequest) -> ReminderHandle {
        (**self).schedule_reminder(request)
    }

    fn cancel_reminder(&self, id: ReminderId) -> Result<(), NotificationError> {
        (**self).cancel_reminder(id)
    }
}

impl<T: NotificationService + ?Sized> NotificationService for Arc<T> {
    fn schedule_reminder(&self, request: ReminderRequest) -> ReminderHandle {
        (**self).schedule_reminder(request)
    }

    fn cancel_reminder(&self, id: ReminderId) -> Result<(), NotificationError> {
        (**self).cancel_reminder(id)
    }
}

impl<T: NotificationService + ?Sized> NotificationService for Box<T> {
    fn schedule_reminder(&self, request: ReminderRequest) -> ReminderHandle {
        (**self).schedule_reminder(request)
    }

    fn cancel_reminder(&self, id: ReminderId) -> Result<(), NotificationError> {
        (**self).cancel_reminder(id)
    }
}
