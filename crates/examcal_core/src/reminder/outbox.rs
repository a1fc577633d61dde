//! Queue-backed notification service for UI shells.
//!
//! # Responsibility
//! - Accept reminder requests without blocking and hold them until the
//!   shell drains them and hands them to the platform notifier.
//! - Retract queued requests that have not been drained yet.
//!
//! # Invariants
//! - Drain order equals submission order.
//! - Once drained, an entry's outcome belongs to the shell; the outbox can
//!   no longer cancel it.

use crate::reminder::handle::{NotificationError, ReminderCompletion, ReminderHandle, ReminderId};
use crate::reminder::request::ReminderRequest;
use crate::reminder::service::NotificationService;
use log::debug;
use std::sync::{Mutex, MutexGuard};

/// Queued reminder awaiting platform delivery.
#[derive(Debug)]
pub struct OutboxEntry {
    pub request: ReminderRequest,
    /// Report the platform's answer here.
    pub completion: ReminderCompletion,
}

impl OutboxEntry {
    pub fn id(&self) -> ReminderId {
        self.completion.id()
    }
}

/// Notification service that queues requests for a shell to deliver.
#[derive(Debug, Default)]
pub struct OutboxNotificationService {
    queue: Mutex<Vec<OutboxEntry>>,
}

impl OutboxNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every queued entry, oldest first.
    pub fn drain(&self) -> Vec<OutboxEntry> {
        std::mem::take(&mut *self.lock())
    }

    pub fn pending_len(&self) -> usize {
        self.lock().len()
    }

    /// Returns copies of queued requests without draining them.
    pub fn pending_requests(&self) -> Vec<ReminderRequest> {
        self.lock()
            .iter()
            .map(|entry| entry.request.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<OutboxEntry>> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationService for OutboxNotificationService {
    fn schedule_reminder(&self, request: ReminderRequest) -> ReminderHandle {
        let (handle, completion) = ReminderHandle::pending();
        debug!(
            "event=reminder_queued module=outbox status=ok reminder_id={} delay_ms={}",
            handle.id(),
            request.delay.as_millis()
        );
        self.lock().push(OutboxEntry {
            request,
            completion,
        });
        handle
    }

    fn cancel_reminder(&self, id: ReminderId) -> Result<(), NotificationError> {
        let entry = {
            let mut queue = self.lock();
            let position = queue
                .iter()
                .position(|entry| entry.id() == id)
                .ok_or(NotificationError::UnknownReminder(id))?;
            queue.remove(position)
        };
        entry.completion.complete(Err(NotificationError::Cancelled));
        debug!("event=reminder_cancelled module=outbox status=ok reminder_id={id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::OutboxNotificationService;
    use crate::model::exam::ExamRecord;
    use crate::reminder::handle::{NotificationError, ReminderId};
    use crate::reminder::request::ReminderRequest;
    use crate::reminder::service::NotificationService;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn request(subject: &str) -> ReminderRequest {
        let exam = ExamRecord::new(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(), subject);
        ReminderRequest::for_exam(&exam, "Upcoming Exam", Duration::from_secs(5))
    }

    #[test]
    fn drain_returns_entries_in_submission_order() {
        let outbox = OutboxNotificationService::new();
        let first = outbox.schedule_reminder(request("Math"));
        let second = outbox.schedule_reminder(request("Science"));

        let drained = outbox.drain();
        assert_eq!(
            drained.iter().map(|entry| entry.id()).collect::<Vec<_>>(),
            vec![first.id(), second.id()]
        );
        assert_eq!(outbox.pending_len(), 0);
    }

    #[test]
    fn cancel_resolves_handle_and_rejects_unknown_ids() {
        let outbox = OutboxNotificationService::new();
        let mut handle = outbox.schedule_reminder(request("Math"));

        outbox.cancel_reminder(handle.id()).expect("queued reminder cancels");
        assert_eq!(handle.try_outcome(), Some(Err(NotificationError::Cancelled)));
        assert_eq!(outbox.pending_len(), 0);

        let unknown = ReminderId::new();
        assert_eq!(
            outbox.cancel_reminder(unknown),
            Err(NotificationError::UnknownReminder(unknown))
        );
    }
}
