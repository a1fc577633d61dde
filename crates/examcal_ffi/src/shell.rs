//! Notification service backing the Flutter shell.
//!
//! # Responsibility
//! - Queue reminders in the core outbox until the shell takes them.
//! - Keep taken reminders cancellable until the platform answers.
//!
//! # Invariants
//! - A reminder is either queued, handed over, or settled; never two at once.
//! - Cancelling a handed-over reminder settles it as `Cancelled` and queues
//!   its id for retraction exactly once.

use examcal_core::{
    NotificationError, NotificationService, OutboxNotificationService, ReminderCompletion,
    ReminderHandle, ReminderId, ReminderRequest,
};
use log::debug;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct HandedOver {
    delivering: HashMap<ReminderId, ReminderCompletion>,
    retracted: Vec<ReminderId>,
}

#[derive(Debug, Default)]
pub struct ShellNotificationService {
    outbox: OutboxNotificationService,
    handed_over: Mutex<HandedOver>,
}

impl ShellNotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves every queued reminder to the shell, oldest first.
    pub fn hand_over(&self) -> Vec<(ReminderId, ReminderRequest)> {
        let entries = self.outbox.drain();
        let mut handed_over = self.lock();
        entries
            .into_iter()
            .map(|entry| {
                let id = entry.id();
                handed_over.delivering.insert(id, entry.completion);
                (id, entry.request)
            })
            .collect()
    }

    /// Settles a handed-over reminder with the platform's answer.
    pub fn report(
        &self,
        id: ReminderId,
        outcome: Result<(), NotificationError>,
    ) -> Result<(), NotificationError> {
        let completion = self
            .lock()
            .delivering
            .remove(&id)
            .ok_or(NotificationError::UnknownReminder(id))?;
        completion.complete(outcome);
        Ok(())
    }

    /// Returns ids the shell must withdraw from the platform notifier.
    pub fn take_retracted(&self) -> Vec<ReminderId> {
        std::mem::take(&mut self.lock().retracted)
    }

    pub fn delivering_len(&self) -> usize {
        self.lock().delivering.len()
    }

    fn lock(&self) -> MutexGuard<'_, HandedOver> {
        self.handed_over
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationService for ShellNotificationService {
    fn schedule_reminder(&self, request: ReminderRequest) -> ReminderHandle {
        self.outbox.schedule_reminder(request)
    }

    fn cancel_reminder(&self, id: ReminderId) -> Result<(), NotificationError> {
        match self.outbox.cancel_reminder(id) {
            Err(NotificationError::UnknownReminder(_)) => {}
            queued => return queued,
        }

        let completion = {
            let mut handed_over = self.lock();
            let completion = handed_over
                .delivering
                .remove(&id)
                .ok_or(NotificationError::UnknownReminder(id))?;
            handed_over.retracted.push(id);
            completion
        };
        completion.complete(Err(NotificationError::Cancelled));
        debug!("event=reminder_retracted module=ffi status=ok reminder_id={id}");
        Ok(())
    }
}
