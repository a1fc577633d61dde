//! Timer-backed notification service for terminal runs.
//!
//! # Responsibility
//! - Fire each reminder after its delay on the tokio runtime.
//! - Deliver by printing to stdout and logging; no OS notification center.
//!
//! # Invariants
//! - `schedule_reminder` only spawns; it never waits for the timer.
//! - A reminder whose cancel succeeded resolves as `Cancelled` and never
//!   prints, even when its timer was already due.

use examcal_core::{
    NotificationError, NotificationService, ReminderHandle, ReminderId, ReminderRequest,
};
use log::info;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

type CancelSenders = Arc<Mutex<HashMap<ReminderId, oneshot::Sender<()>>>>;

pub struct TimerNotificationService {
    runtime: Handle,
    cancels: CancelSenders,
}

impl TimerNotificationService {
    /// Binds the service to the runtime timers will run on.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            cancels: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl NotificationService for TimerNotificationService {
    fn schedule_reminder(&self, request: ReminderRequest) -> ReminderHandle {
        let (handle, completion) = ReminderHandle::pending();
        let id = handle.id();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        lock(&self.cancels).insert(id, cancel_tx);

        let cancels = Arc::clone(&self.cancels);
        self.runtime.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(request.delay) => {
                    if lock(&cancels).remove(&id).is_none() {
                        completion.complete(Err(NotificationError::Cancelled));
                        return;
                    }
                    println!("[{}] {}", request.title, request.body);
                    info!(
                        "event=reminder_delivered module=cli status=ok reminder_id={id} exam_date={}",
                        request.exam_date
                    );
                    completion.complete(Ok(()));
                }
                Ok(()) = cancel_rx => {
                    completion.complete(Err(NotificationError::Cancelled));
                }
            }
        });
        handle
    }

    fn cancel_reminder(&self, id: ReminderId) -> Result<(), NotificationError> {
        let sender = lock(&self.cancels)
            .remove(&id)
            .ok_or(NotificationError::UnknownReminder(id))?;
        sender
            .send(())
            .map_err(|_| NotificationError::UnknownReminder(id))
    }
}

fn lock(cancels: &CancelSenders) -> MutexGuard<'_, HashMap<ReminderId, oneshot::Sender<()>>> {
    cancels
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::TimerNotificationService;
    use examcal_core::{
        parse_iso_date, ExamRecord, NotificationError, NotificationService, ReminderRequest,
    };
    use std::time::Duration;

    fn request(delay: Duration) -> ReminderRequest {
        let exam = ExamRecord::new(parse_iso_date("2024-02-20").unwrap(), "Math");
        ReminderRequest::for_exam(&exam, "Upcoming Exam", delay)
    }

    #[tokio::test]
    async fn reminder_fires_after_delay() {
        let service = TimerNotificationService::new(tokio::runtime::Handle::current());
        let handle = service.schedule_reminder(request(Duration::from_millis(10)));
        assert_eq!(handle.outcome().await, Ok(()));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn cancel_after_timer_elapsed_still_suppresses_delivery() {
        let service = TimerNotificationService::new(tokio::runtime::Handle::current());
        let handle = service.schedule_reminder(request(Duration::ZERO));
        let id = handle.id();

        // The spawned task has not been polled yet on this single-threaded
        // runtime, so its timer is already due when the cancel lands.
        std::thread::sleep(Duration::from_millis(5));
        service.cancel_reminder(id).expect("unfired reminder cancels");
        assert_eq!(handle.outcome().await, Err(NotificationError::Cancelled));
    }

    #[tokio::test]
    async fn cancelled_reminder_reports_cancellation_once() {
        let service = TimerNotificationService::new(tokio::runtime::Handle::current());
        let handle = service.schedule_reminder(request(Duration::from_secs(60)));
        let id = handle.id();

        service.cancel_reminder(id).expect("pending reminder cancels");
        assert_eq!(handle.outcome().await, Err(NotificationError::Cancelled));
        assert_eq!(
            service.cancel_reminder(id),
            Err(NotificationError::UnknownReminder(id))
        );
    }
}
