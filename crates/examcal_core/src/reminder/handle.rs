//! Handles for submitted reminder requests.
//!
//! # Responsibility
//! - Identify each submitted request with a stable `ReminderId`.
//! - Carry the one-shot delivery outcome from the notification service back
//!   to whichever shell wants to observe it.
//!
//! # Invariants
//! - A service reports at most one outcome per handle; once observed, the
//!   handle keeps returning that same outcome.
//! - A completion dropped without reporting resolves the handle as
//!   `NotificationError::Abandoned`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use uuid::Uuid;

/// Stable identifier of one submitted reminder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReminderId(Uuid);

impl ReminderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse_str(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value.trim()).map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReminderId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ReminderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reminder scheduling failure reported by a notification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Platform refused to post notifications (e.g. permission denied).
    PermissionDenied,
    /// Service rejected the request for another reason.
    Rejected(String),
    /// Request was cancelled before it fired.
    Cancelled,
    /// Service dropped the request without reporting an outcome.
    Abandoned,
    /// Service cannot retract submitted reminders.
    CancellationUnsupported,
    /// No pending reminder carries this id.
    UnknownReminder(ReminderId),
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission denied"),
            Self::Rejected(reason) => write!(f, "reminder rejected: {reason}"),
            Self::Cancelled => write!(f, "reminder cancelled"),
            Self::Abandoned => write!(f, "reminder dropped without outcome"),
            Self::CancellationUnsupported => {
                write!(f, "notification service cannot cancel reminders")
            }
            Self::UnknownReminder(id) => write!(f, "no pending reminder with id {id}"),
        }
    }
}

impl Error for NotificationError {}

pub type ReminderOutcome = Result<(), NotificationError>;

/// Caller side of a submitted reminder request.
#[derive(Debug)]
pub struct ReminderHandle {
    id: ReminderId,
    outcome: oneshot::Receiver<ReminderOutcome>,
    settled: Option<ReminderOutcome>,
}

/// Service side of a submitted reminder request.
#[derive(Debug)]
pub struct ReminderCompletion {
    id: ReminderId,
    sender: oneshot::Sender<ReminderOutcome>,
}

impl ReminderHandle {
    /// Creates a connected handle/completion pair with a fresh id.
    pub fn pending() -> (ReminderHandle, ReminderCompletion) {
        let id = ReminderId::new();
        let (sender, outcome) = oneshot::channel();
        (
            ReminderHandle {
                id,
                outcome,
                settled: None,
            },
            ReminderCompletion { id, sender },
        )
    }

    /// Creates a handle whose outcome is already known.
    pub fn resolved(outcome: ReminderOutcome) -> Self {
        let (handle, completion) = Self::pending();
        completion.complete(outcome);
        handle
    }

    pub fn id(&self) -> ReminderId {
        self.id
    }

    /// Polls the outcome without blocking.
    ///
    /// Returns `None` while the service has not reported yet.
    pub fn try_outcome(&mut self) -> Option<ReminderOutcome> {
        if self.settled.is_none() {
            self.settled = match self.outcome.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => Some(Err(NotificationError::Abandoned)),
            };
        }
        self.settled.clone()
    }

    /// Waits for the service to report the outcome.
    pub async fn outcome(self) -> ReminderOutcome {
        if let Some(outcome) = self.settled {
            return outcome;
        }
        self.outcome
            .await
            .unwrap_or(Err(NotificationError::Abandoned))
    }
}

impl ReminderCompletion {
    pub fn id(&self) -> ReminderId {
        self.id
    }

    /// Reports the outcome; a handle that was already dropped is ignored.
    pub fn complete(self, outcome: ReminderOutcome) {
        let _ = self.sender.send(outcome);
    }
}
