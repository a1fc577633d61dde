//! FFI use-case API for the Flutter exam calendar shell.
//!
//! # Responsibility
//! - Expose session start, day selection and view projections to Dart via FRB.
//! - Hand queued reminders to the shell for platform delivery and take the
//!   platform's answer back.
//! - Tell the shell which handed-over reminders were cancelled.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Exactly one exam session exists per process; starting again replaces it.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.

use crate::shell::ShellNotificationService;
use examcal_core::{
    core_version as core_version_inner, format_iso_date, init_logging as init_logging_inner,
    ExamSession, FixedScheduleProvider, JsonScheduleProvider, NotificationError,
    NotificationService, ReminderHandle, ReminderId, SessionConfig,
};
use log::{info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

static SESSION_STATE: Mutex<Option<SessionState>> = Mutex::new(None);

struct SessionState {
    session: ExamSession<Arc<ShellNotificationService>>,
    notifier: Arc<ShellNotificationService>,
    /// Submitted reminders whose outcome has not been observed yet.
    submitted: Vec<ReminderHandle>,
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Exam row for calendar and list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamItem {
    pub date: String,
    pub subject: String,
}

/// Calendar view payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarResponse {
    pub ok: bool,
    pub message: String,
    pub marked_dates: Vec<String>,
    pub selected_caption: String,
    pub exams_on_selected: Vec<ExamItem>,
    pub exam_lines: Vec<String>,
}

/// One map pin.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPinItem {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Map view payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MapResponse {
    pub ok: bool,
    pub message: String,
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    pub pins: Vec<MapPinItem>,
}

/// Day selection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectDateResponse {
    pub ok: bool,
    pub message: String,
    pub selected_date: Option<String>,
    /// Present when a reminder was queued for the selected day.
    pub reminder_id: Option<String>,
}

/// Reminder the shell should post through the platform notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReminderItem {
    pub reminder_id: String,
    pub title: String,
    pub body: String,
    pub delay_seconds: u64,
}

/// Starts (or restarts) the process-wide exam session.
///
/// Input semantics:
/// - `exams_json`: JSON array of `{date, subject}`; `None` uses the built-in
///   schedule.
/// - `config_json`: session config document; `None` or blank uses defaults.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics; a failed start keeps the previous session.
#[flutter_rust_bridge::frb(sync)]
pub fn session_start(exams_json: Option<String>, config_json: Option<String>) -> ActionResponse {
    let config = match SessionConfig::from_json(config_json.as_deref().unwrap_or_default()) {
        Ok(config) => config,
        Err(err) => return ActionResponse::failure(format!("session_start failed: {err}")),
    };

    let notifier = Arc::new(ShellNotificationService::new());
    let started = match exams_json {
        Some(document) => ExamSession::start(
            &JsonScheduleProvider::new(document),
            Arc::clone(&notifier),
            &config,
        ),
        None => ExamSession::start(
            &FixedScheduleProvider::builtin(),
            Arc::clone(&notifier),
            &config,
        ),
    };

    match started {
        Ok(session) => {
            let count = session.exams().len();
            *lock_state() = Some(SessionState {
                session,
                notifier,
                submitted: Vec::new(),
            });
            info!("event=ffi_session_start module=ffi status=ok exams={count}");
            ActionResponse::success(format!("Loaded {count} exam(s)."))
        }
        Err(err) => ActionResponse::failure(format!("session_start failed: {err}")),
    }
}

/// Returns the calendar view payload for the active session.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics; returns `ok=false` when no session is active.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_view() -> CalendarResponse {
    let guard = lock_state();
    let Some(state) = guard.as_ref() else {
        return CalendarResponse {
            ok: false,
            message: no_session_message(),
            marked_dates: Vec::new(),
            selected_caption: String::new(),
            exams_on_selected: Vec::new(),
            exam_lines: Vec::new(),
        };
    };

    let projection = state.session.calendar();
    CalendarResponse {
        ok: true,
        message: String::new(),
        marked_dates: projection
            .marked_dates
            .into_iter()
            .map(format_iso_date)
            .collect(),
        selected_caption: projection.selected_caption,
        exams_on_selected: projection
            .exams_on_selected
            .into_iter()
            .map(|exam| ExamItem {
                date: format_iso_date(exam.date),
                subject: exam.subject,
            })
            .collect(),
        exam_lines: projection.exam_lines,
    }
}

/// Returns the map view payload for the active session.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics; returns `ok=false` when no session is active.
#[flutter_rust_bridge::frb(sync)]
pub fn map_view() -> MapResponse {
    let guard = lock_state();
    let projection = match guard.as_ref() {
        Some(state) => state.session.map(),
        None => {
            return MapResponse {
                ok: false,
                message: no_session_message(),
                center_latitude: 0.0,
                center_longitude: 0.0,
                latitude_delta: 0.0,
                longitude_delta: 0.0,
                pins: Vec::new(),
            }
        }
    };

    MapResponse {
        ok: true,
        message: String::new(),
        center_latitude: projection.region.latitude,
        center_longitude: projection.region.longitude,
        latitude_delta: projection.region.latitude_delta,
        longitude_delta: projection.region.longitude_delta,
        pins: projection
            .pins
            .into_iter()
            .map(|pin| MapPinItem {
                label: pin.label,
                latitude: pin.latitude,
                longitude: pin.longitude,
            })
            .collect(),
    }
}

/// Handles a calendar day tap.
///
/// # FFI contract
/// - Sync call, in-memory only; never waits for notification delivery.
/// - Never panics; invalid date strings return `ok=false` and leave the
///   selection unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn select_date(date: String) -> SelectDateResponse {
    let mut guard = lock_state();
    let Some(state) = guard.as_mut() else {
        return SelectDateResponse {
            ok: false,
            message: no_session_message(),
            selected_date: None,
            reminder_id: None,
        };
    };

    match state.session.select_date_str(&date) {
        Ok(handle) => {
            let selected_date = state.session.selection().selected_date().map(format_iso_date);
            let reminder_id = handle.as_ref().map(|handle| handle.id().to_string());
            let message = if handle.is_some() {
                "Reminder scheduled."
            } else {
                "No exam on this date."
            };
            state.submitted.extend(handle);
            observe_submitted(state);
            SelectDateResponse {
                ok: true,
                message: message.to_string(),
                selected_date,
                reminder_id,
            }
        }
        Err(err) => SelectDateResponse {
            ok: false,
            message: format!("select_date failed: {err}"),
            selected_date: state.session.selection().selected_date().map(format_iso_date),
            reminder_id: None,
        },
    }
}

/// Drains reminders queued since the last call.
///
/// The shell posts each one through the platform notifier and then reports
/// the result with `report_reminder_outcome`.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics; returns an empty list when no session is active.
#[flutter_rust_bridge::frb(sync)]
pub fn take_pending_reminders() -> Vec<PendingReminderItem> {
    let mut guard = lock_state();
    let Some(state) = guard.as_mut() else {
        return Vec::new();
    };

    let items: Vec<PendingReminderItem> = state
        .notifier
        .hand_over()
        .into_iter()
        .map(|(id, request)| PendingReminderItem {
            reminder_id: id.to_string(),
            title: request.title,
            body: request.body,
            delay_seconds: request.delay.as_secs(),
        })
        .collect();
    if !items.is_empty() {
        info!(
            "event=ffi_reminders_taken module=ffi status=ok taken={} delivering={}",
            items.len(),
            state.notifier.delivering_len()
        );
    }
    observe_submitted(state);
    items
}

/// Drains ids of handed-over reminders cancelled since the last call.
///
/// The shell withdraws each one from the platform notifier. Reminders
/// replaced by a repeated tap show up here.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics; returns an empty list when no session is active.
#[flutter_rust_bridge::frb(sync)]
pub fn take_cancelled_reminders() -> Vec<String> {
    let guard = lock_state();
    let Some(state) = guard.as_ref() else {
        return Vec::new();
    };
    state
        .notifier
        .take_retracted()
        .into_iter()
        .map(|id| id.to_string())
        .collect()
}

/// Cancels a reminder that has not been settled yet.
///
/// A reminder already taken by the shell is also listed by
/// `take_cancelled_reminders`.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics; unknown or settled ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn cancel_reminder(reminder_id: String) -> ActionResponse {
    let mut guard = lock_state();
    let Some(state) = guard.as_mut() else {
        return ActionResponse::failure(no_session_message());
    };
    let id = match ReminderId::parse_str(&reminder_id) {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(format!("cancel_reminder failed: {err}")),
    };

    let result = state.notifier.cancel_reminder(id);
    observe_submitted(state);
    match result {
        Ok(()) => ActionResponse::success("Reminder cancelled."),
        Err(err) => ActionResponse::failure(format!("cancel_reminder failed: {err}")),
    }
}

/// Reports the platform's answer for a reminder taken by the shell.
///
/// Input semantics:
/// - `error`: `None` when the platform accepted the notification, otherwise
///   the platform's error text. `"permission_denied"` maps to a permission
///   failure.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics; unknown ids return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn report_reminder_outcome(reminder_id: String, error: Option<String>) -> ActionResponse {
    let mut guard = lock_state();
    let Some(state) = guard.as_mut() else {
        return ActionResponse::failure(no_session_message());
    };
    let id = match ReminderId::parse_str(&reminder_id) {
        Ok(id) => id,
        Err(err) => {
            return ActionResponse::failure(format!("report_reminder_outcome failed: {err}"))
        }
    };
    let outcome = match error.as_deref().map(str::trim) {
        None | Some("") => Ok(()),
        Some("permission_denied") => Err(NotificationError::PermissionDenied),
        Some(other) => Err(NotificationError::Rejected(other.to_string())),
    };

    let result = state.notifier.report(id, outcome);
    observe_submitted(state);
    match result {
        Ok(()) => ActionResponse::success("Outcome recorded."),
        Err(err) => ActionResponse::failure(format!("report_reminder_outcome failed: {err}")),
    }
}

/// Logs settled reminder outcomes and forgets their handles.
fn observe_submitted(state: &mut SessionState) {
    state.submitted.retain_mut(|handle| match handle.try_outcome() {
        None => true,
        Some(Ok(())) => {
            info!(
                "event=reminder_outcome module=ffi status=ok reminder_id={}",
                handle.id()
            );
            false
        }
        Some(Err(err)) => {
            warn!(
                "event=reminder_outcome module=ffi status=error reminder_id={} error={}",
                handle.id(),
                err
            );
            false
        }
    });
}

fn lock_state() -> MutexGuard<'static, Option<SessionState>> {
    SESSION_STATE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn no_session_message() -> String {
    "no exam session; call session_start first".to_string()
}
