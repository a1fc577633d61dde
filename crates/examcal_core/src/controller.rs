//! Selection–reminder controller.
//!
//! # Responsibility
//! - Record calendar day taps as the current selection.
//! - Submit one reminder request per tap that lands on an exam day.
//!
//! # Invariants
//! - Selection is overwritten on every tap, matched or not.
//! - A tap with no matching exam schedules nothing and is not an error.
//! - Repeated taps on the same day submit repeated reminders unless
//!   `replace_existing` is set, in which case the previous pending reminder
//!   for that day is cancelled first.
//! - The controller never waits on the notification service.

use crate::model::exam::{parse_iso_date, DateParseError, ExamDate, ExamRecord};
use crate::model::selection::SelectionState;
use crate::reminder::{
    Clock, DelayStrategy, NotificationService, ReminderHandle, ReminderId, ReminderRequest,
    SystemClock, DEFAULT_REMINDER_TITLE,
};
use crate::store::find_exam_by_date;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reminder behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderOptions {
    /// Notification title.
    pub title: String,
    pub delay: DelayStrategy,
    /// Cancel the previous pending reminder for the same exam day before
    /// submitting a new one.
    pub replace_existing: bool,
}

impl Default for ReminderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_REMINDER_TITLE.to_string(),
            delay: DelayStrategy::default(),
            replace_existing: false,
        }
    }
}

/// Binds calendar day selection to reminder scheduling.
pub struct SelectionReminderController<N: NotificationService, C: Clock = SystemClock> {
    notifier: N,
    clock: C,
    options: ReminderOptions,
    selection: SelectionState,
    pending: HashMap<ExamDate, ReminderId>,
}

impl<N: NotificationService> SelectionReminderController<N, SystemClock> {
    pub fn new(notifier: N) -> Self {
        Self::with_options(notifier, ReminderOptions::default())
    }

    pub fn with_options(notifier: N, options: ReminderOptions) -> Self {
        Self::with_clock(notifier, SystemClock, options)
    }
}

impl<N: NotificationService, C: Clock> SelectionReminderController<N, C> {
    pub fn with_clock(notifier: N, clock: C, options: ReminderOptions) -> Self {
        Self {
            notifier,
            clock,
            options,
            selection: SelectionState::Unselected,
            pending: HashMap::new(),
        }
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn selected_date(&self) -> Option<ExamDate> {
        self.selection.selected_date()
    }

    pub fn options(&self) -> &ReminderOptions {
        &self.options
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Handles one calendar day tap.
    ///
    /// Returns the submitted reminder's handle, or `None` when no exam falls
    /// on `date`. The handle may be dropped; the reminder stays scheduled.
    pub fn on_date_selected(
        &mut self,
        date: ExamDate,
        exams: &[ExamRecord],
    ) -> Option<ReminderHandle> {
        self.selection.select(date);

        let Some(exam) = find_exam_by_date(exams, date) else {
            debug!("event=date_selected module=controller status=no_exam date={date}");
            return None;
        };

        let delay = self.options.delay.delay_for(exam.date, self.clock.now());
        let request = ReminderRequest::for_exam(exam, self.options.title.as_str(), delay);

        if self.options.replace_existing {
            self.cancel_pending(exam.date);
        }

        let handle = self.notifier.schedule_reminder(request);
        if self.options.replace_existing {
            self.pending.insert(exam.date, handle.id());
        }

        info!(
            "event=reminder_submitted module=controller status=ok date={} reminder_id={} delay_ms={}",
            exam.date,
            handle.id(),
            delay.as_millis()
        );
        Some(handle)
    }

    /// Handles a day tap carrying the calendar's `YYYY-MM-DD` string.
    ///
    /// # Errors
    /// - Returns `DateParseError` when `value` is not a calendar day; the
    ///   selection is left unchanged in that case.
    pub fn on_date_string_selected(
        &mut self,
        value: &str,
        exams: &[ExamRecord],
    ) -> Result<Option<ReminderHandle>, DateParseError> {
        let date = parse_iso_date(value)?;
        Ok(self.on_date_selected(date, exams))
    }

    fn cancel_pending(&mut self, date: ExamDate) {
        let Some(previous) = self.pending.remove(&date) else {
            return;
        };
        match self.notifier.cancel_reminder(previous) {
            Ok(()) => debug!(
                "event=reminder_replaced module=controller status=ok date={date} reminder_id={previous}"
            ),
            Err(err) => warn!(
                "event=reminder_replaced module=controller status=cancel_failed date={date} reminder_id={previous} error={err}"
            ),
        }
    }
}
