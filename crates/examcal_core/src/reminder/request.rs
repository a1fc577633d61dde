//! Reminder request payload.

use crate::model::exam::{ExamDate, ExamRecord};
use std::time::Duration;

/// Title used for exam reminders unless configured otherwise.
pub const DEFAULT_REMINDER_TITLE: &str = "Upcoming Exam";

/// Structured ask to the notification service to alert the user later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub title: String,
    pub body: String,
    /// Time from submission until the notification fires.
    pub delay: Duration,
    /// Day of the exam this reminder is about.
    pub exam_date: ExamDate,
}

impl ReminderRequest {
    pub fn for_exam(exam: &ExamRecord, title: impl Into<String>, delay: Duration) -> Self {
        Self {
            title: title.into(),
            body: reminder_body(&exam.subject),
            delay,
            exam_date: exam.date,
        }
    }
}

/// Notification body for an exam subject.
pub fn reminder_body(subject: &str) -> String {
    format!("You have an exam for {subject} tomorrow!")
}
