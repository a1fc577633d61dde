//! Exam record model and ISO date parsing.
//!
//! # Responsibility
//! - Define the provider wire shape (`RawExam`) and the validated record
//!   (`ExamRecord`) used by store, controller and synthesizer.
//! - Parse calendar day strings emitted by the calendar view.
//!
//! # Invariants
//! - Accepted date strings are exactly `YYYY-MM-DD` and name a real day.
//! - Subjects are stored trimmed.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso day regex"));

const ISO_DAY_FORMAT: &str = "%Y-%m-%d";

/// Calendar day of an exam.
pub type ExamDate = NaiveDate;

/// Exam entry as handed over by a schedule data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExam {
    /// ISO day string, `YYYY-MM-DD`.
    pub date: String,
    /// Display name of the exam subject.
    pub subject: String,
}

impl RawExam {
    pub fn new(date: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            subject: subject.into(),
        }
    }
}

/// Validated exam record held by the exam store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Serialized as `YYYY-MM-DD`.
    pub date: ExamDate,
    pub subject: String,
}

impl ExamRecord {
    pub fn new(date: ExamDate, subject: impl Into<String>) -> Self {
        Self {
            date,
            subject: subject.into().trim().to_string(),
        }
    }

    /// Returns the `"{date} - {subject}"` line used by exam list views.
    pub fn display_line(&self) -> String {
        format!("{} - {}", format_iso_date(self.date), self.subject)
    }
}

impl TryFrom<RawExam> for ExamRecord {
    type Error = DateParseError;

    fn try_from(value: RawExam) -> Result<Self, Self::Error> {
        let date = parse_iso_date(&value.date)?;
        Ok(Self::new(date, value.subject))
    }
}

impl From<&ExamRecord> for RawExam {
    fn from(value: &ExamRecord) -> Self {
        Self {
            date: format_iso_date(value.date),
            subject: value.subject.clone(),
        }
    }
}

/// Error for calendar day strings that cannot be used as exam dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    Empty,
    /// Input is not shaped like `YYYY-MM-DD`.
    Malformed(String),
    /// Input is shaped correctly but names no real day (e.g. `2024-02-30`).
    NotACalendarDay(String),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date must not be empty"),
            Self::Malformed(value) => {
                write!(f, "date `{value}` is not in YYYY-MM-DD form")
            }
            Self::NotACalendarDay(value) => write!(f, "date `{value}` is not a calendar day"),
        }
    }
}

impl Error for DateParseError {}

/// Parses one calendar day string.
///
/// Surrounding whitespace is ignored. Single-digit months or days are
/// rejected even though `chrono` would accept them.
pub fn parse_iso_date(value: &str) -> Result<ExamDate, DateParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }
    if !ISO_DAY_RE.is_match(trimmed) {
        return Err(DateParseError::Malformed(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, ISO_DAY_FORMAT)
        .map_err(|_| DateParseError::NotACalendarDay(trimmed.to_string()))
}

/// Formats a day as `YYYY-MM-DD`.
pub fn format_iso_date(date: ExamDate) -> String {
    date.format(ISO_DAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_iso_date, parse_iso_date, DateParseError, ExamRecord, RawExam};
    use chrono::NaiveDate;

    #[test]
    fn parse_accepts_padded_iso_day() {
        let date = parse_iso_date(" 2024-02-22 ").expect("valid day");
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 22).unwrap());
        assert_eq!(format_iso_date(date), "2024-02-22");
    }

    #[test]
    fn parse_rejects_unpadded_and_impossible_days() {
        assert_eq!(
            parse_iso_date("2024-2-5").unwrap_err(),
            DateParseError::Malformed("2024-2-5".to_string())
        );
        assert_eq!(
            parse_iso_date("2023-02-29").unwrap_err(),
            DateParseError::NotACalendarDay("2023-02-29".to_string())
        );
        assert_eq!(parse_iso_date("   ").unwrap_err(), DateParseError::Empty);
    }

    #[test]
    fn raw_exam_converts_and_trims_subject() {
        let record = ExamRecord::try_from(RawExam::new("2024-02-20", "  Math ")).unwrap();
        assert_eq!(record.subject, "Math");
        assert_eq!(record.display_line(), "2024-02-20 - Math");

        let raw = RawExam::from(&record);
        assert_eq!(raw, RawExam::new("2024-02-20", "Math"));
    }

    #[test]
    fn record_serializes_date_as_iso_string() {
        let record = ExamRecord::new(NaiveDate::from_ymd_opt(2024, 2, 25).unwrap(), "History");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-02-25");
        assert_eq!(json["subject"], "History");
    }
}
