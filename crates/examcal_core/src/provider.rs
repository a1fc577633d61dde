//! Schedule data provider contracts and built-in implementations.
//!
//! # Responsibility
//! - Define the seam through which the exam list enters the core.
//! - Provide the built-in fixed schedule and a JSON-document provider for
//!   shells that hand the list over as text.
//!
//! # Invariants
//! - Providers return exams in display order; the store keeps that order.
//! - An empty list is a valid result, never an error.

use crate::model::exam::RawExam;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure to obtain the exam list from a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Document could not be decoded into exam entries.
    Parse(String),
    /// Backing source could not be reached.
    Unavailable(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid exam schedule document: {message}"),
            Self::Unavailable(message) => write!(f, "exam schedule unavailable: {message}"),
        }
    }
}

impl Error for ProviderError {}

/// Source of the session's exam list.
pub trait ScheduleDataProvider {
    /// Returns the ordered exam entries for this session.
    fn fetch_exams(&self) -> ProviderResult<Vec<RawExam>>;
}

impl<T: ScheduleDataProvider + ?Sized> ScheduleDataProvider for &T {
    fn fetch_exams(&self) -> ProviderResult<Vec<RawExam>> {
        (**self).fetch_exams()
    }
}

/// Provider backed by an in-memory list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedScheduleProvider {
    exams: Vec<RawExam>,
}

impl FixedScheduleProvider {
    pub fn new(exams: Vec<RawExam>) -> Self {
        Self { exams }
    }

    /// The three-exam schedule shipped with the app.
    pub fn builtin() -> Self {
        Self::new(vec![
            RawExam::new("2024-02-20", "Math"),
            RawExam::new("2024-02-22", "Science"),
            RawExam::new("2024-02-25", "History"),
        ])
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl Default for FixedScheduleProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScheduleDataProvider for FixedScheduleProvider {
    fn fetch_exams(&self) -> ProviderResult<Vec<RawExam>> {
        Ok(self.exams.clone())
    }
}

/// Provider decoding a JSON array of `{ "date", "subject" }` objects.
///
/// Date strings are validated later by the exam store, so a document with
/// a bad date still parses here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonScheduleProvider {
    document: String,
}

impl JsonScheduleProvider {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl ScheduleDataProvider for JsonScheduleProvider {
    fn fetch_exams(&self) -> ProviderResult<Vec<RawExam>> {
        if self.document.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str::<Vec<RawExam>>(&self.document)
            .map_err(|err| ProviderError::Parse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedScheduleProvider, JsonScheduleProvider, ProviderError, ScheduleDataProvider};
    use crate::model::exam::RawExam;

    #[test]
    fn builtin_schedule_lists_three_exams_in_order() {
        let exams = FixedScheduleProvider::builtin().fetch_exams().unwrap();
        let subjects = exams
            .iter()
            .map(|exam| exam.subject.as_str())
            .collect::<Vec<_>>();
        assert_eq!(subjects, vec!["Math", "Science", "History"]);
    }

    #[test]
    fn json_provider_decodes_array_and_treats_blank_as_empty() {
        let provider = JsonScheduleProvider::new(
            r#"[{"date":"2024-03-01","subject":"Physics"},{"date":"2024-03-04","subject":"Art"}]"#,
        );
        assert_eq!(
            provider.fetch_exams().unwrap(),
            vec![
                RawExam::new("2024-03-01", "Physics"),
                RawExam::new("2024-03-04", "Art"),
            ]
        );
        assert!(JsonScheduleProvider::new("  ").fetch_exams().unwrap().is_empty());
    }

    #[test]
    fn json_provider_reports_shape_errors() {
        let err = JsonScheduleProvider::new(r#"{"date":"2024-03-01"}"#)
            .fetch_exams()
            .unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
