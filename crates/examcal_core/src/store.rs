//! In-memory exam store.
//!
//! # Responsibility
//! - Load the session's exam list once from a schedule data provider.
//! - Answer day lookups for the controller and the calendar projection.
//!
//! # Invariants
//! - Records keep provider order.
//! - A load either validates every entry or fails as a whole; invalid
//!   provider data is rejected instead of masked.
//! - Reload replaces the list wholesale; there is no incremental merge.

use crate::model::exam::{DateParseError, ExamDate, ExamRecord, RawExam};
use crate::provider::{ProviderError, ScheduleDataProvider};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Exam store load error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Provider(ProviderError),
    InvalidDate {
        /// Zero-based position of the offending entry in provider order.
        index: usize,
        source: DateParseError,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(err) => write!(f, "{err}"),
            Self::InvalidDate { index, source } => {
                write!(f, "exam #{} has an invalid date: {source}", index + 1)
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
            Self::InvalidDate { source, .. } => Some(source),
        }
    }
}

impl From<ProviderError> for StoreError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

/// Authoritative exam list for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamStore {
    exams: Vec<ExamRecord>,
}

impl ExamStore {
    /// Loads the exam list from `provider`.
    ///
    /// # Errors
    /// - Returns `StoreError::Provider` when the provider fails.
    /// - Returns `StoreError::InvalidDate` for the first unparsable date.
    pub fn load<P: ScheduleDataProvider + ?Sized>(provider: &P) -> StoreResult<Self> {
        let exams = records_from_raw(provider.fetch_exams()?)?;
        info!(
            "event=exam_store_load module=store status=ok count={}",
            exams.len()
        );
        Ok(Self { exams })
    }

    /// Builds a store from already validated records.
    pub fn from_records(exams: Vec<ExamRecord>) -> Self {
        Self { exams }
    }

    /// Reloads from `provider`, replacing the list wholesale.
    ///
    /// On error the previous list is kept untouched.
    pub fn reload<P: ScheduleDataProvider + ?Sized>(&mut self, provider: &P) -> StoreResult<()> {
        *self = Self::load(provider)?;
        Ok(())
    }

    pub fn exams(&self) -> &[ExamRecord] {
        &self.exams
    }

    pub fn len(&self) -> usize {
        self.exams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }

    /// Returns the first exam scheduled on `date`.
    pub fn find_by_date(&self, date: ExamDate) -> Option<&ExamRecord> {
        find_exam_by_date(&self.exams, date)
    }

    /// Returns every exam scheduled on `date`, in store order.
    pub fn exams_on(&self, date: ExamDate) -> Vec<&ExamRecord> {
        self.exams.iter().filter(|exam| exam.date == date).collect()
    }
}

/// Linear first-match lookup by day.
pub fn find_exam_by_date(exams: &[ExamRecord], date: ExamDate) -> Option<&ExamRecord> {
    exams.iter().find(|exam| exam.date == date)
}

fn records_from_raw(raw: Vec<RawExam>) -> StoreResult<Vec<ExamRecord>> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());
    for (index, entry) in raw.into_iter().enumerate() {
        let record = ExamRecord::try_from(entry)
            .map_err(|source| StoreError::InvalidDate { index, source })?;
        if !seen.insert(record.date) {
            // Lookup keeps first-match semantics, so later entries on the same
            // day stay listed but never get a reminder.
            warn!(
                "event=exam_store_load module=store status=duplicate_date date={} index={}",
                record.date, index
            );
        }
        records.push(record);
    }
    Ok(records)
}
