//! Exam session use-case facade.
//!
//! # Responsibility
//! - Run the startup pipeline: load the store, then synthesize markers from
//!   the same list.
//! - Route calendar taps to the selection–reminder controller.
//! - Serve calendar and map projections to the UI shell.
//!
//! # Invariants
//! - Markers always correspond one-to-one with the store's exams.
//! - A failed reload leaves exams, markers and selection unchanged.

use crate::config::SessionConfig;
use crate::controller::SelectionReminderController;
use crate::location::LocationSynthesizer;
use crate::model::exam::{DateParseError, ExamDate, ExamRecord};
use crate::model::marker::GeoMarker;
use crate::model::selection::SelectionState;
use crate::provider::ScheduleDataProvider;
use crate::reminder::{Clock, NotificationService, ReminderHandle, SystemClock};
use crate::store::{ExamStore, StoreError};
use crate::view::{calendar_projection, map_projection, CalendarProjection, MapProjection};
use log::info;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Store(StoreError),
    Date(DateParseError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Date(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Date(err) => Some(err),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DateParseError> for SessionError {
    fn from(value: DateParseError) -> Self {
        Self::Date(value)
    }
}

/// One user session over a loaded exam schedule.
pub struct ExamSession<N: NotificationService, C: Clock = SystemClock> {
    store: ExamStore,
    markers: Vec<GeoMarker>,
    controller: SelectionReminderController<N, C>,
}

impl<N: NotificationService> ExamSession<N, SystemClock> {
    /// Starts a session with the wall clock and configured synthesizer.
    pub fn start<P: ScheduleDataProvider + ?Sized>(
        provider: &P,
        notifier: N,
        config: &SessionConfig,
    ) -> Result<Self, SessionError> {
        let controller =
            SelectionReminderController::with_options(notifier, config.reminder.clone());
        match config.location_seed {
            Some(seed) => {
                Self::start_with(provider, &mut LocationSynthesizer::seeded(seed), controller)
            }
            None => {
                Self::start_with(provider, &mut LocationSynthesizer::from_entropy(), controller)
            }
        }
    }
}

impl<N: NotificationService, C: Clock> ExamSession<N, C> {
    /// Starts a session from explicit collaborators.
    pub fn start_with<P: ScheduleDataProvider + ?Sized, R: Rng>(
        provider: &P,
        synthesizer: &mut LocationSynthesizer<R>,
        controller: SelectionReminderController<N, C>,
    ) -> Result<Self, SessionError> {
        let store = ExamStore::load(provider)?;
        let markers = synthesizer.synthesize(store.exams());
        info!(
            "event=session_start module=session status=ok exams={} markers={}",
            store.len(),
            markers.len()
        );
        Ok(Self {
            store,
            markers,
            controller,
        })
    }

    /// Replaces the exam list and re-derives markers in one pass.
    pub fn reload<P: ScheduleDataProvider + ?Sized, R: Rng>(
        &mut self,
        provider: &P,
        synthesizer: &mut LocationSynthesizer<R>,
    ) -> Result<(), SessionError> {
        let store = ExamStore::load(provider)?;
        self.markers = synthesizer.synthesize(store.exams());
        self.store = store;
        info!(
            "event=session_reload module=session status=ok exams={}",
            self.store.len()
        );
        Ok(())
    }

    pub fn exams(&self) -> &[ExamRecord] {
        self.store.exams()
    }

    pub fn store(&self) -> &ExamStore {
        &self.store
    }

    pub fn markers(&self) -> &[GeoMarker] {
        &self.markers
    }

    pub fn selection(&self) -> SelectionState {
        self.controller.selection()
    }

    pub fn controller(&self) -> &SelectionReminderController<N, C> {
        &self.controller
    }

    /// Handles a calendar day tap.
    pub fn select_date(&mut self, date: ExamDate) -> Option<ReminderHandle> {
        self.controller.on_date_selected(date, self.store.exams())
    }

    /// Handles a calendar day tap carrying a `YYYY-MM-DD` string.
    pub fn select_date_str(
        &mut self,
        value: &str,
    ) -> Result<Option<ReminderHandle>, SessionError> {
        Ok(self
            .controller
            .on_date_string_selected(value, self.store.exams())?)
    }

    pub fn calendar(&self) -> CalendarProjection {
        calendar_projection(self.store.exams(), self.controller.selection())
    }

    pub fn map(&self) -> MapProjection {
        map_projection(&self.markers)
    }
}
