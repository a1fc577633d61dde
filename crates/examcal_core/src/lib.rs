//! Core logic for the exam schedule reminder app.
//! Calendar, map and notification delivery live in the UI shell; this crate
//! owns the exam list, day selection, reminder scheduling and map markers.

pub mod config;
pub mod controller;
pub mod location;
pub mod logging;
pub mod model;
pub mod provider;
pub mod reminder;
pub mod session;
pub mod store;
pub mod view;

pub use config::{ConfigError, SessionConfig};
pub use controller::{ReminderOptions, SelectionReminderController};
pub use location::LocationSynthesizer;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::exam::{
    format_iso_date, parse_iso_date, DateParseError, ExamDate, ExamRecord, RawExam,
};
pub use model::marker::GeoMarker;
pub use model::selection::SelectionState;
pub use provider::{
    FixedScheduleProvider, JsonScheduleProvider, ProviderError, ProviderResult,
    ScheduleDataProvider,
};
pub use reminder::{
    Clock, DelayStrategy, FixedClock, NotificationError, NotificationService, OutboxEntry,
    OutboxNotificationService, ReminderCompletion, ReminderHandle, ReminderId, ReminderRequest,
    SystemClock,
};
pub use session::{ExamSession, SessionError};
pub use store::{ExamStore, StoreError, StoreResult};
pub use view::{CalendarProjection, MapPin, MapProjection, MapRegion};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
