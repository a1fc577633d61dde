//! Synthetic map marker model.

use crate::model::exam::ExamDate;
use serde::{Deserialize, Serialize};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Placeholder coordinate pair derived for one exam.
///
/// `date` is a value copy of the owning exam's date, kept for traceability;
/// map views never join on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoMarker {
    pub date: ExamDate,
    /// Degrees in `[-90, 90]`.
    pub latitude: f64,
    /// Degrees in `[-180, 180]`.
    pub longitude: f64,
}

impl GeoMarker {
    /// Returns whether both coordinates lie within geographic bounds.
    pub fn is_in_range(&self) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::GeoMarker;
    use chrono::NaiveDate;

    #[test]
    fn range_check_includes_bounds_and_rejects_overflow() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
        let edge = GeoMarker {
            date,
            latitude: -90.0,
            longitude: 180.0,
        };
        assert!(edge.is_in_range());

        let outside = GeoMarker {
            date,
            latitude: 90.5,
            longitude: 0.0,
        };
        assert!(!outside.is_in_range());
    }
}
