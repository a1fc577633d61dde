//! Display projections for the calendar and map views.
//!
//! # Responsibility
//! - Shape core state into the flat data the external calendar and map
//!   widgets render.
//!
//! # Invariants
//! - Only the selected day is marked on the calendar.
//! - Pin labels are `Random Location {n}` with `n` counted from 1 in marker
//!   order.

use crate::model::exam::{format_iso_date, ExamDate, ExamRecord};
use crate::model::marker::GeoMarker;
use crate::model::selection::SelectionState;
use serde::Serialize;

/// Caption shown before the user taps any day.
pub const SELECT_DATE_PROMPT: &str = "Please select a date";

/// Calendar view input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarProjection {
    /// Days highlighted as selected.
    pub marked_dates: Vec<ExamDate>,
    /// `Selected Date: {date}` or the select-a-date prompt.
    pub selected_caption: String,
    /// Exams falling on the selected day.
    pub exams_on_selected: Vec<ExamRecord>,
    /// Full schedule as `{date} - {subject}` lines.
    pub exam_lines: Vec<String>,
}

pub fn calendar_projection(exams: &[ExamRecord], selection: SelectionState) -> CalendarProjection {
    let selected = selection.selected_date();
    let selected_caption = match selected {
        Some(date) => format!("Selected Date: {}", format_iso_date(date)),
        None => format!("Selected Date: {SELECT_DATE_PROMPT}"),
    };
    let exams_on_selected = match selected {
        Some(date) => exams
            .iter()
            .filter(|exam| exam.date == date)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    CalendarProjection {
        marked_dates: selected.into_iter().collect(),
        selected_caption,
        exams_on_selected,
        exam_lines: exams.iter().map(ExamRecord::display_line).collect(),
    }
}

/// Visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Whole-world view centered on (0, 0).
    pub const WORLD: MapRegion = MapRegion {
        latitude: 0.0,
        longitude: 0.0,
        latitude_delta: 90.0,
        longitude_delta: 180.0,
    };
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::WORLD
    }
}

/// One labelled map pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPin {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: ExamDate,
}

/// Map view input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapProjection {
    pub region: MapRegion,
    pub pins: Vec<MapPin>,
}

pub fn map_projection(markers: &[GeoMarker]) -> MapProjection {
    let pins = markers
        .iter()
        .enumerate()
        .map(|(index, marker)| MapPin {
            label: marker_label(index),
            latitude: marker.latitude,
            longitude: marker.longitude,
            date: marker.date,
        })
        .collect();
    MapProjection {
        region: MapRegion::WORLD,
        pins,
    }
}

pub fn marker_label(index: usize) -> String {
    format!("Random Location {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::{calendar_projection, map_projection, marker_label, MapRegion};
    use crate::model::exam::ExamRecord;
    use crate::model::marker::GeoMarker;
    use crate::model::selection::SelectionState;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn unselected_calendar_prompts_and_marks_nothing() {
        let exams = vec![ExamRecord::new(day(20), "Math")];
        let projection = calendar_projection(&exams, SelectionState::Unselected);

        assert!(projection.marked_dates.is_empty());
        assert_eq!(
            projection.selected_caption,
            "Selected Date: Please select a date"
        );
        assert!(projection.exams_on_selected.is_empty());
        assert_eq!(projection.exam_lines, vec!["2024-02-20 - Math"]);
    }

    #[test]
    fn selected_calendar_marks_day_and_filters_exams() {
        let exams = vec![
            ExamRecord::new(day(20), "Math"),
            ExamRecord::new(day(22), "Science"),
        ];
        let projection = calendar_projection(&exams, SelectionState::Selected(day(22)));

        assert_eq!(projection.marked_dates, vec![day(22)]);
        assert_eq!(projection.selected_caption, "Selected Date: 2024-02-22");
        assert_eq!(projection.exams_on_selected, vec![exams[1].clone()]);
        assert_eq!(projection.exam_lines.len(), 2);
    }

    #[test]
    fn map_pins_are_labelled_from_one() {
        let markers = vec![
            GeoMarker {
                date: day(20),
                latitude: 10.0,
                longitude: -20.0,
            },
            GeoMarker {
                date: day(22),
                latitude: -45.5,
                longitude: 170.0,
            },
        ];
        let projection = map_projection(&markers);

        assert_eq!(projection.region, MapRegion::WORLD);
        assert_eq!(projection.pins[0].label, "Random Location 1");
        assert_eq!(projection.pins[1].label, "Random Location 2");
        assert_eq!(projection.pins[1].longitude, 170.0);
        assert_eq!(marker_label(9), "Random Location 10");
    }
}
