use chrono::{Duration, NaiveDate};
use examcal_core::{ExamRecord, LocationSynthesizer};

fn exams(count: usize) -> Vec<ExamRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..count)
        .map(|offset| {
            ExamRecord::new(
                start + Duration::days(offset as i64),
                format!("Subject {offset}"),
            )
        })
        .collect()
}

#[test]
fn one_marker_per_exam_within_geographic_bounds() {
    let mut synthesizer = LocationSynthesizer::from_entropy();

    for count in [1, 3, 50, 500] {
        let input = exams(count);
        let markers = synthesizer.synthesize(&input);

        assert_eq!(markers.len(), count);
        for (marker, exam) in markers.iter().zip(&input) {
            assert_eq!(marker.date, exam.date);
            assert!((-90.0..=90.0).contains(&marker.latitude));
            assert!((-180.0..=180.0).contains(&marker.longitude));
        }
    }
}

#[test]
fn empty_schedule_yields_no_markers() {
    assert!(LocationSynthesizer::from_entropy().synthesize(&[]).is_empty());
}

#[test]
fn equal_seeds_reproduce_marker_sequences() {
    let input = exams(5);
    let first = LocationSynthesizer::seeded(2024).synthesize(&input);
    let second = LocationSynthesizer::seeded(2024).synthesize(&input);
    let other = LocationSynthesizer::seeded(2025).synthesize(&input);

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn coordinates_are_drawn_independently() {
    let markers = LocationSynthesizer::seeded(11).synthesize(&exams(20));
    let first = markers[0];
    assert!(markers
        .iter()
        .skip(1)
        .any(|m| m.latitude != first.latitude || m.longitude != first.longitude));
}

#[test]
fn thread_random_source_is_accepted() {
    let mut synthesizer = LocationSynthesizer::new(rand::rng());
    let markers = synthesizer.synthesize(&exams(4));
    assert!(markers.iter().all(|marker| marker.is_in_range()));
}
