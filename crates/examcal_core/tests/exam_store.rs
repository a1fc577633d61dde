use chrono::NaiveDate;
use examcal_core::{
    DateParseError, ExamStore, FixedScheduleProvider, JsonScheduleProvider, ProviderError,
    ProviderResult, RawExam, ScheduleDataProvider, StoreError,
};

struct OfflineProvider;

impl ScheduleDataProvider for OfflineProvider {
    fn fetch_exams(&self) -> ProviderResult<Vec<RawExam>> {
        Err(ProviderError::Unavailable("no network".to_string()))
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
}

#[test]
fn builtin_schedule_loads_in_provider_order() {
    let store = ExamStore::load(&FixedScheduleProvider::builtin()).unwrap();

    let loaded = store
        .exams()
        .iter()
        .map(|exam| (exam.date, exam.subject.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        loaded,
        vec![(day(20), "Math"), (day(22), "Science"), (day(25), "History")]
    );
    assert_eq!(store.find_by_date(day(22)).unwrap().subject, "Science");
    assert!(store.find_by_date(day(21)).is_none());
}

#[test]
fn empty_provider_is_a_valid_load() {
    let store = ExamStore::load(&FixedScheduleProvider::empty()).unwrap();
    assert!(store.is_empty());
    assert!(store.exams_on(day(20)).is_empty());
}

#[test]
fn json_document_loads_through_store() {
    let provider = JsonScheduleProvider::new(
        r#"[
            {"date": "2024-06-03", "subject": "Chemistry"},
            {"date": "2024-06-05", "subject": "Biology"}
        ]"#,
    );
    let store = ExamStore::load(&provider).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(
        store
            .find_by_date(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap())
            .unwrap()
            .subject,
        "Biology"
    );
}

#[test]
fn provider_failures_surface_as_store_errors() {
    let err = ExamStore::load(&OfflineProvider).unwrap_err();
    assert_eq!(
        err,
        StoreError::Provider(ProviderError::Unavailable("no network".to_string()))
    );

    let err = ExamStore::load(&JsonScheduleProvider::new("not json")).unwrap_err();
    assert!(matches!(err, StoreError::Provider(ProviderError::Parse(_))));
}

#[test]
fn impossible_calendar_day_fails_whole_load() {
    let provider = FixedScheduleProvider::new(vec![
        RawExam::new("2024-02-20", "Math"),
        RawExam::new("2024-02-30", "Science"),
    ]);
    let err = ExamStore::load(&provider).unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidDate {
            index: 1,
            source: DateParseError::NotACalendarDay("2024-02-30".to_string()),
        }
    );
}

#[test]
fn reload_replaces_wholesale_and_keeps_old_list_on_failure() {
    let mut store = ExamStore::load(&FixedScheduleProvider::builtin()).unwrap();

    store
        .reload(&FixedScheduleProvider::new(vec![RawExam::new(
            "2024-03-01",
            "Geography",
        )]))
        .unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.find_by_date(day(20)).is_none());

    assert!(store.reload(&OfflineProvider).is_err());
    assert_eq!(store.len(), 1);
    assert_eq!(store.exams()[0].subject, "Geography");
}
