//! Trigger delay strategies and the clock they read.
//!
//! All times are naive local times; timezone handling is out of scope.

use crate::model::exam::ExamDate;
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Short interval used while testing reminders on a device.
pub const DEFAULT_TEST_DELAY_SECS: u64 = 5;

/// Mapping from an exam day to a reminder trigger delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DelayStrategy {
    /// Fire after a constant number of seconds, regardless of the exam day.
    Fixed { seconds: u64 },
    /// Fire on the day before the exam at `remind_at`.
    ///
    /// A trigger time already in the past fires immediately.
    DayBefore { remind_at: NaiveTime },
}

impl Default for DelayStrategy {
    fn default() -> Self {
        Self::Fixed {
            seconds: DEFAULT_TEST_DELAY_SECS,
        }
    }
}

impl DelayStrategy {
    pub fn delay_for(&self, exam_date: ExamDate, now: NaiveDateTime) -> Duration {
        match self {
            Self::Fixed { seconds } => Duration::from_secs(*seconds),
            Self::DayBefore { remind_at } => {
                let Some(day_before) = exam_date.pred_opt() else {
                    return Duration::ZERO;
                };
                (day_before.and_time(*remind_at) - now)
                    .to_std()
                    .unwrap_or(Duration::ZERO)
            }
        }
    }
}

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::DelayStrategy;
    use chrono::{NaiveDate, NaiveTime};
    use std::time::Duration;

    fn at(d: u32, h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn default_is_five_second_test_interval() {
        let exam = NaiveDate::from_ymd_opt(2024, 2, 22).unwrap();
        assert_eq!(
            DelayStrategy::default().delay_for(exam, at(1, 0, 0)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn day_before_counts_down_to_previous_evening() {
        let strategy = DelayStrategy::DayBefore {
            remind_at: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        };
        let exam = NaiveDate::from_ymd_opt(2024, 2, 22).unwrap();

        assert_eq!(
            strategy.delay_for(exam, at(21, 17, 30)),
            Duration::from_secs(30 * 60)
        );
        assert_eq!(
            strategy.delay_for(exam, at(20, 18, 0)),
            Duration::from_secs(24 * 60 * 60)
        );
    }

    #[test]
    fn day_before_in_the_past_fires_immediately() {
        let strategy = DelayStrategy::DayBefore {
            remind_at: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        };
        let exam = NaiveDate::from_ymd_opt(2024, 2, 22).unwrap();
        assert_eq!(strategy.delay_for(exam, at(21, 10, 0)), Duration::ZERO);
    }

    #[test]
    fn strategy_config_uses_tagged_json() {
        let strategy: DelayStrategy =
            serde_json::from_str(r#"{"kind":"day_before","remind_at":"18:00:00"}"#).unwrap();
        assert_eq!(
            strategy,
            DelayStrategy::DayBefore {
                remind_at: NaiveTime::from_hms_opt(18, 0, 0).unwrap()
            }
        );
    }
}
