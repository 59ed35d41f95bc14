//! Clock and calendar adapter.
//!
//! All day-boundary logic reads time through [`Clock`] so rollover and
//! streak behaviour can be driven deterministically in tests. Times are
//! local wall-clock values: a "day" is the user's calendar day.

use std::cell::Cell;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Weekday};

/// Source of the current date and time.
pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock for tests and replays.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Start at the given day, 09:00.
    pub fn at_day(date: NaiveDate) -> Self {
        Self::new(date.and_hms_opt(9, 0, 0).unwrap_or_default())
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump forward whole days, keeping the time of day.
    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The calendar day before `date`.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Short weekday label used for chart axes ("Mon", "Tue", ...).
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekend_classification() {
        // 2024-06-01 was a Saturday.
        assert!(is_weekend(date(2024, 6, 1)));
        assert!(is_weekend(date(2024, 6, 2)));
        assert!(!is_weekend(date(2024, 6, 3)));
        assert!(!is_weekend(date(2024, 6, 7)));
    }

    #[test]
    fn previous_day_crosses_month_and_year() {
        assert_eq!(previous_day(date(2024, 3, 1)), date(2024, 2, 29));
        assert_eq!(previous_day(date(2024, 1, 1)), date(2023, 12, 31));
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::at_day(date(2024, 6, 1));
        assert_eq!(clock.today(), date(2024, 6, 1));
        clock.advance(Duration::hours(15));
        assert_eq!(clock.today(), date(2024, 6, 2));
        clock.advance_days(3);
        assert_eq!(clock.today(), date(2024, 6, 5));
    }

    #[test]
    fn day_labels_are_short_weekdays() {
        assert_eq!(day_label(date(2024, 6, 3)), "Mon");
        assert_eq!(day_label(date(2024, 6, 2)), "Sun");
    }
}
