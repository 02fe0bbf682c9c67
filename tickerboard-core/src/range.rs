//! Date window resolution.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::watchlist::LookbackDays;

/// Requested history window. Both `start` and `end` are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `(today - lookback, today)`.
    pub fn resolve(today: NaiveDate, lookback: LookbackDays) -> Self {
        let start = today
            .checked_sub_days(Days::new(lookback.get() as u64))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Calendar days from `start` to `end`.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn thirty_days_before_end_of_june() {
        let range = DateRange::resolve(d(2024, 6, 30), LookbackDays::new(30));
        assert_eq!(range.start, d(2024, 5, 31));
        assert_eq!(range.end, d(2024, 6, 30));
    }

    #[test]
    fn both_ends_are_inclusive() {
        let range = DateRange::resolve(d(2024, 6, 30), LookbackDays::new(30));
        assert!(range.contains(d(2024, 5, 31)));
        assert!(range.contains(d(2024, 6, 30)));
        assert!(!range.contains(d(2024, 5, 30)));
        assert!(!range.contains(d(2024, 7, 1)));
    }

    #[test]
    fn crosses_year_boundary() {
        let range = DateRange::resolve(d(2024, 1, 3), LookbackDays::new(7));
        assert_eq!(range.start, d(2023, 12, 27));
        assert_eq!(range.span_days(), 7);
    }

    #[test]
    fn displays_as_interval() {
        let range = DateRange::resolve(d(2024, 6, 30), LookbackDays::new(30));
        assert_eq!(range.to_string(), "2024-05-31 to 2024-06-30");
    }
}
