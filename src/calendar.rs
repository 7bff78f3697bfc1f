// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Canonical calendar periods and stepping functions.
//!
//! Factories build the period spanning exactly one calendar unit in UTC,
//! end exclusive: `month(2024, 1)` is `[2024-01-01T00:00, 2024-02-01T00:00)`.
//! The stepping functions advance an instant by one calendar day or month
//! and back [`Period::split_by_days`] / [`Period::split_by_months`].

use crate::error::{Error, Result};
use crate::{Instant, Period};
use chrono::{Days, Months, TimeZone, Utc};

/// Returns the period covering the given day.
///
/// The start is midnight of the given day and the end is midnight of the
/// next day (exclusive).
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] when the date does not exist.
///
/// # Examples
///
/// ```
/// use chronoline::calendar;
///
/// let leap_day = calendar::day(2024, 2, 29).unwrap();
/// assert_eq!(leap_day.duration(), chrono::Duration::days(1));
///
/// assert!(calendar::day(2023, 2, 29).is_err());
/// ```
pub fn day(year: i32, month: u32, day: u32) -> Result<Period> {
    let start = midnight(year, month, day)?;
    Period::new(start, step_days(start))
}

/// Returns the period covering the given month.
///
/// The start is the first day of the month and the end is the first day of
/// the next month (exclusive).
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] when the month does not exist.
pub fn month(year: i32, month: u32) -> Result<Period> {
    let start = midnight(year, month, 1)?;
    Period::new(start, step_months(start))
}

/// Returns the period covering the given year.
///
/// The start is January 1st and the end is January 1st of the next year
/// (exclusive).
pub fn year(year: i32) -> Result<Period> {
    let start = midnight(year, 1, 1)?;
    let end = start
        .checked_add_months(Months::new(12))
        .expect("instant out of chrono::DateTime<Utc> representable range");
    Period::new(start, end)
}

/// Advances an instant by one calendar day.
pub fn step_days(instant: Instant) -> Instant {
    instant
        .checked_add_days(Days::new(1))
        .expect("instant out of chrono::DateTime<Utc> representable range")
}

/// Advances an instant by one calendar month.
///
/// Day-of-month clamping follows chrono: stepping from January 31st lands
/// on the last day of February.
pub fn step_months(instant: Instant) -> Instant {
    instant
        .checked_add_months(Months::new(1))
        .expect("instant out of chrono::DateTime<Utc> representable range")
}

fn midnight(year: i32, month: u32, day: u32) -> Result<Instant> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or(Error::InvalidDate { year, month, day })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn utc(year: i32, month: u32, day: u32) -> Instant {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_day_bounds() {
        let period = day(2024, 8, 15).unwrap();
        assert_eq!(period.start(), utc(2024, 8, 15));
        assert_eq!(period.end(), utc(2024, 8, 16));
    }

    #[test]
    fn test_day_rolls_over_month_and_year() {
        let end_of_month = day(2024, 1, 31).unwrap();
        assert_eq!(end_of_month.end(), utc(2024, 2, 1));

        let end_of_year = day(2024, 12, 31).unwrap();
        assert_eq!(end_of_year.end(), utc(2025, 1, 1));
    }

    #[test]
    fn test_month_bounds() {
        let period = month(2024, 1).unwrap();
        assert_eq!(period.start(), utc(2024, 1, 1));
        assert_eq!(period.end(), utc(2024, 2, 1));
    }

    #[test]
    fn test_month_december_rolls_into_next_year() {
        let period = month(2024, 12).unwrap();
        assert_eq!(period.end(), utc(2025, 1, 1));
    }

    #[test]
    fn test_leap_february() {
        let leap = month(2024, 2).unwrap();
        assert_eq!(leap.duration(), Duration::days(29));

        let regular = month(2023, 2).unwrap();
        assert_eq!(regular.duration(), Duration::days(28));
    }

    #[test]
    fn test_year_bounds() {
        let period = year(2024).unwrap();
        assert_eq!(period.start(), utc(2024, 1, 1));
        assert_eq!(period.end(), utc(2025, 1, 1));
        assert_eq!(period.duration(), Duration::days(366));
    }

    #[test]
    fn test_invalid_dates_are_rejected() {
        assert_eq!(
            day(2023, 2, 29).unwrap_err(),
            Error::InvalidDate {
                year: 2023,
                month: 2,
                day: 29,
            }
        );
        assert!(day(2024, 13, 1).is_err());
        assert!(day(2024, 4, 31).is_err());
        assert!(month(2024, 0).is_err());
        assert!(month(2024, 13).is_err());
    }

    #[test]
    fn test_step_days_is_calendar_aware() {
        assert_eq!(step_days(utc(2024, 2, 28)), utc(2024, 2, 29));
        assert_eq!(step_days(utc(2023, 2, 28)), utc(2023, 3, 1));
    }

    #[test]
    fn test_step_months_clamps_day_of_month() {
        assert_eq!(step_months(utc(2024, 1, 31)), utc(2024, 2, 29));
        assert_eq!(step_months(utc(2024, 3, 15)), utc(2024, 4, 15));
    }
}
