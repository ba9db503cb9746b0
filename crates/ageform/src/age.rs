//! Exact age calculation.
//!
//! Age is the calendar distance between a birth date and today expressed as
//! whole years, months and days, computed by borrowing: subtract the day,
//! month and year components separately and, whenever a component goes
//! negative, borrow one unit of the next larger component.
//!
//! A borrowed month is worth the number of days in the month *preceding*
//! today's month. When the birth day does not exist in that month (born on
//! the 31st, borrowing a 28-day February) the birth day is clamped to the
//! month's last day, so days equals today's day of month and may exceed the
//! borrowed month's length. Plain subtraction would give a smaller count that
//! no longer adds back up to today; with the clamp the result always does:
//!
//! ```
//! use ageform::age::{calculate_exact_age, ExactAge};
//! use chrono::NaiveDate;
//!
//! let dob = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
//! let today = NaiveDate::from_ymd_opt(2021, 2, 28).unwrap();
//!
//! let age = calculate_exact_age(dob, today);
//! assert_eq!(age, ExactAge::new(0, 11, 30));
//! assert_eq!(age.add_to(dob), Some(today));
//! assert_eq!(age.to_string(), "0 Years 11 Months 30 Days");
//! ```

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};

/// Elapsed calendar time between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ExactAge {
    /// Whole years.
    pub years: u32,
    /// Whole months after the years, `0..=11`.
    pub months: u32,
    /// Remaining days after the months.
    ///
    /// Less than the length of the month before today's month, except when
    /// the birth day was clamped; then it is today's day of month.
    pub days: u32,
}

impl ExactAge {
    /// The age of someone born today.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Create an age from its components.
    #[must_use]
    pub const fn new(years: u32, months: u32, days: u32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// Total number of whole months (years folded in).
    #[must_use]
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }

    /// Add this duration to `start`: whole months first, then days.
    ///
    /// Adding months clamps to the end of a shorter month (Jan 31 plus one
    /// month is Feb 28/29), matching how the borrow treats a birth day that
    /// does not exist in the borrowed month.
    ///
    /// Returns `None` if the result falls outside chrono's date range.
    #[must_use]
    pub fn add_to(&self, start: NaiveDate) -> Option<NaiveDate> {
        start
            .checked_add_months(Months::new(self.total_months()))?
            .checked_add_days(Days::new(u64::from(self.days)))
    }
}

impl fmt::Display for ExactAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Years {} Months {} Days",
            self.years, self.months, self.days
        )
    }
}

/// Whether `year` is a leap year in the proleptic Gregorian calendar.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// The `(year, month)` immediately before the given month.
///
/// January rolls back to December of the previous year.
#[must_use]
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Compute the exact age of someone born on `dob` as of `today`.
///
/// Callers must ensure `dob <= today`; the form's date bounds guarantee
/// this. A future birth date yields [`ExactAge::ZERO`] and a warning. Use
/// [`try_exact_age`] when the input is not already bounded.
#[must_use]
pub fn calculate_exact_age(dob: NaiveDate, today: NaiveDate) -> ExactAge {
    if dob > today {
        warn!(%dob, %today, "date of birth is after today, reporting zero age");
        return ExactAge::ZERO;
    }

    let mut years = today.year() - dob.year();
    let mut months = i64::from(today.month()) - i64::from(dob.month());

    let days = if today.day() >= dob.day() {
        today.day() - dob.day()
    } else {
        months -= 1;
        let (year, month) = previous_month(today.year(), today.month());
        let borrowed = days_in_month(year, month);
        // A birth day past the end of the borrowed month counts from its last day.
        today.day() + borrowed.saturating_sub(dob.day())
    };

    if months < 0 {
        years -= 1;
        months += 12;
    }

    ExactAge {
        years: u32::try_from(years).unwrap_or_default(),
        months: u32::try_from(months).unwrap_or_default(),
        days,
    }
}

/// Like [`calculate_exact_age`], but rejects a birth date after `today`.
///
/// # Errors
///
/// Returns [`Error::DobInFuture`] if `dob > today`.
pub fn try_exact_age(dob: NaiveDate, today: NaiveDate) -> Result<ExactAge> {
    if dob > today {
        return Err(Error::DobInFuture { dob, today });
    }
    Ok(calculate_exact_age(dob, today))
}
