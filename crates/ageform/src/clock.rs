//! Source of "today" for age calculation and date bounds.

use chrono::{Local, NaiveDate};

/// Provides the current calendar date.
///
/// The session reads the date once per event through this trait, so a fixed
/// clock makes every calculation reproducible.
pub trait Clock {
    /// The current local calendar date.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn test_system_clock_matches_local_date() {
        let before = Local::now().date_naive();
        let today = SystemClock.today();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
    }

    #[test]
    fn test_clock_by_reference() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let clock = FixedClock(date);
        let by_ref: &dyn Clock = &clock;
        assert_eq!(by_ref.today(), date);
    }
}
