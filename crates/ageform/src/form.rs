//! Editable form state.
//!
//! [`FormState`] holds the fields a user is currently editing. Every change
//! goes through [`FormState::apply`], which enforces the input widgets'
//! structural limits and then normalizes the marital status checkboxes so
//! the state is always valid for submission.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::{Error, Result};

/// Default upper bound on the kids dropdown.
pub const DEFAULT_MAX_KIDS: u8 = 5;

/// Default lower bound on the date picker, in years before today.
pub const DEFAULT_MAX_AGE_YEARS: u32 = 100;

/// Sex as offered by the two-option selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sex {
    /// Male (the default selection).
    #[default]
    Male,
    /// Female.
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for Sex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(Error::invalid_input(format!(
                "sex must be 'male' or 'female', got '{other}'"
            ))),
        }
    }
}

/// Marital status as recorded on a submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaritalStatus {
    /// The married checkbox was ticked.
    Married,
    /// Anything else.
    Unmarried,
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Married => write!(f, "Married"),
            Self::Unmarried => write!(f, "Unmarried"),
        }
    }
}

/// Non-fatal notice surfaced to the user after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// Both marital status boxes were ticked; "Unmarried" was cleared.
    ConflictingMaritalStatus,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingMaritalStatus => {
                write!(f, "Please select only one marital status")
            }
        }
    }
}

/// The selectable date of birth range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DobBounds {
    /// Earliest selectable date.
    pub min: NaiveDate,
    /// Latest selectable date (today).
    pub max: NaiveDate,
}

impl DobBounds {
    /// Bounds spanning `max_age_years` back from `today`.
    ///
    /// A leap day with no counterpart in the earlier year clamps to Feb 28.
    #[must_use]
    pub fn for_today(today: NaiveDate, max_age_years: u32) -> Self {
        let min = today
            .checked_sub_months(Months::new(max_age_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        Self { min, max: today }
    }

    /// Whether `date` can be picked.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }

    /// Reject `date` unless it can be picked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DobOutOfRange`] if `date` lies outside the bounds.
    pub fn check(&self, date: NaiveDate) -> Result<()> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(Error::DobOutOfRange {
                dob: date,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Limits enforced by the input widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLimits {
    /// Date picker range.
    pub dob: DobBounds,
    /// Largest value in the kids dropdown.
    pub max_kids: u8,
}

impl FormLimits {
    /// Limits with the default dropdown size.
    #[must_use]
    pub fn for_today(today: NaiveDate, max_age_years: u32) -> Self {
        Self {
            dob: DobBounds::for_today(today, max_age_years),
            max_kids: DEFAULT_MAX_KIDS,
        }
    }

    /// Override the largest selectable number of kids.
    #[must_use]
    pub fn with_max_kids(mut self, max_kids: u8) -> Self {
        self.max_kids = max_kids;
        self
    }
}

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// Full name text input.
    Name(String),
    /// Parent name text input.
    ParentName(String),
    /// Date picker.
    Dob(NaiveDate),
    /// Sex selector.
    Sex(Sex),
    /// "Married" checkbox.
    Married(bool),
    /// "Unmarried" checkbox.
    Unmarried(bool),
    /// Both checkboxes in one step.
    MaritalStatus {
        /// "Married" checkbox.
        married: bool,
        /// "Unmarried" checkbox.
        unmarried: bool,
    },
    /// Kids dropdown.
    Kids(u32),
}

/// The fields being edited before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    /// Full name; any text is accepted.
    pub name: String,
    /// Parent name; any text is accepted.
    pub parent_name: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Selected sex.
    pub sex: Sex,
    married: bool,
    unmarried: bool,
    kids: u8,
}

impl FormState {
    /// The defaults shown at session start and after every submit.
    #[must_use]
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            parent_name: String::new(),
            dob: today,
            sex: Sex::Male,
            married: false,
            unmarried: false,
            kids: 0,
        }
    }

    /// State of the "Married" checkbox.
    #[must_use]
    pub fn married(&self) -> bool {
        self.married
    }

    /// State of the "Unmarried" checkbox.
    #[must_use]
    pub fn unmarried(&self) -> bool {
        self.unmarried
    }

    /// Whether the kids dropdown is shown and editable.
    #[must_use]
    pub fn kids_editable(&self) -> bool {
        self.married && !self.unmarried
    }

    /// Number of kids; always 0 unless the dropdown is editable.
    #[must_use]
    pub fn kids(&self) -> u8 {
        if self.kids_editable() {
            self.kids
        } else {
            0
        }
    }

    /// Marital status as it will be recorded on submit.
    #[must_use]
    pub fn marital_status(&self) -> MaritalStatus {
        if self.married {
            MaritalStatus::Married
        } else {
            MaritalStatus::Unmarried
        }
    }

    /// Apply one edit, then normalize.
    ///
    /// On error the state is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DobOutOfRange`] for a date outside the picker range and
    /// [`Error::KidsOutOfRange`] for a value not in the kids dropdown.
    pub fn apply(&mut self, change: FieldChange, limits: &FormLimits) -> Result<Option<Warning>> {
        debug!(?change, "applying field change");
        match change {
            FieldChange::Name(name) => self.name = name,
            FieldChange::ParentName(parent_name) => self.parent_name = parent_name,
            FieldChange::Dob(dob) => {
                limits.dob.check(dob)?;
                self.dob = dob;
            }
            FieldChange::Sex(sex) => self.sex = sex,
            FieldChange::Married(married) => self.married = married,
            FieldChange::Unmarried(unmarried) => self.unmarried = unmarried,
            FieldChange::MaritalStatus { married, unmarried } => {
                self.married = married;
                self.unmarried = unmarried;
            }
            FieldChange::Kids(value) => {
                self.kids = u8::try_from(value)
                    .ok()
                    .filter(|kids| *kids <= limits.max_kids)
                    .ok_or(Error::KidsOutOfRange {
                        value,
                        max: limits.max_kids,
                    })?;
            }
        }
        Ok(self.normalize())
    }

    /// Restore the marital status invariants.
    ///
    /// "Married" wins when both boxes are ticked, and kids is pinned to 0
    /// whenever the dropdown is not editable.
    pub fn normalize(&mut self) -> Option<Warning> {
        let mut warning = None;
        if self.married && self.unmarried {
            warn!("both marital statuses selected, keeping married");
            self.unmarried = false;
            warning = Some(Warning::ConflictingMaritalStatus);
        }
        if !self.kids_editable() {
            self.kids = 0;
        }
        warning
    }
}

/// Fresh form state for the clock's current date.
#[must_use]
pub fn default_state(clock: &impl Clock) -> FormState {
    FormState::default_for(clock.today())
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if `input` is not a valid ISO date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::invalid_date(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn limits() -> FormLimits {
        FormLimits::for_today(today(), DEFAULT_MAX_AGE_YEARS)
    }

    fn form() -> FormState {
        FormState::default_for(today())
    }

    #[test]
    fn test_default_state() {
        let state = default_state(&FixedClock(today()));
        assert_eq!(state.name, "");
        assert_eq!(state.parent_name, "");
        assert_eq!(state.dob, today());
        assert_eq!(state.sex, Sex::Male);
        assert!(!state.married());
        assert!(!state.unmarried());
        assert_eq!(state.kids(), 0);
        assert_eq!(state, form());
    }

    #[test]
    fn test_text_fields_accept_anything() {
        let mut state = form();
        state
            .apply(FieldChange::Name("  Zoë, \"the\" 3rd ".to_string()), &limits())
            .unwrap();
        state
            .apply(FieldChange::ParentName(String::new()), &limits())
            .unwrap();
        assert_eq!(state.name, "  Zoë, \"the\" 3rd ");
        assert_eq!(state.parent_name, "");
    }

    #[test]
    fn test_both_statuses_in_one_step_married_wins() {
        let mut state = form();
        let warning = state
            .apply(
                FieldChange::MaritalStatus {
                    married: true,
                    unmarried: true,
                },
                &limits(),
            )
            .unwrap();
        assert_eq!(warning, Some(Warning::ConflictingMaritalStatus));
        assert!(state.married());
        assert!(!state.unmarried());
    }

    #[test]
    fn test_ticking_unmarried_while_married_is_cleared() {
        let mut state = form();
        assert_eq!(state.apply(FieldChange::Married(true), &limits()).unwrap(), None);
        let warning = state.apply(FieldChange::Unmarried(true), &limits()).unwrap();
        assert_eq!(warning, Some(Warning::ConflictingMaritalStatus));
        assert!(state.married());
        assert!(!state.unmarried());
        assert!(state.kids_editable());
    }

    #[test]
    fn test_ticking_married_while_unmarried_wins() {
        let mut state = form();
        state.apply(FieldChange::Unmarried(true), &limits()).unwrap();
        assert!(!state.kids_editable());
        let warning = state.apply(FieldChange::Married(true), &limits()).unwrap();
        assert_eq!(warning, Some(Warning::ConflictingMaritalStatus));
        assert_eq!(state.marital_status(), MaritalStatus::Married);
    }

    #[test]
    fn test_kids_pinned_when_not_married() {
        let mut state = form();
        state.apply(FieldChange::Married(true), &limits()).unwrap();
        state.apply(FieldChange::Kids(3), &limits()).unwrap();
        assert_eq!(state.kids(), 3);

        state.apply(FieldChange::Married(false), &limits()).unwrap();
        assert_eq!(state.kids(), 0);

        // Re-ticking does not resurrect the old selection.
        state.apply(FieldChange::Married(true), &limits()).unwrap();
        assert_eq!(state.kids(), 0);
    }

    #[test]
    fn test_kids_ignored_while_unmarried() {
        let mut state = form();
        state.apply(FieldChange::Kids(4), &limits()).unwrap();
        assert_eq!(state.kids(), 0);
        assert_eq!(state.marital_status(), MaritalStatus::Unmarried);
    }

    #[test]
    fn test_kids_out_of_range_rejected() {
        let mut state = form();
        state.apply(FieldChange::Married(true), &limits()).unwrap();
        state.apply(FieldChange::Kids(2), &limits()).unwrap();

        let err = state.apply(FieldChange::Kids(6), &limits()).unwrap_err();
        assert!(matches!(err, Error::KidsOutOfRange { value: 6, max: 5 }));
        assert_eq!(state.kids(), 2);

        let err = state.apply(FieldChange::Kids(300), &limits()).unwrap_err();
        assert!(matches!(err, Error::KidsOutOfRange { value: 300, .. }));
    }

    #[test]
    fn test_custom_max_kids() {
        let mut state = form();
        let limits = limits().with_max_kids(8);
        state.apply(FieldChange::Married(true), &limits).unwrap();
        state.apply(FieldChange::Kids(8), &limits).unwrap();
        assert_eq!(state.kids(), 8);
    }

    #[test]
    fn test_dob_within_bounds() {
        let mut state = form();
        state
            .apply(FieldChange::Dob(date(1990, 5, 17)), &limits())
            .unwrap();
        assert_eq!(state.dob, date(1990, 5, 17));
    }

    #[test]
    fn test_dob_bounds_are_inclusive() {
        let mut state = form();
        state
            .apply(FieldChange::Dob(date(1926, 10, 19)), &limits())
            .unwrap();
        state.apply(FieldChange::Dob(today()), &limits()).unwrap();
        assert_eq!(state.dob, today());
    }

    #[test]
    fn test_dob_out_of_range_rejected() {
        let mut state = form();
        let err = state
            .apply(FieldChange::Dob(date(1926, 10, 18)), &limits())
            .unwrap_err();
        assert!(matches!(err, Error::DobOutOfRange { .. }));

        let err = state
            .apply(FieldChange::Dob(date(2026, 10, 20)), &limits())
            .unwrap_err();
        assert!(err.is_input_error());
        assert_eq!(state.dob, today());
    }

    #[test]
    fn test_dob_bounds_from_leap_day() {
        let bounds = DobBounds::for_today(date(2024, 2, 29), 100);
        assert_eq!(bounds.min, date(1924, 2, 29));
        let bounds = DobBounds::for_today(date(2024, 2, 29), 1);
        assert_eq!(bounds.min, date(2023, 2, 28));
    }

    #[test]
    fn test_sex_from_str() {
        assert_eq!("male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(" Female ".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Sex::Female.to_string(), "Female");
        assert_eq!(MaritalStatus::Married.to_string(), "Married");
        assert_eq!(MaritalStatus::Unmarried.to_string(), "Unmarried");
        assert_eq!(
            Warning::ConflictingMaritalStatus.to_string(),
            "Please select only one marital status"
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2001-09-11").unwrap(), date(2001, 9, 11));
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
        assert!(matches!(
            parse_date("2023-02-29"),
            Err(Error::InvalidDate { .. })
        ));
        assert!(parse_date("11/09/2001").is_err());
    }
}
