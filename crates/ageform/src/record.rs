//! Submitted records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::age::calculate_exact_age;
use crate::form::{FormState, MaritalStatus, Sex};

/// Date format used for the DOB column.
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Column headers, in export order.
pub const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Parent Name",
    "DOB",
    "Exact Age",
    "Sex",
    "Marital Status",
    "Kids",
];

/// An immutable snapshot of one submission.
///
/// Field order and serde names match [`CSV_HEADERS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Full name as typed.
    #[serde(rename = "Name")]
    pub name: String,
    /// Parent name as typed.
    #[serde(rename = "Parent Name")]
    pub parent_name: String,
    /// Date of birth formatted as `YYYY-MM-DD`.
    #[serde(rename = "DOB")]
    pub dob: String,
    /// Age at submission, e.g. `"34 Years 2 Months 9 Days"`.
    #[serde(rename = "Exact Age")]
    pub exact_age: String,
    /// Selected sex.
    #[serde(rename = "Sex")]
    pub sex: Sex,
    /// Married or Unmarried.
    #[serde(rename = "Marital Status")]
    pub marital_status: MaritalStatus,
    /// Number of kids (0 unless married).
    #[serde(rename = "Kids")]
    pub kids: u8,
}

impl Record {
    /// Snapshot `form`, computing the exact age as of `today`.
    #[must_use]
    pub fn from_form(form: &FormState, today: NaiveDate) -> Self {
        let age = calculate_exact_age(form.dob, today);
        Self {
            name: form.name.clone(),
            parent_name: form.parent_name.clone(),
            dob: form.dob.format(DOB_FORMAT).to_string(),
            exact_age: age.to_string(),
            sex: form.sex,
            marital_status: form.marital_status(),
            kids: form.kids(),
        }
    }

    /// The record as display cells in header order.
    #[must_use]
    pub fn cells(&self) -> [String; 7] {
        [
            self.name.clone(),
            self.parent_name.clone(),
            self.dob.clone(),
            self.exact_age.clone(),
            self.sex.to_string(),
            self.marital_status.to_string(),
            self.kids.to_string(),
        ]
    }
}
