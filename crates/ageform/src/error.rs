//! Error types for ageform.
//!
//! This module defines all error types used throughout the ageform crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for ageform operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Form Input Errors ===
    /// A date of birth fell outside the selectable range.
    #[error("date of birth {dob} is outside the allowed range {min} to {max}")]
    DobOutOfRange {
        /// The rejected date.
        dob: NaiveDate,
        /// Earliest selectable date.
        min: NaiveDate,
        /// Latest selectable date (today).
        max: NaiveDate,
    },

    /// A date of birth lies after the reference date.
    #[error("date of birth {dob} is after {today}")]
    DobInFuture {
        /// The rejected date.
        dob: NaiveDate,
        /// The reference date.
        today: NaiveDate,
    },

    /// The number of kids exceeded the selectable maximum.
    #[error("number of kids must be between 0 and {max}, got {value}")]
    KidsOutOfRange {
        /// The rejected value.
        value: u32,
        /// Largest selectable value.
        max: u8,
    },

    /// A date string could not be parsed.
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The text that failed to parse.
        input: String,
    },

    /// A line of user input could not be understood.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // === Export Errors ===
    /// CSV serialization or parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for ageform operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid date error for the given input text.
    #[must_use]
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }

    /// Check if this error was caused by a rejected form value.
    ///
    /// Such errors leave the session untouched and the user can simply retry.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::DobOutOfRange { .. }
                | Self::DobInFuture { .. }
                | Self::KidsOutOfRange { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input("unknown command 'frobnicate'");
        assert_eq!(
            err.to_string(),
            "invalid input: unknown command 'frobnicate'"
        );
    }

    #[test]
    fn test_invalid_date_display() {
        let err = Error::invalid_date("31/12/1999");
        assert_eq!(
            err.to_string(),
            "invalid date '31/12/1999': expected YYYY-MM-DD"
        );
    }

    #[test]
    fn test_dob_out_of_range_display() {
        let err = Error::DobOutOfRange {
            dob: date(1900, 1, 1),
            min: date(1926, 10, 19),
            max: date(2026, 10, 19),
        };
        let msg = err.to_string();
        assert!(msg.contains("1900-01-01"));
        assert!(msg.contains("1926-10-19"));
        assert!(msg.contains("2026-10-19"));
    }

    #[test]
    fn test_dob_in_future_display() {
        let err = Error::DobInFuture {
            dob: date(2030, 1, 1),
            today: date(2026, 10, 19),
        };
        assert_eq!(err.to_string(), "date of birth 2030-01-01 is after 2026-10-19");
    }

    #[test]
    fn test_kids_out_of_range_display() {
        let err = Error::KidsOutOfRange { value: 9, max: 5 };
        assert_eq!(err.to_string(), "number of kids must be between 0 and 5, got 9");
    }

    #[test]
    fn test_is_input_error() {
        assert!(Error::invalid_input("x").is_input_error());
        assert!(Error::invalid_date("x").is_input_error());
        assert!(Error::KidsOutOfRange { value: 6, max: 5 }.is_input_error());
        assert!(!Error::ConfigValidation {
            message: "bad".to_string()
        }
        .is_input_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_from_csv_error() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\nc\n".as_bytes());
        let csv_err = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap_err();
        let err: Error = csv_err.into();
        assert!(matches!(err, Error::Csv(_)));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "max_age_years must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("max_age_years"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/root/forbidden"));
    }
}
