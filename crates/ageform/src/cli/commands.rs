//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Parse a `YYYY-MM-DD` command-line argument.
fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    crate::form::parse_date(s).map_err(|e| e.to_string())
}

/// Interactive session arguments.
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    /// Directory to save downloads into (overrides configuration)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// One-shot age calculation arguments.
#[derive(Debug, Args)]
pub struct AgeCommand {
    /// Date of birth (YYYY-MM-DD)
    #[arg(value_parser = parse_date_arg)]
    pub dob: NaiveDate,

    /// Calculate the age as of this date instead of today
    #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("1999-12-31"),
            Ok(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap())
        );
        let err = parse_date_arg("yesterday").unwrap_err();
        assert!(err.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_age_command_debug() {
        let cmd = AgeCommand {
            dob: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            today: None,
            json: true,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("dob"));
        assert!(debug_str.contains("json"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
