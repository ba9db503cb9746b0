//! Command-line interface for ageform.
//!
//! This module provides the CLI structure, the line-oriented input parser and
//! the interactive loop behind the `ageform` binary.

mod commands;
mod input;
mod repl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AgeCommand, ConfigCommand, RunCommand};
pub use input::{parse_line, Input, HELP};
pub use repl::run_interactive;

/// ageform - Personal details form with exact age calculation
///
/// Collects names, date of birth, sex, marital status and kids, computes the
/// exact age in years, months and days, and exports the submitted records as
/// CSV.
#[derive(Debug, Parser)]
#[command(name = "ageform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fill in the form interactively
    Run(RunCommand),

    /// Calculate an exact age
    Age(AgeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Config(ConfigCommand::Path),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "ageform");
    }

    #[test]
    fn test_verbosity() {
        use crate::logging::Verbosity;
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["ageform", "run"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Run(RunCommand { today: None, .. })
        ));
    }

    #[test]
    fn test_parse_run_with_today() {
        let cli = Cli::try_parse_from(["ageform", "run", "--today", "2024-03-01"]).unwrap();
        let Command::Run(run) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(run.today, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_parse_age() {
        let cli = Cli::try_parse_from(["ageform", "age", "1990-05-17", "--json"]).unwrap();
        let Command::Age(age) = cli.command else {
            panic!("expected age command");
        };
        assert_eq!(age.dob, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());
        assert!(age.json);
        assert!(age.today.is_none());
    }

    #[test]
    fn test_parse_age_rejects_bad_date() {
        assert!(Cli::try_parse_from(["ageform", "age", "17/05/1990"]).is_err());
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["ageform", "-c", "/custom/config.toml", "config", "show"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose() {
        let cli = Cli::try_parse_from(["ageform", "-vv", "config", "path"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
