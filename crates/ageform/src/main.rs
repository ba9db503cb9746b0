//! `ageform` - CLI for the personal details form
//!
//! This binary provides the interactive terminal form, a one-shot exact age
//! calculator, and configuration inspection.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ageform::age::try_exact_age;
use ageform::cli::{run_interactive, AgeCommand, Cli, Command, ConfigCommand, RunCommand};
use ageform::{init_logging, Clock, Config, FixedClock, Session, SystemClock};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let mut stdout = io::stdout();

    match cli.command {
        Command::Run(run_cmd) => handle_run(load_config(cli.config)?, &run_cmd),
        Command::Age(age_cmd) => handle_age(&age_cmd, &mut stdout),
        Command::Config(config_cmd) => handle_config(cli.config, &config_cmd, &mut stdout),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    Config::load_from(path).context("loading configuration")
}

fn handle_run(config: Config, cmd: &RunCommand) -> Result<()> {
    let export_dir = cmd
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export_dir());
    let stdin = io::stdin();
    let stdout = io::stdout();

    let result = match cmd.today {
        Some(today) => {
            let mut session = Session::new(FixedClock(today), config);
            run_interactive(&mut session, stdin.lock(), stdout.lock(), &export_dir)
        }
        None => {
            let mut session = Session::new(SystemClock, config);
            run_interactive(&mut session, stdin.lock(), stdout.lock(), &export_dir)
        }
    };
    result.context("interactive session failed")
}

fn handle_age(cmd: &AgeCommand, out: &mut impl Write) -> Result<()> {
    let today = cmd.today.unwrap_or_else(|| SystemClock.today());
    let age = try_exact_age(cmd.dob, today)?;

    if cmd.json {
        let output = serde_json::json!({
            "dob": cmd.dob,
            "today": today,
            "age": age,
            "exact_age": age.to_string(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(out, "{age}")?;
    }
    Ok(())
}

fn handle_config(
    config_path: Option<PathBuf>,
    cmd: &ConfigCommand,
    out: &mut impl Write,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Form]")?;
                writeln!(out, "  Max age (years):    {}", config.form.max_age_years)?;
                writeln!(out, "  Max kids:           {}", config.form.max_kids)?;
                writeln!(out)?;
                writeln!(out, "[Export]")?;
                writeln!(out, "  File name:          {}", config.export.file_name)?;
                writeln!(out, "  Directory:          {}", config.export_dir().display())?;
            }
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", Config::default_config_path().display())?;
        }
        ConfigCommand::Validate { file } => {
            // Loads only the file being validated.
            let path = file
                .clone()
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            validate_config(path, out)?;
        }
    }
    Ok(())
}

fn validate_config(path: PathBuf, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Validating configuration: {}", path.display())?;
    let shown = path.display().to_string();
    Config::load_from(Some(path)).with_context(|| format!("invalid configuration in {shown}"))?;
    writeln!(out, "Configuration is valid.")?;
    Ok(())
}
