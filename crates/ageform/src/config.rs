//! Configuration management for ageform.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::form::{FormLimits, DEFAULT_MAX_AGE_YEARS, DEFAULT_MAX_KIDS};
use crate::store::CSV_FILE_NAME;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "ageform";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `AGEFORM_`)
/// 2. TOML config file at `~/.config/ageform/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Form input limits.
    pub form: FormConfig,
    /// CSV export settings.
    pub export: ExportConfig,
}

/// Limits applied to the form's input widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// How many years back the date picker reaches.
    pub max_age_years: u32,
    /// Largest value in the kids dropdown.
    pub max_kids: u8,
}

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name offered for the download.
    pub file_name: String,
    /// Directory downloads are saved into.
    /// Defaults to the current directory.
    pub directory: Option<PathBuf>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_age_years: DEFAULT_MAX_AGE_YEARS,
            max_kids: DEFAULT_MAX_KIDS,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: CSV_FILE_NAME.to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("AGEFORM_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.form.max_age_years == 0 {
            return Err(Error::ConfigValidation {
                message: "max_age_years must be greater than 0".to_string(),
            });
        }

        let file_name = &self.export.file_name;
        if file_name.is_empty() {
            return Err(Error::ConfigValidation {
                message: "file_name cannot be empty".to_string(),
            });
        }

        if Path::new(file_name).file_name() != Some(OsStr::new(file_name.as_str())) {
            return Err(Error::ConfigValidation {
                message: format!("file_name must not contain a path: {file_name}"),
            });
        }

        if !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(Error::ConfigValidation {
                message: format!("file_name must end in .csv: {file_name}"),
            });
        }

        Ok(())
    }

    /// Input limits for a session whose "today" is `today`.
    #[must_use]
    pub fn form_limits(&self, today: NaiveDate) -> FormLimits {
        FormLimits::for_today(today, self.form.max_age_years).with_max_kids(self.form.max_kids)
    }

    /// Directory downloads are saved into, resolving the default if not set.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
