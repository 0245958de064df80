//! Application configuration.
//!
//! Values come from, lowest precedence first: built-in defaults, a TOML file
//! given with `--config`, then command-line flags.
//!
//! ```toml
//! total_figure = "interest"   # repaid | installment | interest
//! log_level = "debug"         # any EnvFilter directive
//! log_file = "loan.log"
//! log_stdout = false
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use loan_core::TotalFigure;
use serde::Deserialize;

use crate::logging::LogSettings;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Figure shown next to the installment.
    pub total_figure: TotalFigure,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Append log records to this file.
    pub log_file: Option<PathBuf>,
    /// Write log records to the terminal.
    pub log_stdout: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            total_figure: TotalFigure::default(),
            log_level: "info".to_string(),
            log_file: None,
            log_stdout: true,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub total_figure: Option<TotalFigure>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub quiet: bool,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file '{}'", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("invalid config file '{}'", path.display()))
    }

    pub fn apply(
        &mut self,
        overrides: &ConfigOverrides,
    ) {
        if let Some(figure) = overrides.total_figure {
            self.total_figure = figure;
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        if let Some(file) = &overrides.log_file {
            self.log_file = Some(file.clone());
        }
        if overrides.quiet {
            self.log_stdout = false;
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: self.log_level.clone(),
            file: self.log_file.clone(),
            stdout: self.log_stdout,
        }
    }
}
