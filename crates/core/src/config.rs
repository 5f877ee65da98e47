//! Run configuration
//!
//! Settings come from four layers, later layers winning:
//! built-in defaults, `PRIMEFINDER_REPORT`, a TOML file, command-line flags.
//!
//! # Example
//!
//! ```toml
//! limit = 100000
//! strategies = ["sqrt", "six-k"]
//! format = "json"
//! output = "report.json"
//! verify = true
//! ```

use crate::report::{ReportConfig, ReportDestination, ReportFormat};
use crate::strategy::{self, Strategy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Limit used when neither the command line nor a config file gives one
pub const DEFAULT_LIMIT: i64 = 100_000;

/// Contents of a config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub limit: Option<i64>,
    #[serde(default)]
    pub strategies: Vec<Strategy>,
    pub format: Option<ReportFormat>,
    pub output: Option<PathBuf>,
    pub verify: Option<bool>,
}

impl FileConfig {
    /// Parse from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }
}

/// Fully resolved settings for one benchmark run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub limit: i64,
    /// In benchmark order, never empty
    pub strategies: Vec<Strategy>,
    pub report: ReportConfig,
    /// Cross-check counts against the reference sieve
    pub verify: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            limit: DEFAULT_LIMIT,
            strategies: Strategy::ALL.to_vec(),
            report: ReportConfig::default(),
            verify: false,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        RunConfig::default()
    }

    /// Defaults with `PRIMEFINDER_REPORT` applied
    pub fn from_env() -> Self {
        let mut config = RunConfig::default();
        if let Some(report) = ReportConfig::from_env() {
            config.report = report;
        }
        config
    }

    /// Apply a config file on top of the current settings
    pub fn merge(&mut self, file: FileConfig) {
        if let Some(limit) = file.limit {
            self.limit = limit;
        }
        if !file.strategies.is_empty() {
            self.strategies = strategy::normalize(&file.strategies);
        }
        if let Some(format) = file.format {
            self.report.format = format;
        }
        if let Some(output) = file.output {
            self.report.destination = ReportDestination::File(output);
        }
        if let Some(verify) = file.verify {
            self.verify = verify;
        }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Select strategies (empty keeps the current selection)
    pub fn with_strategies(mut self, strategies: &[Strategy]) -> Self {
        if !strategies.is_empty() {
            self.strategies = strategy::normalize(strategies);
        }
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.report.format = format;
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.report.destination = ReportDestination::File(path.into());
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Reject settings the runner cannot use
    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 {
            return Err(format!(
                "Limit must be a positive integer, got {}",
                self.limit
            ));
        }
        if self.verify && self.limit > crate::primality::MAX_SIEVE_LIMIT {
            return Err(format!(
                "Cannot verify limit {}: reference sieve supports at most {}",
                self.limit,
                crate::primality::MAX_SIEVE_LIMIT
            ));
        }
        Ok(())
    }
}
