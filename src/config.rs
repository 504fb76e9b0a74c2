//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.esgauditor.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// SLA settings.
    #[serde(default)]
    pub sla: SlaConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "esg_report.md".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include improvement recommendations in the report.
    #[serde(default = "default_true")]
    pub include_recommendations: bool,

    /// Governance audit lookahead window in days.
    #[serde(default = "default_audit_window_days")]
    pub audit_window_days: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_recommendations: true,
            audit_window_days: default_audit_window_days(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_audit_window_days() -> i64 {
    30
}

/// SLA reporting settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlaConfig {
    /// Fail (exit code 2) when the compliance rate falls below this
    /// percentage.
    #[serde(default)]
    pub fail_below: Option<f64>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".esgauditor.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if args.no_recommendations {
            self.report.include_recommendations = false;
        }

        if let Some(fail_below) = args.fail_below {
            self.sla.fail_below = Some(fail_below);
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
