//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and mapping to the domain types.

use crate::models::AssetType;
use crate::wizard::ReportType;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// ESGAuditor - ESG and SLA compliance reporter for facility asset data
///
/// Load an exported JSON dataset of facility assets, SLA policies, and
/// maintenance work orders, aggregate the ESG or SLA metrics, and write
/// a Markdown or JSON report.
///
/// Examples:
///   esgauditor --input dataset.json
///   esgauditor --input dataset.json --report-type environmental --format json
///   esgauditor --input dataset.json --report sla --sla-name "Default SLA"
///   esgauditor --input dataset.json --dry-run
///   esgauditor --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the JSON dataset to audit
    ///
    /// Not required when using --init-config.
    #[arg(short, long, value_name = "FILE", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Which report to generate
    #[arg(short, long, default_value = "esg", value_name = "KIND")]
    pub report: ReportKind,

    /// ESG report category
    #[arg(long, default_value = "comprehensive", value_name = "TYPE")]
    pub report_type: ReportTypeArg,

    /// SLA policy to report on (required with --report sla)
    #[arg(long, value_name = "NAME")]
    pub sla_name: Option<String>,

    /// Start of the reporting window (inclusive, on asset purchase date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date_from: Option<NaiveDate>,

    /// End of the reporting window (inclusive, on asset purchase date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date_to: Option<NaiveDate>,

    /// Restrict the ESG report to one asset type
    #[arg(long, value_name = "TYPE")]
    pub asset_type: Option<AssetTypeArg>,

    /// Only include assets already flagged ESG compliant
    #[arg(long)]
    pub compliance_only: bool,

    /// Leave improvement recommendations out of the report
    #[arg(long)]
    pub no_recommendations: bool,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Output file path for the report
    ///
    /// Defaults to the config file's setting (esg_report.md).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .esgauditor.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Fail if the compliance rate falls below this percentage
    ///
    /// Useful for CI pipelines. Exit code 2 when the rate is below the
    /// threshold.
    #[arg(long, value_name = "PCT")]
    pub fail_below: Option<f64>,

    /// Dry run: load and validate the dataset without generating a report
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .esgauditor.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Which report family to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportKind {
    /// ESG compliance report over the asset collection (default)
    #[default]
    Esg,
    /// SLA performance report for one policy
    Sla,
}

/// CLI-facing ESG report category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportTypeArg {
    Environmental,
    Social,
    Governance,
    #[default]
    Comprehensive,
}

/// CLI-facing asset type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AssetTypeArg {
    Equipment,
    Furniture,
    Vehicle,
    Building,
    Other,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Convert the CLI report type to the wizard's domain enum.
pub fn report_type_from_arg(arg: ReportTypeArg) -> ReportType {
    match arg {
        ReportTypeArg::Environmental => ReportType::Environmental,
        ReportTypeArg::Social => ReportType::Social,
        ReportTypeArg::Governance => ReportType::Governance,
        ReportTypeArg::Comprehensive => ReportType::Comprehensive,
    }
}

/// Convert the CLI asset type filter to the domain enum.
pub fn asset_type_from_arg(arg: AssetTypeArg) -> AssetType {
    match arg {
        AssetTypeArg::Equipment => AssetType::Equipment,
        AssetTypeArg::Furniture => AssetType::Furniture,
        AssetTypeArg::Vehicle => AssetType::Vehicle,
        AssetTypeArg::Building => AssetType::Building,
        AssetTypeArg::Other => AssetType::Other,
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err("--date-from must not be after --date-to".to_string());
            }
        }

        if self.report == ReportKind::Sla && self.sla_name.is_none() {
            return Err("--report sla requires --sla-name".to_string());
        }

        if let Some(fail_below) = self.fail_below {
            if !(0.0..=100.0).contains(&fail_below) {
                return Err("--fail-below must be between 0 and 100".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Dataset file does not exist: {}", input.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: None,
            report: ReportKind::Esg,
            report_type: ReportTypeArg::Comprehensive,
            sla_name: None,
            date_from: None,
            date_to: None,
            asset_type: None,
            compliance_only: false,
            no_recommendations: false,
            format: OutputFormat::Markdown,
            output: None,
            config: None,
            verbose: false,
            quiet: false,
            fail_below: None,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_rejects_reversed_date_window() {
        let mut args = make_args();
        args.date_from = NaiveDate::from_ymd_opt(2024, 6, 1);
        args.date_to = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_sla_report_requires_name() {
        let mut args = make_args();
        args.report = ReportKind::Sla;
        assert!(args.validate().is_err());

        args.sla_name = Some("Default SLA".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_fail_below_range() {
        let mut args = make_args();
        args.fail_below = Some(120.0);
        assert!(args.validate().is_err());

        args.fail_below = Some(95.0);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_report_type_mapping() {
        assert_eq!(
            report_type_from_arg(ReportTypeArg::Environmental),
            ReportType::Environmental
        );
        assert_eq!(
            report_type_from_arg(ReportTypeArg::Comprehensive),
            ReportType::Comprehensive
        );
    }

    #[test]
    fn test_asset_type_mapping() {
        assert_eq!(asset_type_from_arg(AssetTypeArg::Vehicle), AssetType::Vehicle);
    }
}
