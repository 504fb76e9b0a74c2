//! ESGAuditor - ESG and SLA compliance reporter for facility asset data
//!
//! A CLI tool that aggregates ESG metrics over facility assets and SLA
//! performance metrics over maintenance work orders, and renders the
//! results as Markdown or JSON reports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad dataset, config, IO failure, validation errors)
//!   2 - Compliance rate below the --fail-below threshold

mod audit;
mod cli;
mod config;
mod dataset;
mod error;
mod metrics;
mod models;
mod report;
mod sla;
mod wizard;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat, ReportKind};
use config::Config;
use dataset::Dataset;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use wizard::ReportWizard;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        match handle_init_config() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Initialize logging
    init_logging(&args);

    info!("ESGAuditor v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the audit
    match run_audit(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Audit failed: {}", e);
            eprintln!("\nError: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .esgauditor.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".esgauditor.toml");

    if path.exists() {
        anyhow::bail!(".esgauditor.toml already exists. Remove it first or edit it manually.");
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .esgauditor.toml")?;

    println!("Created .esgauditor.toml with default settings.");
    println!("Edit it to customize output, report, and SLA settings.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete audit workflow. Returns exit code (0 or 2).
fn run_audit(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the dataset
    let input = args
        .input
        .clone()
        .context("No dataset file was provided")?;
    info!("Loading dataset: {}", input.display());
    let mut dataset = Dataset::load(&input)?;

    println!(
        "Loaded {} asset(s), {} SLA policies, {} work order(s)",
        dataset.assets.len(),
        dataset.slas.len(),
        dataset.work_orders.len()
    );

    // Step 2: Validate record invariants
    let validation_errors = dataset.validate();
    if !validation_errors.is_empty() {
        eprintln!("\nDataset validation failed:");
        for err in &validation_errors {
            eprintln!("  - {}", err);
        }
        anyhow::bail!("{} record(s) violate domain invariants", validation_errors.len());
    }

    // Handle --dry-run: validate and exit
    if args.dry_run {
        println!("\nDry run complete. Dataset is valid; no report generated.");
        return Ok(0);
    }

    // Step 3: Aggregate and render
    let today = Utc::now().date_naive();

    // Expired certifications must not count as active in the metrics.
    for asset in &mut dataset.assets {
        for certification in &mut asset.certifications {
            certification.refresh_active(today);
        }
    }

    let (output_text, compliance_rate) = match args.report {
        ReportKind::Esg => {
            let esg_wizard = ReportWizard {
                report_type: cli::report_type_from_arg(args.report_type),
                date_from: args.date_from,
                date_to: args.date_to,
                asset_type: args.asset_type.map(cli::asset_type_from_arg),
                include_compliance_only: args.compliance_only,
                include_recommendations: config.report.include_recommendations,
                audit_window_days: config.report.audit_window_days,
            };

            let esg_report = esg_wizard.run(&dataset, today);
            println!("\nESG Summary:");
            println!(
                "   Assets included: {} of {}",
                esg_report.metadata.assets_included, esg_report.metadata.assets_total
            );
            println!(
                "   Compliance rate: {:.1}%",
                esg_report.metrics.compliance_rate
            );
            println!(
                "   Total carbon footprint: {:.1} kg CO2/year",
                esg_report.metrics.environmental.total_carbon_footprint
            );
            println!(
                "   Audits due soon: {}",
                esg_report.metrics.governance.audits_due_soon
            );

            let rate = esg_report.metrics.compliance_rate;
            let text = match args.format {
                OutputFormat::Json => report::generate_json_esg_report(&esg_report)?,
                OutputFormat::Markdown => report::generate_markdown_esg_report(&esg_report),
            };
            (text, rate)
        }
        ReportKind::Sla => {
            // Presence enforced by Args::validate.
            let sla_name = args
                .sla_name
                .as_deref()
                .context("No SLA policy name was provided")?;
            let policy = dataset
                .find_sla(sla_name)
                .with_context(|| format!("SLA policy \"{}\" not found in the dataset", sla_name))?;

            if !policy.active {
                warn!("SLA policy \"{}\" is inactive", policy.name);
            }

            let sla_report = wizard::build_sla_report(&dataset, policy);
            println!("\nSLA Summary ({}):", sla_report.sla_name);
            println!("   Work orders: {}", sla_report.metrics.total_orders);
            println!(
                "   Compliance rate: {:.1}%",
                sla_report.metrics.compliance_rate
            );
            println!("   MTTR: {:.1}h", sla_report.metrics.mttr_hours);
            println!(
                "   First-time fix rate: {:.1}%",
                sla_report.metrics.first_time_fix_rate
            );

            let rate = sla_report.metrics.compliance_rate;
            let text = match args.format {
                OutputFormat::Json => report::generate_json_sla_report(&sla_report)?,
                OutputFormat::Markdown => report::generate_markdown_sla_report(&sla_report),
            };
            (text, rate)
        }
    };

    // Step 4: Write the report
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.general.output));
    std::fs::write(&output_path, &output_text)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    println!("\nReport saved to: {}", output_path.display());

    // Check --fail-below threshold (CLI takes precedence over config)
    if let Some(threshold) = args.fail_below.or(config.sla.fail_below) {
        if compliance_rate < threshold {
            eprintln!(
                "\nCompliance rate {:.1}% is below the {:.1}% threshold. Failing (exit code 2).",
                compliance_rate, threshold
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .esgauditor.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
