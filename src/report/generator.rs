//! Markdown and JSON report generation.
//!
//! Turns the aggregated metrics into human-readable Markdown or
//! machine-readable JSON. Which sections appear in an ESG report depends
//! on the wizard's report type; the comprehensive type includes all
//! three categories.

use crate::metrics::esg::{EnvironmentalMetrics, GovernanceMetrics, SocialMetrics};
use crate::wizard::{EsgReport, ReportMetadata, ReportType, SlaReport};
use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// Generate a complete Markdown ESG report.
pub fn generate_markdown_esg_report(report: &EsgReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", report.metadata.report_type));
    output.push_str(&generate_metadata_section(&report.metadata));

    output.push_str("## Overall Compliance\n\n");
    output.push_str(&format!(
        "- **Assets Included:** {}\n",
        report.metrics.total_assets
    ));
    output.push_str(&format!(
        "- **ESG Compliant Assets:** {}\n",
        report.metrics.compliant_assets
    ));
    output.push_str(&format!(
        "- **Compliance Rate:** {:.1}%\n\n",
        report.metrics.compliance_rate
    ));

    let report_type = report.metadata.report_type;
    if matches!(report_type, ReportType::Environmental | ReportType::Comprehensive) {
        output.push_str(&generate_environmental_section(&report.metrics.environmental));
    }
    if matches!(report_type, ReportType::Social | ReportType::Comprehensive) {
        output.push_str(&generate_social_section(&report.metrics.social));
    }
    if matches!(report_type, ReportType::Governance | ReportType::Comprehensive) {
        output.push_str(&generate_governance_section(&report.metrics.governance));
    }

    output.push_str(&generate_recommendations_section(&report.recommendations));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let window = match (metadata.date_from, metadata.date_to) {
        (Some(from), Some(to)) => format!("{} to {}", from, to),
        (Some(from), None) => format!("from {}", from),
        (None, Some(to)) => format!("until {}", to),
        (None, None) => "all dates".to_string(),
    };
    section.push_str(&format!("- **Reporting Window:** {}\n", window));
    section.push_str(&format!(
        "- **Assets Included:** {} of {}\n\n",
        metadata.assets_included, metadata.assets_total
    ));

    section
}

/// Generate the environmental metrics section.
fn generate_environmental_section(metrics: &EnvironmentalMetrics) -> String {
    let mut section = String::new();

    section.push_str("## Environmental\n\n");
    section.push_str(&format!(
        "- **Total Carbon Footprint:** {:.1} kg CO2/year\n",
        metrics.total_carbon_footprint
    ));
    section.push_str(&format!(
        "- **Assets on Renewable Energy:** {}\n\n",
        metrics.renewable_energy_assets
    ));

    section.push_str(&generate_distribution_table(
        "Energy Efficiency Ratings",
        "Rating",
        &metrics.energy_efficiency_distribution,
    ));
    section.push_str(&generate_distribution_table(
        "Environmental Impact Levels",
        "Impact",
        &metrics.environmental_impact_distribution,
    ));

    section
}

/// Generate the social metrics section.
fn generate_social_section(metrics: &SocialMetrics) -> String {
    let mut section = String::new();

    section.push_str("## Social\n\n");
    section.push_str(&format!(
        "- **Safety Compliant Assets:** {}\n",
        metrics.safety_compliant_assets
    ));
    section.push_str(&format!(
        "- **Accessibility Compliant Assets:** {}\n",
        metrics.accessibility_compliant_assets
    ));
    section.push_str(&format!(
        "- **Average Social Impact Score:** {:.1}\n\n",
        metrics.average_social_impact_score
    ));

    section
}

/// Generate the governance metrics section.
fn generate_governance_section(metrics: &GovernanceMetrics) -> String {
    let mut section = String::new();

    section.push_str("## Governance\n\n");
    section.push_str(&format!(
        "- **Regulatory Compliant Assets:** {}\n",
        metrics.regulatory_compliant_assets
    ));
    section.push_str(&format!(
        "- **Assets Holding Certifications:** {}\n",
        metrics.assets_with_certifications
    ));
    section.push_str(&format!(
        "- **Total Certifications:** {}\n",
        metrics.total_certifications
    ));
    section.push_str(&format!(
        "- **Audits Due Soon:** {}\n\n",
        metrics.audits_due_soon
    ));

    section
}

/// Render a frequency distribution as a Markdown table, highest count
/// first.
fn generate_distribution_table<K: Display + Ord + Hash>(
    title: &str,
    key_header: &str,
    distribution: &HashMap<K, usize>,
) -> String {
    if distribution.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str(&format!("### {}\n\n", title));
    section.push_str(&format!("| {} | Assets |\n", key_header));
    section.push_str("|:---|:---:|\n");

    let mut rows: Vec<_> = distribution.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    for (key, count) in rows {
        section.push_str(&format!("| {} | {} |\n", key, count));
    }
    section.push('\n');

    section
}

/// Generate the recommendations section.
fn generate_recommendations_section(recommendations: &[String]) -> String {
    if recommendations.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Recommendations\n\n");
    for (i, rec) in recommendations.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, rec));
    }
    section.push('\n');

    section
}

/// Generate a complete Markdown SLA performance report.
pub fn generate_markdown_sla_report(report: &SlaReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# SLA Performance - {}\n\n", report.sla_name));
    output.push_str(&format!(
        "- **Generated:** {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "- **Policy Status:** {}\n\n",
        if report.active { "Active" } else { "Inactive" }
    ));

    let metrics = &report.metrics;
    output.push_str("## Work Orders\n\n");
    output.push_str(&format!("- **Total:** {}\n", metrics.total_orders));
    output.push_str(&format!(
        "- **With Recorded Start/End:** {}\n",
        metrics.qualifying_orders
    ));
    output.push_str(&format!("- **Breached:** {}\n", metrics.breached_orders));
    output.push_str(&format!(
        "- **Critical Breaches:** {}\n\n",
        metrics.critical_breaches
    ));

    if !report.technician_workload.is_empty() {
        output.push_str("## Open Workload by Technician\n\n");
        output.push_str("| Technician | Open Orders |\n");
        output.push_str("|:---|:---:|\n");
        for entry in &report.technician_workload {
            output.push_str(&format!(
                "| {} | {} |\n",
                entry.technician, entry.open_orders
            ));
        }
        output.push('\n');
    }

    output.push_str("## Performance vs Targets\n\n");
    output.push_str("| KPI | Actual | Target | Met |\n");
    output.push_str("|:---|:---:|:---:|:---:|\n");
    output.push_str(&target_row(
        "Compliance Rate (%)",
        metrics.compliance_rate,
        report.target_compliance_rate,
        metrics.compliance_rate >= report.target_compliance_rate,
    ));
    output.push_str(&target_row(
        "First Time Fix Rate (%)",
        metrics.first_time_fix_rate,
        report.target_first_time_fix_rate,
        metrics.first_time_fix_rate >= report.target_first_time_fix_rate,
    ));
    output.push_str(&target_row(
        "MTTR (hours)",
        metrics.mttr_hours,
        report.target_mttr_hours,
        metrics.mttr_hours <= report.target_mttr_hours,
    ));
    output.push('\n');

    output.push_str(&generate_footer());

    output
}

fn target_row(kpi: &str, actual: f64, target: f64, met: bool) -> String {
    format!(
        "| {} | {:.1} | {:.1} | {} |\n",
        kpi,
        actual,
        target,
        if met { "yes" } else { "no" }
    )
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by ESGAuditor*\n".to_string()
}

/// Generate a JSON ESG report.
pub fn generate_json_esg_report(report: &EsgReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a JSON SLA report.
pub fn generate_json_sla_report(report: &SlaReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
