//! Report wizard.
//!
//! An ephemeral parameter object that drives one report generation: it
//! filters the asset collection by the reporting window and the optional
//! asset-type/compliance filters, runs the aggregators, and assembles a
//! report for the rendering layer. Nothing here is persisted.

use crate::dataset::Dataset;
use crate::metrics::{esg, esg::EsgMetrics, sla, sla::SlaMetrics};
use crate::models::{Asset, AssetType};
use crate::sla::SlaPolicy;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

/// Which ESG category the report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Environmental,
    Social,
    Governance,
    Comprehensive,
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Environmental => write!(f, "Environmental Report"),
            ReportType::Social => write!(f, "Social Impact Report"),
            ReportType::Governance => write!(f, "Governance Report"),
            ReportType::Comprehensive => write!(f, "Comprehensive ESG Report"),
        }
    }
}

/// Parameters for one ESG report run.
#[derive(Debug, Clone)]
pub struct ReportWizard {
    pub report_type: ReportType,
    /// Lower bound on asset purchase date; unbounded when `None`.
    pub date_from: Option<NaiveDate>,
    /// Upper bound on asset purchase date; unbounded when `None`.
    pub date_to: Option<NaiveDate>,
    /// Restrict to one asset type.
    pub asset_type: Option<AssetType>,
    /// Only include assets already flagged ESG compliant.
    pub include_compliance_only: bool,
    /// Append improvement recommendations to the report.
    pub include_recommendations: bool,
    /// Governance audit lookahead in days.
    pub audit_window_days: i64,
}

impl Default for ReportWizard {
    fn default() -> Self {
        Self {
            report_type: ReportType::Comprehensive,
            date_from: None,
            date_to: None,
            asset_type: None,
            include_compliance_only: false,
            include_recommendations: true,
            audit_window_days: esg::DEFAULT_AUDIT_WINDOW_DAYS,
        }
    }
}

/// Metadata about a generated ESG report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub report_type: ReportType,
    pub generated_at: DateTime<Utc>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Assets in the dataset before filtering.
    pub assets_total: usize,
    /// Assets that passed the wizard filters.
    pub assets_included: usize,
}

/// A complete ESG report, ready for the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct EsgReport {
    pub metadata: ReportMetadata,
    pub metrics: EsgMetrics,
    pub recommendations: Vec<String>,
}

/// A complete SLA performance report for one policy.
#[derive(Debug, Clone, Serialize)]
pub struct SlaReport {
    pub sla_name: String,
    pub generated_at: DateTime<Utc>,
    pub active: bool,
    pub metrics: SlaMetrics,
    /// Open orders per technician, sorted by load (heaviest first).
    pub technician_workload: Vec<TechnicianWorkload>,
    /// Target KPI values, echoed for target-versus-actual rendering.
    pub target_mttr_hours: f64,
    pub target_first_time_fix_rate: f64,
    pub target_compliance_rate: f64,
}

/// A technician's open-order count under one policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicianWorkload {
    pub technician: String,
    pub open_orders: usize,
}

impl ReportWizard {
    /// Apply the wizard filters to the asset collection.
    ///
    /// Assets without a purchase date are excluded whenever a date bound
    /// is set, matching the filter-on-purchase-date semantics.
    pub fn filter_assets<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        assets
            .iter()
            .filter(|asset| {
                if self.date_from.is_some() || self.date_to.is_some() {
                    let purchased = match asset.purchase_date {
                        Some(date) => date,
                        None => return false,
                    };
                    if let Some(from) = self.date_from {
                        if purchased < from {
                            return false;
                        }
                    }
                    if let Some(to) = self.date_to {
                        if purchased > to {
                            return false;
                        }
                    }
                }

                if let Some(asset_type) = self.asset_type {
                    if asset.asset_type != asset_type {
                        return false;
                    }
                }

                if self.include_compliance_only && !asset.esg_compliant {
                    return false;
                }

                true
            })
            .collect()
    }

    /// Filter, aggregate, and assemble the ESG report.
    pub fn run(&self, dataset: &Dataset, today: NaiveDate) -> EsgReport {
        let selected = self.filter_assets(&dataset.assets);
        let owned: Vec<Asset> = selected.iter().map(|a| (*a).clone()).collect();
        let metrics = esg::compute_with_window(&owned, today, self.audit_window_days);

        tracing::debug!(
            total = dataset.assets.len(),
            included = owned.len(),
            "aggregated ESG metrics"
        );

        let recommendations = if self.include_recommendations {
            build_recommendations(&metrics, self.audit_window_days)
        } else {
            Vec::new()
        };

        EsgReport {
            metadata: ReportMetadata {
                report_type: self.report_type,
                generated_at: Utc::now(),
                date_from: self.date_from,
                date_to: self.date_to,
                assets_total: dataset.assets.len(),
                assets_included: owned.len(),
            },
            metrics,
            recommendations,
        }
    }
}

/// Aggregate the work orders linked to one SLA policy into a report.
pub fn build_sla_report(dataset: &Dataset, policy: &SlaPolicy) -> SlaReport {
    let orders: Vec<_> = dataset
        .orders_for_sla(&policy.name)
        .into_iter()
        .cloned()
        .collect();
    let metrics = sla::compute(&orders, policy);

    // One open-workload count per technician that appears on the orders.
    let mut technicians: Vec<&str> = orders
        .iter()
        .filter_map(|o| o.technician.as_deref())
        .collect();
    technicians.sort_unstable();
    technicians.dedup();

    let mut technician_workload: Vec<TechnicianWorkload> = technicians
        .into_iter()
        .map(|technician| TechnicianWorkload {
            technician: technician.to_string(),
            open_orders: sla::open_workload(&orders, technician),
        })
        .collect();
    technician_workload.sort_by(|a, b| {
        b.open_orders
            .cmp(&a.open_orders)
            .then_with(|| a.technician.cmp(&b.technician))
    });

    tracing::debug!(
        sla = %policy.name,
        orders = orders.len(),
        "aggregated SLA metrics"
    );

    SlaReport {
        sla_name: policy.name.clone(),
        generated_at: Utc::now(),
        active: policy.active,
        metrics,
        technician_workload,
        target_mttr_hours: policy.target_mttr_hours,
        target_first_time_fix_rate: policy.target_first_time_fix_rate,
        target_compliance_rate: policy.target_compliance_rate,
    }
}

/// Derive improvement recommendations from the computed metrics.
fn build_recommendations(metrics: &EsgMetrics, audit_window_days: i64) -> Vec<String> {
    let mut recommendations = Vec::new();

    if metrics.total_assets == 0 {
        recommendations
            .push("No assets matched the report filters; widen the reporting window.".to_string());
        return recommendations;
    }

    if metrics.compliance_rate < 100.0 {
        let non_compliant = metrics.total_assets - metrics.compliant_assets;
        recommendations.push(format!(
            "{} asset(s) are not ESG compliant; review them against the compliance checklist.",
            non_compliant
        ));
    }

    if metrics.governance.audits_due_soon > 0 {
        recommendations.push(format!(
            "{} asset(s) have audits due within {} days; schedule auditors now.",
            metrics.governance.audits_due_soon, audit_window_days
        ));
    }

    if metrics.environmental.total_carbon_footprint > 0.0
        && metrics.environmental.renewable_energy_assets == 0
    {
        recommendations.push(
            "No environmentally tracked asset uses renewable energy; evaluate green power options."
                .to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations
            .push("All tracked metrics are in good shape; keep the audit cadence.".to_string());
    }

    recommendations
}
