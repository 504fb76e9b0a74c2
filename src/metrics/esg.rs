//! ESG metrics aggregation.
//!
//! Single-pass aggregation over a caller-filtered asset collection,
//! producing per-category (environmental/social/governance) counts, sums,
//! and ratios. Pure reads: no side effects, no errors. Missing optional
//! values contribute zero rather than failing.

use crate::models::{Asset, EnergyEfficiencyRating, EnvironmentalImpact};
use serde::Serialize;
use std::collections::HashMap;

/// Default governance audit lookahead window in days.
pub const DEFAULT_AUDIT_WINDOW_DAYS: i64 = 30;

/// Environmental slice of the metrics, computed over assets that carry
/// an environmental impact level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvironmentalMetrics {
    /// Sum of carbon footprints; unset footprints count as 0.
    pub total_carbon_footprint: f64,
    /// Number of environmentally tracked assets on renewable energy.
    pub renewable_energy_assets: usize,
    /// Frequency of energy efficiency ratings.
    pub energy_efficiency_distribution: HashMap<EnergyEfficiencyRating, usize>,
    /// Frequency of environmental impact levels.
    pub environmental_impact_distribution: HashMap<EnvironmentalImpact, usize>,
}

/// Social slice of the metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SocialMetrics {
    /// Assets flagged safety compliant.
    pub safety_compliant_assets: usize,
    /// Assets flagged accessibility compliant.
    pub accessibility_compliant_assets: usize,
    /// Sum of social impact scores over assets that have one.
    pub total_social_impact_score: f64,
    /// Mean social impact score over assets that have one; 0 if none do.
    pub average_social_impact_score: f64,
}

/// Governance slice of the metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GovernanceMetrics {
    /// Assets flagged regulatory compliant.
    pub regulatory_compliant_assets: usize,
    /// Assets holding at least one certification.
    pub assets_with_certifications: usize,
    /// Total certification count across all assets.
    pub total_certifications: usize,
    /// Assets whose next audit date falls within the lookahead window
    /// (inclusive upper bound).
    pub audits_due_soon: usize,
}

/// The complete ESG metrics result handed to the report generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EsgMetrics {
    /// Number of assets aggregated.
    pub total_assets: usize,
    /// Assets flagged ESG compliant.
    pub compliant_assets: usize,
    /// Compliant / total, as a percentage; 0 for an empty collection.
    pub compliance_rate: f64,
    pub environmental: EnvironmentalMetrics,
    pub social: SocialMetrics,
    pub governance: GovernanceMetrics,
}

/// Aggregate ESG metrics over an asset collection using the default
/// 30-day audit lookahead.
#[allow(dead_code)] // The wizard always passes the configured window
pub fn compute(assets: &[Asset], today: chrono::NaiveDate) -> EsgMetrics {
    compute_with_window(assets, today, DEFAULT_AUDIT_WINDOW_DAYS)
}

/// Aggregate ESG metrics with an explicit audit lookahead window.
pub fn compute_with_window(
    assets: &[Asset],
    today: chrono::NaiveDate,
    audit_window_days: i64,
) -> EsgMetrics {
    let mut metrics = EsgMetrics {
        total_assets: assets.len(),
        ..EsgMetrics::default()
    };

    if assets.is_empty() {
        return metrics;
    }

    for asset in assets {
        if asset.esg_compliant {
            metrics.compliant_assets += 1;
        }

        // Environmental metrics only cover environmentally tracked assets.
        if let Some(impact) = asset.environmental_impact {
            metrics.environmental.total_carbon_footprint +=
                asset.carbon_footprint.unwrap_or(0.0);

            if asset.renewable_energy {
                metrics.environmental.renewable_energy_assets += 1;
            }

            if let Some(rating) = asset.energy_efficiency_rating {
                *metrics
                    .environmental
                    .energy_efficiency_distribution
                    .entry(rating)
                    .or_insert(0) += 1;
            }

            *metrics
                .environmental
                .environmental_impact_distribution
                .entry(impact)
                .or_insert(0) += 1;
        }

        if asset.safety_compliant {
            metrics.social.safety_compliant_assets += 1;
        }
        if asset.accessibility_compliant {
            metrics.social.accessibility_compliant_assets += 1;
        }

        if asset.regulatory_compliant {
            metrics.governance.regulatory_compliant_assets += 1;
        }
        if asset.has_certifications() {
            metrics.governance.assets_with_certifications += 1;
        }
        metrics.governance.total_certifications += asset.certifications.len();
        if asset.audit_due_within(today, audit_window_days) {
            metrics.governance.audits_due_soon += 1;
        }
    }

    metrics.compliance_rate =
        (metrics.compliant_assets as f64 / metrics.total_assets as f64) * 100.0;

    // The score average only covers assets that actually carry a score.
    let scored: Vec<f64> = assets
        .iter()
        .filter_map(|a| a.social_impact_score)
        .collect();
    if !scored.is_empty() {
        metrics.social.total_social_impact_score = scored.iter().sum();
        metrics.social.average_social_impact_score =
            metrics.social.total_social_impact_score / scored.len() as f64;
    }

    metrics
}
