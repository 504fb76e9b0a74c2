//! Data models for facility assets and maintenance work orders.
//!
//! This module contains the core record types the aggregators operate on:
//! assets with their ESG attribute set, certifications, and work orders.
//! Records arrive already filtered by the caller; the types here only
//! enforce their own invariants.

use crate::error::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a facility asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// In service.
    Active,
    /// Out of service but still held.
    Inactive,
    /// Under maintenance.
    Maintenance,
    /// Disposed of; terminal, records are never hard-deleted.
    Disposed,
}

impl Default for AssetStatus {
    fn default() -> Self {
        AssetStatus::Active
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetStatus::Active => write!(f, "Active"),
            AssetStatus::Inactive => write!(f, "Inactive"),
            AssetStatus::Maintenance => write!(f, "Under Maintenance"),
            AssetStatus::Disposed => write!(f, "Disposed"),
        }
    }
}

/// Broad classification of an asset, used by the report wizard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Equipment,
    Furniture,
    Vehicle,
    Building,
    Other,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Equipment => write!(f, "Equipment"),
            AssetType::Furniture => write!(f, "Furniture"),
            AssetType::Vehicle => write!(f, "Vehicle"),
            AssetType::Building => write!(f, "Building"),
            AssetType::Other => write!(f, "Other"),
        }
    }
}

/// How a disposed asset left the books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisposalMethod {
    Sale,
    Donation,
    Scrap,
    Other,
}

/// Environmental impact level of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentalImpact {
    Low,
    Medium,
    High,
}

impl fmt::Display for EnvironmentalImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentalImpact::Low => write!(f, "Low"),
            EnvironmentalImpact::Medium => write!(f, "Medium"),
            EnvironmentalImpact::High => write!(f, "High"),
        }
    }
}

/// Energy efficiency rating, A (excellent) through E (very poor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyEfficiencyRating {
    A,
    B,
    C,
    D,
    E,
}

impl fmt::Display for EnergyEfficiencyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyEfficiencyRating::A => write!(f, "A"),
            EnergyEfficiencyRating::B => write!(f, "B"),
            EnergyEfficiencyRating::C => write!(f, "C"),
            EnergyEfficiencyRating::D => write!(f, "D"),
            EnergyEfficiencyRating::E => write!(f, "E"),
        }
    }
}

/// What a certification attests to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationType {
    Environmental,
    Social,
    Governance,
    Safety,
    Quality,
    Other,
}

/// A certification held by an asset (ISO, energy label, safety cert, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    /// Certification name.
    pub name: String,
    /// Short reference code.
    #[serde(default)]
    pub code: Option<String>,
    /// What the certification attests to.
    pub certification_type: CertificationType,
    /// Organization that issued it.
    #[serde(default)]
    pub issuing_body: Option<String>,
    /// Date of issue.
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    /// Expiry date; must not precede the issue date.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Whether the certification is currently in force.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Certification {
    /// Check the expiry-after-issue invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(issue), Some(expiry)) = (self.issue_date, self.expiry_date) {
            if expiry < issue {
                return Err(ValidationError::ExpiryBeforeIssue { issue, expiry });
            }
        }
        Ok(())
    }

    /// Clear the active flag once the expiry date has passed.
    pub fn refresh_active(&mut self, today: NaiveDate) {
        if let Some(expiry) = self.expiry_date {
            if expiry < today {
                self.is_active = false;
            }
        }
    }
}

/// A facility asset with its ESG attribute set.
///
/// Optional numeric fields follow an explicit default-value policy: the
/// aggregators treat a missing value as a zero contribution, never as an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Stable identifier.
    pub id: String,
    /// Asset name.
    pub name: String,
    /// Asset code / tag.
    #[serde(default)]
    pub code: Option<String>,
    /// Broad classification.
    pub asset_type: AssetType,
    /// Date of purchase.
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    /// Acquisition cost.
    #[serde(default)]
    pub purchase_cost: Option<f64>,
    /// Current book value.
    #[serde(default)]
    pub current_value: Option<f64>,
    /// Free-form location description.
    #[serde(default)]
    pub location: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: AssetStatus,

    /// Date of disposal; must not precede the purchase date.
    #[serde(default)]
    pub disposal_date: Option<NaiveDate>,
    /// Why the asset was disposed of.
    #[serde(default)]
    pub disposal_reason: Option<String>,
    /// How the asset was disposed of.
    #[serde(default)]
    pub disposal_method: Option<DisposalMethod>,

    // Environmental attributes
    /// Whether the asset meets the overall ESG compliance bar.
    #[serde(default)]
    pub esg_compliant: bool,
    /// Environmental impact level; set only for environmentally tracked assets.
    #[serde(default)]
    pub environmental_impact: Option<EnvironmentalImpact>,
    /// Energy efficiency rating.
    #[serde(default)]
    pub energy_efficiency_rating: Option<EnergyEfficiencyRating>,
    /// Estimated carbon footprint in kg CO2 per year; never negative.
    #[serde(default)]
    pub carbon_footprint: Option<f64>,
    /// Whether the asset runs on renewable energy.
    #[serde(default)]
    pub renewable_energy: bool,

    // Social attributes
    /// Safety compliance flag.
    #[serde(default)]
    pub safety_compliant: bool,
    /// Accessibility compliance flag.
    #[serde(default)]
    pub accessibility_compliant: bool,
    /// Social impact score, 1-10 inclusive when present.
    #[serde(default)]
    pub social_impact_score: Option<f64>,

    // Governance attributes
    /// Regulatory compliance flag.
    #[serde(default)]
    pub regulatory_compliant: bool,
    /// Certifications held by the asset.
    #[serde(default)]
    pub certifications: Vec<Certification>,
    /// Last audit date.
    #[serde(default)]
    pub audit_date: Option<NaiveDate>,
    /// Next scheduled audit date.
    #[serde(default)]
    pub next_audit_date: Option<NaiveDate>,
}

impl Asset {
    /// Check every invariant this record carries, including its
    /// certifications.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(purchase), Some(disposal)) = (self.purchase_date, self.disposal_date) {
            if disposal < purchase {
                return Err(ValidationError::DisposalBeforePurchase { purchase, disposal });
            }
        }

        if let Some(score) = self.social_impact_score {
            if !(1.0..=10.0).contains(&score) {
                return Err(ValidationError::SocialImpactScoreOutOfRange(score));
            }
        }

        if let Some(footprint) = self.carbon_footprint {
            if footprint < 0.0 {
                return Err(ValidationError::NegativeCarbonFootprint(footprint));
            }
        }

        for certification in &self.certifications {
            certification.validate()?;
        }

        Ok(())
    }

    /// Dispose of the asset: set the terminal status and stamp the
    /// disposal date. Rejected when the date precedes the purchase date.
    #[allow(dead_code)] // Record action for dataset producers; the CLI only reads
    pub fn dispose(
        &mut self,
        date: NaiveDate,
        method: DisposalMethod,
        reason: Option<String>,
    ) -> Result<(), ValidationError> {
        if let Some(purchase) = self.purchase_date {
            if date < purchase {
                return Err(ValidationError::DisposalBeforePurchase {
                    purchase,
                    disposal: date,
                });
            }
        }

        self.status = AssetStatus::Disposed;
        self.disposal_date = Some(date);
        self.disposal_method = Some(method);
        self.disposal_reason = reason;
        Ok(())
    }

    /// Whether the asset holds at least one certification.
    pub fn has_certifications(&self) -> bool {
        !self.certifications.is_empty()
    }

    /// Whether the next audit falls within `window_days` of `today`
    /// (inclusive upper bound).
    pub fn audit_due_within(&self, today: NaiveDate, window_days: i64) -> bool {
        match self.next_audit_date {
            Some(next) => next <= today + chrono::Duration::days(window_days),
            None => false,
        }
    }
}

/// Work order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Draft,
    Assigned,
    InProgress,
    Done,
    Cancelled,
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkOrderStatus::Draft => write!(f, "Draft"),
            WorkOrderStatus::Assigned => write!(f, "Assigned"),
            WorkOrderStatus::InProgress => write!(f, "In Progress"),
            WorkOrderStatus::Done => write!(f, "Done"),
            WorkOrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A maintenance work order, linked to an SLA policy and a technician.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Stable identifier.
    pub id: String,
    /// Work order name.
    pub name: String,
    /// Name of the SLA policy governing this order.
    #[serde(default)]
    pub sla: Option<String>,
    /// Assigned technician.
    #[serde(default)]
    pub technician: Option<String>,
    /// Lifecycle status.
    pub status: WorkOrderStatus,
    /// When work actually started.
    #[serde(default)]
    pub actual_start: Option<DateTime<Utc>>,
    /// When work actually finished.
    #[serde(default)]
    pub actual_end: Option<DateTime<Utc>>,
    /// Whether the issue was fixed on the first visit.
    #[serde(default)]
    pub first_time_fix: bool,
}

impl WorkOrder {
    /// Realized repair time in hours, if both timestamps are present.
    pub fn realized_hours(&self) -> Option<f64> {
        match (self.actual_start, self.actual_end) {
            (Some(start), Some(end)) => Some((end - start).num_seconds() as f64 / 3600.0),
            _ => None,
        }
    }

    /// Whether the order still counts toward a technician's workload.
    pub fn is_open(&self) -> bool {
        !matches!(
            self.status,
            WorkOrderStatus::Done | WorkOrderStatus::Cancelled
        )
    }
}
