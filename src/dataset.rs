//! Dataset loading.
//!
//! The auditor operates on an exported snapshot: one JSON file holding
//! the asset, SLA policy, and work order collections. Persistence and
//! querying stay with whatever system produced the export; this module
//! only deserializes and validates it.

use crate::error::ValidationError;
use crate::models::{Asset, WorkOrder};
use crate::sla::SlaPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An exported snapshot of the records the aggregators run over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Facility assets with their ESG attributes.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// SLA policies.
    #[serde(default)]
    pub slas: Vec<SlaPolicy>,
    /// Maintenance work orders.
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
}

/// A validation failure located within the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetError {
    /// Human-readable record reference, e.g. `asset "A12"`.
    pub record: String,
    pub error: ValidationError,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.record, self.error)
    }
}

impl Dataset {
    /// Load a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;

        let dataset: Dataset = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?;

        Ok(dataset)
    }

    /// Run every record-level invariant and collect the failures.
    ///
    /// An empty result means the dataset is clean. Validation never stops
    /// at the first failure so a report of everything wrong can be shown
    /// at once.
    pub fn validate(&self) -> Vec<DatasetError> {
        let mut errors = Vec::new();

        for asset in &self.assets {
            if let Err(error) = asset.validate() {
                errors.push(DatasetError {
                    record: format!("asset \"{}\"", asset.id),
                    error,
                });
            }
        }

        for sla in &self.slas {
            if let Err(error) = sla.validate() {
                errors.push(DatasetError {
                    record: format!("sla \"{}\"", sla.name),
                    error,
                });
            }
        }

        errors
    }

    /// Find an SLA policy by name.
    pub fn find_sla(&self, name: &str) -> Option<&SlaPolicy> {
        self.slas.iter().find(|s| s.name == name)
    }

    /// Work orders linked to the named SLA policy.
    pub fn orders_for_sla(&self, name: &str) -> Vec<&WorkOrder> {
        self.work_orders
            .iter()
            .filter(|o| o.sla.as_deref() == Some(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL_DATASET: &str = r#"{
        "assets": [
            {
                "id": "A1",
                "name": "Chiller",
                "asset_type": "equipment",
                "purchase_date": "2023-01-15",
                "esg_compliant": true,
                "environmental_impact": "medium",
                "carbon_footprint": 120.5
            }
        ],
        "slas": [
            {
                "name": "Default SLA",
                "response_time_hours": 4.0,
                "resolution_time_hours": 24.0
            }
        ],
        "work_orders": [
            {
                "id": "WO1",
                "name": "Fix chiller",
                "sla": "Default SLA",
                "technician": "dana",
                "status": "done",
                "actual_start": "2024-06-01T08:00:00Z",
                "actual_end": "2024-06-01T12:00:00Z",
                "first_time_fix": true
            }
        ]
    }"#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL_DATASET.as_bytes()).unwrap();

        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.assets.len(), 1);
        assert_eq!(dataset.slas.len(), 1);
        assert_eq!(dataset.work_orders.len(), 1);
        assert_eq!(dataset.work_orders[0].realized_hours(), Some(4.0));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(Dataset::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Dataset::load(Path::new("/nonexistent/dataset.json")).is_err());
    }

    #[test]
    fn test_validate_collects_all_failures() {
        let mut dataset: Dataset = serde_json::from_str(MINIMAL_DATASET).unwrap();
        dataset.assets[0].carbon_footprint = Some(-2.0);
        dataset.slas[0].response_time_hours = 48.0; // after resolution time

        let errors = dataset.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].record.contains("A1"));
        assert!(errors[1].record.contains("Default SLA"));
    }

    #[test]
    fn test_orders_for_sla_filters_by_name() {
        let dataset: Dataset = serde_json::from_str(MINIMAL_DATASET).unwrap();
        assert_eq!(dataset.orders_for_sla("Default SLA").len(), 1);
        assert!(dataset.orders_for_sla("Other SLA").is_empty());
        assert!(dataset.find_sla("Default SLA").is_some());
    }

    #[test]
    fn test_demo_fixture_loads_clean() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/demo_dataset.json");

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.assets.len(), 3);
        assert_eq!(dataset.slas.len(), 1);
        assert_eq!(dataset.work_orders.len(), 2);
        assert!(dataset.validate().is_empty());
    }

    #[test]
    fn test_empty_object_is_a_valid_dataset() {
        let dataset: Dataset = serde_json::from_str("{}").unwrap();
        assert!(dataset.assets.is_empty());
        assert!(dataset.validate().is_empty());
    }
}
