//! SLA policies.
//!
//! A policy defines the expected response/resolution turnaround for
//! maintenance work orders, plus breach thresholds and KPI targets. The
//! active flag is a two-state machine (active/inactive) whose every
//! transition is recorded on the policy's audit trail; deactivation
//! additionally requires a reason.

use crate::audit::{AuditEntry, Auditable};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Service Level Agreement policy for maintenance work orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaPolicy {
    /// Policy name; work orders link to it by name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Higher number = higher priority when several policies apply.
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Whether the policy is in force.
    #[serde(default = "default_active")]
    pub active: bool,

    /// Expected first-response time in hours.
    pub response_time_hours: f64,
    /// Expected resolution time in hours; a realized repair time beyond
    /// this is a breach.
    pub resolution_time_hours: f64,
    /// Hours beyond which a breach raises a warning.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold_hours: f64,
    /// Hours beyond which a breach is critical.
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold_hours: f64,

    /// Target mean time to repair, for target-versus-actual reporting.
    #[serde(default = "default_target_mttr")]
    pub target_mttr_hours: f64,
    /// Target first-time-fix rate in percent.
    #[serde(default = "default_target_fix_rate")]
    pub target_first_time_fix_rate: f64,
    /// Target compliance rate in percent.
    #[serde(default = "default_target_compliance")]
    pub target_compliance_rate: f64,

    /// Activation/deactivation audit trail, oldest first.
    #[serde(default)]
    pub audit_log: Vec<AuditEntry>,
}

fn default_priority() -> i32 {
    10
}

fn default_active() -> bool {
    true
}

fn default_warning_threshold() -> f64 {
    2.0
}

fn default_critical_threshold() -> f64 {
    4.0
}

fn default_target_mttr() -> f64 {
    8.0
}

fn default_target_fix_rate() -> f64 {
    85.0
}

fn default_target_compliance() -> f64 {
    95.0
}

impl SlaPolicy {
    /// Check the threshold ordering invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.response_time_hours <= 0.0 || self.resolution_time_hours <= 0.0 {
            return Err(ValidationError::NonPositiveSlaTimeframe);
        }
        if self.response_time_hours >= self.resolution_time_hours {
            return Err(ValidationError::ResponseNotBeforeResolution);
        }
        if self.warning_threshold_hours <= 0.0 || self.critical_threshold_hours <= 0.0 {
            return Err(ValidationError::NonPositiveSlaThreshold);
        }
        if self.warning_threshold_hours >= self.critical_threshold_hours {
            return Err(ValidationError::WarningNotBeforeCritical);
        }
        Ok(())
    }

    /// Put the policy back in force. Already-active policies are left
    /// untouched; the trail only records real transitions.
    #[allow(dead_code)] // Record action for dataset producers; the CLI only reads
    pub fn activate(&mut self, actor: &str, now: DateTime<Utc>) {
        if self.active {
            return;
        }
        self.active = true;
        let message = format!("SLA \"{}\" activated", self.name);
        self.append(actor, now, &message);
    }

    /// Take the policy out of force. Requires a non-empty reason, which
    /// is recorded on the audit trail together with the actor.
    #[allow(dead_code)] // Record action for dataset producers; the CLI only reads
    pub fn deactivate(
        &mut self,
        actor: &str,
        now: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), ValidationError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::EmptyDeactivationReason);
        }
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let message = format!("SLA \"{}\" deactivated: {}", self.name, reason);
        self.append(actor, now, &message);
        Ok(())
    }
}

impl Auditable for SlaPolicy {
    fn append(&mut self, actor: &str, timestamp: DateTime<Utc>, message: &str) {
        self.audit_log.push(AuditEntry::new(actor, timestamp, message));
    }

    fn history(&self) -> &[AuditEntry] {
        &self.audit_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_policy() -> SlaPolicy {
        SlaPolicy {
            name: "Default SLA".to_string(),
            description: None,
            priority: 10,
            active: true,
            response_time_hours: 4.0,
            resolution_time_hours: 24.0,
            warning_threshold_hours: 2.0,
            critical_threshold_hours: 4.0,
            target_mttr_hours: 8.0,
            target_first_time_fix_rate: 85.0,
            target_compliance_rate: 95.0,
            audit_log: Vec::new(),
        }
    }

    #[test]
    fn test_validate_accepts_default_thresholds() {
        assert!(make_policy().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_response_after_resolution() {
        let mut policy = make_policy();
        policy.response_time_hours = 24.0;
        policy.resolution_time_hours = 4.0;
        assert_eq!(
            policy.validate(),
            Err(ValidationError::ResponseNotBeforeResolution)
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_timeframes() {
        let mut policy = make_policy();
        policy.response_time_hours = 0.0;
        assert_eq!(
            policy.validate(),
            Err(ValidationError::NonPositiveSlaTimeframe)
        );
    }

    #[test]
    fn test_validate_rejects_misordered_breach_thresholds() {
        let mut policy = make_policy();
        policy.warning_threshold_hours = 4.0;
        policy.critical_threshold_hours = 2.0;
        assert_eq!(
            policy.validate(),
            Err(ValidationError::WarningNotBeforeCritical)
        );
    }

    #[test]
    fn test_deactivate_requires_reason() {
        let mut policy = make_policy();
        let err = policy.deactivate("alice", Utc::now(), "   ").unwrap_err();

        assert_eq!(err, ValidationError::EmptyDeactivationReason);
        assert!(policy.active);
        assert!(policy.history().is_empty());
    }

    #[test]
    fn test_deactivate_logs_actor_and_reason() {
        let mut policy = make_policy();
        policy
            .deactivate("alice", Utc::now(), "superseded by new contract")
            .unwrap();

        assert!(!policy.active);
        assert_eq!(policy.history().len(), 1);

        let entry = &policy.history()[0];
        assert_eq!(entry.actor, "alice");
        assert!(entry.message.contains("superseded by new contract"));
    }

    #[test]
    fn test_activate_logs_actor() {
        let mut policy = make_policy();
        policy.deactivate("alice", Utc::now(), "paused").unwrap();
        policy.activate("bob", Utc::now());

        assert!(policy.active);
        assert_eq!(policy.history().len(), 2);
        assert_eq!(policy.history()[1].actor, "bob");
        assert!(policy.history()[1].message.contains("activated"));
    }

    #[test]
    fn test_transitions_to_current_state_are_no_ops() {
        let mut policy = make_policy();
        policy.activate("alice", Utc::now());
        assert!(policy.history().is_empty());

        policy.deactivate("alice", Utc::now(), "paused").unwrap();
        policy.deactivate("bob", Utc::now(), "paused again").unwrap();
        assert_eq!(policy.history().len(), 1);
    }
}
