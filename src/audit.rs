//! Audit trail capability.
//!
//! Entities that must keep a history of who changed them and why
//! implement [`Auditable`]. The trail is an append-only list of entries;
//! nothing in this crate ever rewrites or removes one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single audit trail entry: who did what, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Name of the user who performed the action.
    pub actor: String,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Human-readable description of the action.
    pub message: String,
}

impl AuditEntry {
    pub fn new(actor: &str, timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            actor: actor.to_string(),
            timestamp,
            message: message.into(),
        }
    }
}

/// Capability for entities that carry an append-only audit trail.
pub trait Auditable {
    /// Append an entry to the trail.
    fn append(&mut self, actor: &str, timestamp: DateTime<Utc>, message: &str);

    /// The full trail, oldest entry first.
    fn history(&self) -> &[AuditEntry];
}
