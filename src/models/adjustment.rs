//! Adjustment requests against recorded revenue entries.
//!
//! A requester proposes a correction (alteration or removal) to an entry that
//! is already part of a closing; a reviewer resolves it. The old/new data
//! snapshots are opaque blobs at this boundary: the engine stores and returns
//! them but never parses their structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the request proposes to do with the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Change the entry's recorded fields.
    Alteration,
    /// Deactivate the entry.
    Removal,
}

impl std::fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentKind::Alteration => write!(f, "alteration"),
            AdjustmentKind::Removal => write!(f, "removal"),
        }
    }
}

/// Review state of an adjustment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentStatus {
    /// Created, awaiting review.
    Pending,
    /// Accepted by a reviewer.
    Approved,
    /// Refused by a reviewer.
    Rejected,
}

impl AdjustmentStatus {
    /// Returns true once the request has been reviewed.
    pub fn is_resolved(&self) -> bool {
        matches!(self, AdjustmentStatus::Approved | AdjustmentStatus::Rejected)
    }
}

impl std::fmt::Display for AdjustmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdjustmentStatus::Pending => write!(f, "pending"),
            AdjustmentStatus::Approved => write!(f, "approved"),
            AdjustmentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A proposed correction to an already-recorded revenue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The revenue entry the request targets.
    pub entry_id: Uuid,
    /// Whether the request alters or removes the entry.
    pub kind: AdjustmentKind,
    /// The requester's stated reason.
    pub motive: String,
    /// Snapshot of the entry before the proposed change. Opaque.
    pub old_data: Option<String>,
    /// The proposed replacement values. Opaque; absent for removals.
    pub new_data: Option<String>,
    /// The user who filed the request.
    pub requester_id: Uuid,
    /// Review state.
    pub status: AdjustmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_not_resolved() {
        assert!(!AdjustmentStatus::Pending.is_resolved());
        assert!(AdjustmentStatus::Approved.is_resolved());
        assert!(AdjustmentStatus::Rejected.is_resolved());
    }

    #[test]
    fn test_request_serialization_keeps_snapshots_verbatim() {
        let request = AdjustmentRequest {
            id: Uuid::new_v4(),
            entry_id: Uuid::new_v4(),
            kind: AdjustmentKind::Alteration,
            motive: "wrong amount keyed in".to_string(),
            old_data: Some(r#"{"amount":"10.00"}"#.to_string()),
            new_data: Some(r#"{"amount":"100.00"}"#.to_string()),
            requester_id: Uuid::new_v4(),
            status: AdjustmentStatus::Pending,
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: AdjustmentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.old_data, request.old_data);
        assert_eq!(back.new_data, request.new_data);
    }
}
