//! The adjustment-request review workflow.
//!
//! Requests reference entries the ledger already recorded. A reviewer
//! resolves each request exactly once; approving a removal deactivates the
//! referenced entry in the same commit. Approving an alteration records the
//! approval only: the proposed values stay opaque here, and applying them is
//! an explicit follow-up through the ledger's update.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentKind, AdjustmentRequest, AdjustmentStatus, Caller, Role};
use crate::repository::AdjustmentStore;

use super::store_failure;

/// Input for filing a new adjustment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAdjustment {
    /// The revenue entry the request targets.
    pub entry_id: Uuid,
    /// Whether the request alters or removes the entry.
    pub kind: AdjustmentKind,
    /// The requester's stated reason.
    pub motive: String,
    /// Snapshot of the entry before the change. Opaque to the engine.
    pub old_data: Option<String>,
    /// Proposed replacement values. Opaque; absent for removals.
    pub new_data: Option<String>,
}

/// What the reviewer decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Accept the request.
    Approve,
    /// Refuse the request.
    Reject,
}

/// Files and reviews adjustment requests.
pub struct AdjustmentWorkflow {
    store: Arc<dyn AdjustmentStore>,
}

impl AdjustmentWorkflow {
    /// Creates the workflow over the given store.
    pub fn new(store: Arc<dyn AdjustmentStore>) -> Self {
        Self { store }
    }

    /// Files a Pending request on behalf of the caller.
    pub async fn create(
        &self,
        cmd: NewAdjustment,
        caller: &Caller,
    ) -> EngineResult<AdjustmentRequest> {
        let request = AdjustmentRequest {
            id: Uuid::new_v4(),
            entry_id: cmd.entry_id,
            kind: cmd.kind,
            motive: cmd.motive,
            old_data: cmd.old_data,
            new_data: cmd.new_data,
            requester_id: caller.user_id,
            status: AdjustmentStatus::Pending,
        };
        self.store
            .insert_request(&request)
            .await
            .map_err(|e| store_failure("error while saving adjustment request", e))?;

        info!(
            request_id = %request.id,
            entry_id = %request.entry_id,
            kind = %request.kind,
            "adjustment request filed"
        );
        Ok(request)
    }

    /// Resolves a Pending request.
    ///
    /// Requires [`Role::Supervisor`] or higher. All writes of one review
    /// commit atomically: an approved removal lands together with the
    /// deactivation of its entry.
    ///
    /// # Errors
    ///
    /// - [`EngineError::RequestNotFound`] when the request or its referenced
    ///   entry is absent.
    /// - [`EngineError::RequestAlreadyResolved`] when the request was
    ///   reviewed before.
    pub async fn review(
        &self,
        request_id: Uuid,
        action: ReviewAction,
        caller: &Caller,
    ) -> EngineResult<AdjustmentRequest> {
        let (mut request, mut entry) = self
            .store
            .find_request_with_entry(request_id)
            .await
            .map_err(|e| store_failure("error while fetching adjustment request", e))?
            .ok_or(EngineError::RequestNotFound { request_id })?;

        if !caller.role.at_least(Role::Supervisor) {
            return Err(EngineError::AccessDenied {
                user_id: caller.user_id,
                unit_id: entry.unit_id,
            });
        }
        if request.status.is_resolved() {
            return Err(EngineError::RequestAlreadyResolved {
                status: request.status,
            });
        }

        let touched_entry = match (action, request.kind) {
            (ReviewAction::Reject, _) => {
                request.status = AdjustmentStatus::Rejected;
                None
            }
            (ReviewAction::Approve, AdjustmentKind::Removal) => {
                request.status = AdjustmentStatus::Approved;
                entry.active = false;
                Some(&entry)
            }
            (ReviewAction::Approve, AdjustmentKind::Alteration) => {
                request.status = AdjustmentStatus::Approved;
                None
            }
        };

        self.store
            .commit_review(&request, touched_entry)
            .await
            .map_err(|e| store_failure("error while saving adjustment review", e))?;

        info!(
            request_id = %request.id,
            reviewer_id = %caller.user_id,
            status = %request.status,
            "adjustment request reviewed"
        );
        Ok(request)
    }
}
