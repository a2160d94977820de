//! Engine services for scheduling and reconciliation.
//!
//! This module contains the operational core: template expansion into
//! concrete shifts, break validation, the partial revenue ledger, the
//! daily-closing state machine, and the adjustment-request workflow. Every
//! service takes a [`crate::models::Caller`] and threads its tenant id into
//! every repository call.

mod adjustment_workflow;
mod break_validator;
mod closing_review;
mod revenue_ledger;
mod shift_generator;

pub use adjustment_workflow::{AdjustmentWorkflow, NewAdjustment, ReviewAction};
pub use break_validator::BreakValidator;
pub use closing_review::{ClosingReview, ReviewDecision, SubmitClosing};
pub use revenue_ledger::{EntryUpdate, NewEntry, RevenueLedger};
pub use shift_generator::{GenerateShifts, GenerationOutcome, ShiftGenerator, SkippedSlot};

use tracing::error;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::Caller;
use crate::repository::{StoreError, UnitDirectory};

/// Wraps a storage failure exactly once: the detail is logged and kept as
/// the error source, the caller sees only the stable message.
pub(crate) fn store_failure(message: &str, source: StoreError) -> EngineError {
    error!(cause = %source, "{message}");
    EngineError::Internal {
        message: message.to_string(),
        source,
    }
}

/// Verifies the unit exists for the caller's tenant and that the caller may
/// operate on it. Tenant mismatches surface as not-found.
pub(crate) async fn check_unit_access(
    units: &dyn UnitDirectory,
    unit_id: Uuid,
    caller: &Caller,
) -> EngineResult<()> {
    let exists = units
        .unit_exists(unit_id, caller.tenant_id)
        .await
        .map_err(|e| store_failure("error while checking unit access", e))?;
    if !exists {
        return Err(EngineError::UnitNotFound { unit_id });
    }
    let allowed = units
        .user_has_unit_access(caller.user_id, unit_id, caller.tenant_id)
        .await
        .map_err(|e| store_failure("error while checking unit access", e))?;
    if !allowed {
        return Err(EngineError::AccessDenied {
            user_id: caller.user_id,
            unit_id,
        });
    }
    Ok(())
}
