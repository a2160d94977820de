//! Break validation and attachment.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakKind, Caller, EmployeeShift, ShiftBreak, TimeRange};
use crate::repository::ScheduleStore;

use super::store_failure;

/// Validates break intervals and attaches them to existing shifts.
pub struct BreakValidator {
    store: Arc<dyn ScheduleStore>,
}

impl BreakValidator {
    /// Creates a validator over the given store.
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    /// Attaches a break to a shift and returns the updated shift.
    ///
    /// The break must be a valid interval (end after start) lying fully
    /// within the shift's scheduled hours. The shift's break list stays
    /// ordered by start time.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ShiftNotFound`] when the shift is absent for the
    ///   caller's tenant.
    /// - Validation when the interval is inverted or spills outside the
    ///   shift hours. Nothing is persisted on rejection.
    pub async fn attach(
        &self,
        shift_id: Uuid,
        kind: BreakKind,
        start: NaiveDateTime,
        end: NaiveDateTime,
        caller: &Caller,
    ) -> EngineResult<EmployeeShift> {
        let mut shift = self
            .store
            .find_shift(shift_id, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while loading shift", e))?
            .ok_or(EngineError::ShiftNotFound { shift_id })?;

        let period = TimeRange::new(start, end)?;
        if !shift.period.contains(&period) {
            return Err(EngineError::validation(
                "break",
                "break must occur within shift hours",
            ));
        }

        shift.breaks.push(ShiftBreak {
            id: Uuid::new_v4(),
            shift_id,
            kind,
            period,
        });
        shift.breaks.sort_by_key(|b| b.period.start);

        self.store
            .update_shift(&shift)
            .await
            .map_err(|e| store_failure("error while saving shift break", e))?;

        info!(%shift_id, breaks = shift.breaks.len(), "break attached");
        Ok(shift)
    }
}
