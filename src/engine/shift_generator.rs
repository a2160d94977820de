//! Template expansion into concrete employee shifts.
//!
//! The generator walks a date range for a list of users, applies the
//! working-day policy for the template's schedule type, computes each slot
//! with the overnight push, and skips slots that would overlap an existing
//! shift of the same user. Skipping is not a failure: the batch as a whole
//! still succeeds and reports what it left out.

use std::sync::Arc;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SchedulePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{Caller, EmployeeShift, TimeRange};
use crate::repository::ScheduleStore;

use super::store_failure;

/// Input for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateShifts {
    /// The unit the shifts belong to.
    pub unit_id: Uuid,
    /// The template to expand. Must belong to the unit.
    pub template_id: Uuid,
    /// First date of the range, inclusive.
    pub start_date: NaiveDate,
    /// Last date of the range, inclusive.
    pub end_date: NaiveDate,
    /// The users to roster.
    pub user_ids: Vec<Uuid>,
}

/// A slot the generator left out because it conflicted with an existing shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSlot {
    /// The user the slot was for.
    pub user_id: Uuid,
    /// The date the slot was for.
    pub date: NaiveDate,
}

/// The result of a generation run.
///
/// Zero created shifts is a valid outcome, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// The shifts that were persisted, in user-then-date order.
    pub created: Vec<EmployeeShift>,
    /// Slots skipped because of conflicts.
    pub skipped: Vec<SkippedSlot>,
}

/// Expands schedule templates into persisted shifts.
pub struct ShiftGenerator {
    store: Arc<dyn ScheduleStore>,
    policy: SchedulePolicy,
}

impl ShiftGenerator {
    /// Creates a generator over the given store and working-day policy.
    pub fn new(store: Arc<dyn ScheduleStore>, policy: SchedulePolicy) -> Self {
        Self { store, policy }
    }

    /// Generates shifts for every user and eligible date in the range.
    ///
    /// For each user the store is queried once for shifts intersecting the
    /// whole candidate window; each slot is then tested against those and
    /// against the batch built so far, so duplicate user ids in the input
    /// cannot produce overlapping shifts either. The surviving batch is
    /// persisted through a single `insert_shifts` call.
    ///
    /// # Errors
    ///
    /// - Validation when the range is inverted.
    /// - [`EngineError::TemplateNotFound`] when no template matches
    ///   (template, unit, tenant). Nothing is persisted in that case.
    pub async fn generate(
        &self,
        cmd: &GenerateShifts,
        caller: &Caller,
    ) -> EngineResult<GenerationOutcome> {
        if cmd.end_date < cmd.start_date {
            return Err(EngineError::validation(
                "date range",
                "end date must not precede start date",
            ));
        }

        let template = self
            .store
            .find_template(cmd.template_id, cmd.unit_id, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while loading schedule template", e))?
            .ok_or(EngineError::TemplateNotFound {
                template_id: cmd.template_id,
                unit_id: cmd.unit_id,
            })?;

        // One lookup window per user covers every candidate slot; overnight
        // slots can end the day after end_date, hence the extra day.
        let window = TimeRange {
            start: cmd.start_date.and_time(NaiveTime::MIN),
            end: (cmd.end_date + Days::new(2)).and_time(NaiveTime::MIN),
        };

        let mut created: Vec<EmployeeShift> = Vec::new();
        let mut skipped: Vec<SkippedSlot> = Vec::new();

        for &user_id in &cmd.user_ids {
            let existing = self
                .store
                .find_shifts_in_range(user_id, caller.tenant_id, &window)
                .await
                .map_err(|e| store_failure("error while checking shift conflicts", e))?;

            for date in cmd
                .start_date
                .iter_days()
                .take_while(|d| *d <= cmd.end_date)
            {
                if !self.policy.is_working_day(template.kind, date) {
                    continue;
                }
                let slot = template.slot_for(date);
                let conflicts = existing.iter().any(|s| s.period.overlaps(&slot))
                    || created
                        .iter()
                        .any(|s| s.user_id == user_id && s.period.overlaps(&slot));
                if conflicts {
                    debug!(%user_id, %date, "skipping conflicting slot");
                    skipped.push(SkippedSlot { user_id, date });
                    continue;
                }
                created.push(EmployeeShift {
                    id: Uuid::new_v4(),
                    tenant_id: caller.tenant_id,
                    unit_id: cmd.unit_id,
                    user_id,
                    date,
                    period: slot,
                    breaks: Vec::new(),
                    active: true,
                });
            }
        }

        if !created.is_empty() {
            self.store
                .insert_shifts(&created)
                .await
                .map_err(|e| store_failure("error while saving generated shifts", e))?;
        }

        info!(
            unit_id = %cmd.unit_id,
            template_id = %cmd.template_id,
            created = created.len(),
            skipped = skipped.len(),
            "shift generation completed"
        );

        Ok(GenerationOutcome { created, skipped })
    }
}
