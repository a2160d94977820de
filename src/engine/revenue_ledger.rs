//! The partial revenue ledger.
//!
//! Records itemized revenue entries against a unit-day, lazily creating the
//! owning daily closing on the first entry and enforcing that active entries
//! of the same unit and date never overlap in time.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Caller, DaySummary, EntryOrigin, PartialRevenueEntry, PaymentMethod, TimeRange,
};
use crate::repository::{ClosingStore, UnitDirectory};

use super::{check_unit_access, store_failure};

/// Input for recording a new entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEntry {
    /// The amount taken. Must be greater than zero.
    pub amount: Decimal,
    /// Start of the covered interval.
    pub start: NaiveDateTime,
    /// End of the covered interval (exclusive).
    pub end: NaiveDateTime,
    /// How the revenue was paid.
    pub payment_method: PaymentMethod,
    /// Where the entry comes from.
    pub origin: EntryOrigin,
}

/// Replacement values for an existing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryUpdate {
    /// The new amount. Must be greater than zero.
    pub amount: Decimal,
    /// New start of the covered interval.
    pub start: NaiveDateTime,
    /// New end of the covered interval (exclusive).
    pub end: NaiveDateTime,
    /// The new payment method.
    pub payment_method: PaymentMethod,
}

/// Records, updates, and aggregates partial revenue entries.
pub struct RevenueLedger {
    store: Arc<dyn ClosingStore>,
    units: Arc<dyn UnitDirectory>,
}

impl RevenueLedger {
    /// Creates a ledger over the given stores.
    pub fn new(store: Arc<dyn ClosingStore>, units: Arc<dyn UnitDirectory>) -> Self {
        Self { store, units }
    }

    /// Records a new entry for the unit-day derived from the interval start.
    ///
    /// The owning closing is resolved through the store's atomic
    /// get-or-create, so the first entry of a day creates its Pending header
    /// without racing a concurrent first entry.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnitNotFound`] / [`EngineError::AccessDenied`] from
    ///   the unit check.
    /// - Validation for a non-positive amount or inverted interval.
    /// - [`EngineError::IntervalOverlap`] when an active entry of the same
    ///   unit-day intersects the new interval; the error carries both
    ///   intervals.
    pub async fn add(
        &self,
        unit_id: Uuid,
        entry: NewEntry,
        caller: &Caller,
    ) -> EngineResult<PartialRevenueEntry> {
        check_unit_access(self.units.as_ref(), unit_id, caller).await?;
        if entry.amount <= Decimal::ZERO {
            return Err(EngineError::validation(
                "amount",
                "must be greater than zero",
            ));
        }
        let period = TimeRange::new(entry.start, entry.end)?;

        let closing = self
            .store
            .ensure_closing(unit_id, period.date(), caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while resolving daily closing", e))?;

        self.reject_overlap(unit_id, period.date(), &period, None, caller)
            .await?;

        let record = PartialRevenueEntry {
            id: Uuid::new_v4(),
            tenant_id: caller.tenant_id,
            unit_id,
            closing_id: closing.id,
            amount: entry.amount,
            period,
            payment_method: entry.payment_method,
            origin: entry.origin,
            active: true,
        };
        self.store
            .insert_entry(&record)
            .await
            .map_err(|e| store_failure("error while saving revenue entry", e))?;

        info!(%unit_id, entry_id = %record.id, amount = %record.amount, "revenue entry recorded");
        Ok(record)
    }

    /// Replaces an entry's recorded values.
    ///
    /// Runs the same checks as [`RevenueLedger::add`]; the overlap scan
    /// excludes the entry being updated. When the new interval lands on a
    /// different date the entry is relinked to that day's closing (created
    /// lazily if needed).
    pub async fn update(
        &self,
        unit_id: Uuid,
        entry_id: Uuid,
        update: EntryUpdate,
        caller: &Caller,
    ) -> EngineResult<PartialRevenueEntry> {
        check_unit_access(self.units.as_ref(), unit_id, caller).await?;
        if update.amount <= Decimal::ZERO {
            return Err(EngineError::validation(
                "amount",
                "must be greater than zero",
            ));
        }
        let period = TimeRange::new(update.start, update.end)?;

        let mut record = self.load_entry(unit_id, entry_id, caller).await?;

        self.reject_overlap(unit_id, period.date(), &period, Some(entry_id), caller)
            .await?;

        if period.date() != record.period.date() {
            let closing = self
                .store
                .ensure_closing(unit_id, period.date(), caller.tenant_id)
                .await
                .map_err(|e| store_failure("error while resolving daily closing", e))?;
            record.closing_id = closing.id;
        }
        record.amount = update.amount;
        record.period = period;
        record.payment_method = update.payment_method;

        self.store
            .update_entry(&record)
            .await
            .map_err(|e| store_failure("error while saving revenue entry", e))?;

        info!(%unit_id, %entry_id, "revenue entry updated");
        Ok(record)
    }

    /// Soft-deletes an entry by clearing its active flag.
    pub async fn deactivate(
        &self,
        unit_id: Uuid,
        entry_id: Uuid,
        caller: &Caller,
    ) -> EngineResult<PartialRevenueEntry> {
        check_unit_access(self.units.as_ref(), unit_id, caller).await?;
        let mut record = self.load_entry(unit_id, entry_id, caller).await?;
        record.active = false;
        self.store
            .update_entry(&record)
            .await
            .map_err(|e| store_failure("error while saving revenue entry", e))?;
        info!(%unit_id, %entry_id, "revenue entry deactivated");
        Ok(record)
    }

    /// Returns one unit-day's entries, active and inactive, ordered by start.
    pub async fn entries_for_day(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        caller: &Caller,
    ) -> EngineResult<Vec<PartialRevenueEntry>> {
        check_unit_access(self.units.as_ref(), unit_id, caller).await?;
        self.store
            .find_entries_for_day(unit_id, date, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while fetching revenue entries", e))
    }

    /// Returns the unit-day projection: closing header (if any), entries,
    /// and the aggregate total. The total of an empty or absent collection
    /// is zero.
    pub async fn day_summary(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        caller: &Caller,
    ) -> EngineResult<DaySummary> {
        check_unit_access(self.units.as_ref(), unit_id, caller).await?;
        let closing = self
            .store
            .find_closing_for_day(unit_id, date, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while fetching daily closing", e))?;
        let entries = self
            .store
            .find_entries_for_day(unit_id, date, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while fetching revenue entries", e))?;
        let total = closing
            .as_ref()
            .map(|c| c.total(&entries))
            .unwrap_or(Decimal::ZERO);
        Ok(DaySummary {
            closing,
            entries,
            total,
        })
    }

    async fn load_entry(
        &self,
        unit_id: Uuid,
        entry_id: Uuid,
        caller: &Caller,
    ) -> EngineResult<PartialRevenueEntry> {
        // A unit mismatch is indistinguishable from a missing entry.
        self.store
            .find_entry(entry_id, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while loading revenue entry", e))?
            .filter(|e| e.unit_id == unit_id)
            .ok_or(EngineError::EntryNotFound { entry_id })
    }

    async fn reject_overlap(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        candidate: &TimeRange,
        exclude: Option<Uuid>,
        caller: &Caller,
    ) -> EngineResult<()> {
        let entries = self
            .store
            .find_entries_for_day(unit_id, date, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while checking entry overlap", e))?;
        if let Some(existing) = entries
            .iter()
            .filter(|e| e.active && Some(e.id) != exclude)
            .find(|e| e.period.overlaps(candidate))
        {
            return Err(EngineError::IntervalOverlap {
                existing: existing.period.clone(),
                candidate: candidate.clone(),
            });
        }
        Ok(())
    }
}
