//! In-memory implementation of the repository contracts.
//!
//! Backs the integration tests and benchmarks, and serves as a stand-in
//! store for a host service during development. One mutex guards all tables,
//! which makes `ensure_closing` and `commit_review` atomic the same way a
//! database transaction would.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    AdjustmentRequest, ClosingStatus, DailyClosing, EmployeeShift, PartialRevenueEntry, TimeRange,
    WorkScheduleTemplate,
};

use super::{
    AdjustmentStore, ClosingStore, ScheduleStore, StoreError, StoreResult, UnitDirectory,
};

#[derive(Debug, Default)]
struct Tables {
    /// (unit, tenant) -> member user ids.
    units: HashMap<(Uuid, Uuid), HashSet<Uuid>>,
    templates: HashMap<Uuid, WorkScheduleTemplate>,
    shifts: HashMap<Uuid, EmployeeShift>,
    closings: HashMap<Uuid, DailyClosing>,
    entries: HashMap<Uuid, PartialRevenueEntry>,
    requests: HashMap<Uuid, AdjustmentRequest>,
}

/// An in-memory store implementing every repository trait.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a unit for a tenant with the given member users.
    pub async fn add_unit(&self, unit_id: Uuid, tenant_id: Uuid, members: &[Uuid]) {
        let mut tables = self.tables.lock().await;
        tables
            .units
            .insert((unit_id, tenant_id), members.iter().copied().collect());
    }

    /// Seeds a schedule template.
    pub async fn add_template(&self, template: WorkScheduleTemplate) {
        let mut tables = self.tables.lock().await;
        tables.templates.insert(template.id, template);
    }

    /// Seeds an adjustment request, bypassing the workflow.
    pub async fn add_request(&self, request: AdjustmentRequest) {
        let mut tables = self.tables.lock().await;
        tables.requests.insert(request.id, request);
    }

    /// Returns a stored request by id, for test assertions.
    pub async fn request(&self, request_id: Uuid) -> Option<AdjustmentRequest> {
        let tables = self.tables.lock().await;
        tables.requests.get(&request_id).cloned()
    }

    /// Returns a stored shift by id, for test assertions.
    pub async fn shift(&self, shift_id: Uuid) -> Option<EmployeeShift> {
        let tables = self.tables.lock().await;
        tables.shifts.get(&shift_id).cloned()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn find_template(
        &self,
        template_id: Uuid,
        unit_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<Option<WorkScheduleTemplate>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .templates
            .get(&template_id)
            .filter(|t| t.unit_id == unit_id && t.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_shifts_in_range(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        range: &TimeRange,
    ) -> StoreResult<Vec<EmployeeShift>> {
        let tables = self.tables.lock().await;
        let mut shifts: Vec<EmployeeShift> = tables
            .shifts
            .values()
            .filter(|s| {
                s.user_id == user_id
                    && s.tenant_id == tenant_id
                    && s.active
                    && s.period.overlaps(range)
            })
            .cloned()
            .collect();
        shifts.sort_by_key(|s| s.period.start);
        Ok(shifts)
    }

    async fn insert_shifts(&self, shifts: &[EmployeeShift]) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        for shift in shifts {
            if tables.shifts.contains_key(&shift.id) {
                return Err(StoreError::new(format!("duplicate shift id {}", shift.id)));
            }
        }
        for shift in shifts {
            tables.shifts.insert(shift.id, shift.clone());
        }
        Ok(())
    }

    async fn find_shift(
        &self,
        shift_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<Option<EmployeeShift>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .shifts
            .get(&shift_id)
            .filter(|s| s.tenant_id == tenant_id)
            .cloned())
    }

    async fn update_shift(&self, shift: &EmployeeShift) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        if !tables.shifts.contains_key(&shift.id) {
            return Err(StoreError::new(format!("unknown shift id {}", shift.id)));
        }
        tables.shifts.insert(shift.id, shift.clone());
        Ok(())
    }
}

#[async_trait]
impl ClosingStore for InMemoryStore {
    async fn find_closing(
        &self,
        closing_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<Option<DailyClosing>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .closings
            .get(&closing_id)
            .filter(|c| c.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_closing_for_day(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        tenant_id: Uuid,
    ) -> StoreResult<Option<DailyClosing>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .closings
            .values()
            .find(|c| c.unit_id == unit_id && c.date == date && c.tenant_id == tenant_id)
            .cloned())
    }

    async fn ensure_closing(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        tenant_id: Uuid,
    ) -> StoreResult<DailyClosing> {
        // Get-or-create under one lock; the database analogue is an upsert
        // guarded by the (tenant, unit, date) uniqueness constraint.
        let mut tables = self.tables.lock().await;
        if let Some(existing) = tables
            .closings
            .values()
            .find(|c| c.unit_id == unit_id && c.date == date && c.tenant_id == tenant_id)
        {
            return Ok(existing.clone());
        }
        let closing = DailyClosing {
            id: Uuid::new_v4(),
            tenant_id,
            unit_id,
            date,
            status: ClosingStatus::Pending,
            cash_fund: Decimal::ZERO,
            atm_amount: Decimal::ZERO,
            boleto_amount: Decimal::ZERO,
            notes: None,
        };
        tables.closings.insert(closing.id, closing.clone());
        Ok(closing)
    }

    async fn insert_closing(&self, closing: &DailyClosing) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let duplicate = tables.closings.values().any(|c| {
            c.unit_id == closing.unit_id
                && c.date == closing.date
                && c.tenant_id == closing.tenant_id
        });
        if duplicate {
            return Err(StoreError::new(format!(
                "unique constraint violation: closing for unit {} on {}",
                closing.unit_id, closing.date
            )));
        }
        tables.closings.insert(closing.id, closing.clone());
        Ok(())
    }

    async fn update_closing(&self, closing: &DailyClosing) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        if !tables.closings.contains_key(&closing.id) {
            return Err(StoreError::new(format!(
                "unknown closing id {}",
                closing.id
            )));
        }
        tables.closings.insert(closing.id, closing.clone());
        Ok(())
    }

    async fn list_pending(&self, tenant_id: Uuid) -> StoreResult<Vec<DailyClosing>> {
        let tables = self.tables.lock().await;
        let mut pending: Vec<DailyClosing> = tables
            .closings
            .values()
            .filter(|c| c.tenant_id == tenant_id && c.status == ClosingStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|c| (c.unit_id, c.date));
        Ok(pending)
    }

    async fn find_entry(
        &self,
        entry_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<Option<PartialRevenueEntry>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .entries
            .get(&entry_id)
            .filter(|e| e.tenant_id == tenant_id)
            .cloned())
    }

    async fn find_entries_for_day(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        tenant_id: Uuid,
    ) -> StoreResult<Vec<PartialRevenueEntry>> {
        let tables = self.tables.lock().await;
        let mut entries: Vec<PartialRevenueEntry> = tables
            .entries
            .values()
            .filter(|e| {
                e.unit_id == unit_id && e.tenant_id == tenant_id && e.period.date() == date
            })
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.period.start);
        Ok(entries)
    }

    async fn insert_entry(&self, entry: &PartialRevenueEntry) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.entries.contains_key(&entry.id) {
            return Err(StoreError::new(format!("duplicate entry id {}", entry.id)));
        }
        tables.entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update_entry(&self, entry: &PartialRevenueEntry) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        if !tables.entries.contains_key(&entry.id) {
            return Err(StoreError::new(format!("unknown entry id {}", entry.id)));
        }
        tables.entries.insert(entry.id, entry.clone());
        Ok(())
    }
}

#[async_trait]
impl AdjustmentStore for InMemoryStore {
    async fn find_request_with_entry(
        &self,
        request_id: Uuid,
    ) -> StoreResult<Option<(AdjustmentRequest, PartialRevenueEntry)>> {
        let tables = self.tables.lock().await;
        let Some(request) = tables.requests.get(&request_id) else {
            return Ok(None);
        };
        let Some(entry) = tables.entries.get(&request.entry_id) else {
            return Ok(None);
        };
        Ok(Some((request.clone(), entry.clone())))
    }

    async fn insert_request(&self, request: &AdjustmentRequest) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        if tables.requests.contains_key(&request.id) {
            return Err(StoreError::new(format!(
                "duplicate request id {}",
                request.id
            )));
        }
        tables.requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn commit_review(
        &self,
        request: &AdjustmentRequest,
        entry: Option<&PartialRevenueEntry>,
    ) -> StoreResult<()> {
        // Both writes land under one lock acquisition.
        let mut tables = self.tables.lock().await;
        if !tables.requests.contains_key(&request.id) {
            return Err(StoreError::new(format!(
                "unknown request id {}",
                request.id
            )));
        }
        if let Some(entry) = entry {
            if !tables.entries.contains_key(&entry.id) {
                return Err(StoreError::new(format!("unknown entry id {}", entry.id)));
            }
            tables.entries.insert(entry.id, entry.clone());
        }
        tables.requests.insert(request.id, request.clone());
        Ok(())
    }
}

#[async_trait]
impl UnitDirectory for InMemoryStore {
    async fn unit_exists(&self, unit_id: Uuid, tenant_id: Uuid) -> StoreResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.units.contains_key(&(unit_id, tenant_id)))
    }

    async fn user_has_unit_access(
        &self,
        user_id: Uuid,
        unit_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables
            .units
            .get(&(unit_id, tenant_id))
            .is_some_and(|members| members.contains(&user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[tokio::test]
    async fn test_ensure_closing_is_idempotent() {
        let store = InMemoryStore::new();
        let unit = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let first = store.ensure_closing(unit, date, tenant).await.unwrap();
        let second = store.ensure_closing(unit, date, tenant).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.status, ClosingStatus::Pending);
        assert_eq!(first.cash_fund, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_insert_closing_rejects_duplicate_unit_day() {
        let store = InMemoryStore::new();
        let unit = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let first = store.ensure_closing(unit, date, tenant).await.unwrap();
        let mut duplicate = first.clone();
        duplicate.id = Uuid::new_v4();
        assert!(store.insert_closing(&duplicate).await.is_err());
    }

    #[tokio::test]
    async fn test_tenant_scoping_hides_other_tenants_rows() {
        let store = InMemoryStore::new();
        let unit = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let other_tenant = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let closing = store.ensure_closing(unit, date, tenant).await.unwrap();
        assert!(store
            .find_closing(closing.id, other_tenant)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_closing_for_day(unit, date, other_tenant)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_shift_range_lookup_filters_by_overlap() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        let tenant = Uuid::new_v4();
        let shift = EmployeeShift {
            id: Uuid::new_v4(),
            tenant_id: tenant,
            unit_id: Uuid::new_v4(),
            user_id: user,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            period: TimeRange::new(at("2026-03-14 22:00:00"), at("2026-03-15 06:00:00")).unwrap(),
            breaks: vec![],
            active: true,
        };
        store.insert_shifts(std::slice::from_ref(&shift)).await.unwrap();

        let hit = TimeRange::new(at("2026-03-15 05:00:00"), at("2026-03-15 13:00:00")).unwrap();
        let miss = TimeRange::new(at("2026-03-15 06:00:00"), at("2026-03-15 14:00:00")).unwrap();
        assert_eq!(
            store
                .find_shifts_in_range(user, tenant, &hit)
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(store
            .find_shifts_in_range(user, tenant, &miss)
            .await
            .unwrap()
            .is_empty());
    }
}
