//! Repository contracts consumed by the engine.
//!
//! Persistence technology is out of scope for this crate; these traits fix
//! the shape the engine needs. Implementations must apply the tenant id to
//! every query predicate, and must back the check-then-act invariants
//! (one closing per unit/date, non-overlapping entries) with storage-level
//! atomicity: a uniqueness constraint on (tenant, unit, date) for closings
//! and a serializable or row-locked transaction around overlap checks.
//! [`ClosingStore::ensure_closing`] and [`AdjustmentStore::commit_review`]
//! are single atomic operations for the same reason.

mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    AdjustmentRequest, DailyClosing, EmployeeShift, PartialRevenueEntry, TimeRange,
    WorkScheduleTemplate,
};

pub use memory::InMemoryStore;

/// A storage-layer failure.
///
/// Carries whatever detail the backing store can provide; the engine wraps it
/// into a stable caller-facing error and logs the detail.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    /// Description of the failure, backend-specific.
    pub message: String,
}

impl StoreError {
    /// Creates a storage error from any printable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for schedule templates and employee shifts.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Looks up a template scoped to its unit and tenant.
    async fn find_template(
        &self,
        template_id: Uuid,
        unit_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<Option<WorkScheduleTemplate>>;

    /// Returns the user's active shifts whose interval intersects `range`.
    async fn find_shifts_in_range(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        range: &TimeRange,
    ) -> StoreResult<Vec<EmployeeShift>>;

    /// Persists a generation batch in one transaction.
    async fn insert_shifts(&self, shifts: &[EmployeeShift]) -> StoreResult<()>;

    /// Looks up a shift scoped to its tenant.
    async fn find_shift(&self, shift_id: Uuid, tenant_id: Uuid)
        -> StoreResult<Option<EmployeeShift>>;

    /// Replaces a stored shift.
    async fn update_shift(&self, shift: &EmployeeShift) -> StoreResult<()>;
}

/// Persistence for daily closings and their revenue entries.
#[async_trait]
pub trait ClosingStore: Send + Sync {
    /// Looks up a closing by id, scoped to its tenant.
    async fn find_closing(
        &self,
        closing_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<Option<DailyClosing>>;

    /// Looks up the closing for one unit-day, scoped to its tenant.
    async fn find_closing_for_day(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        tenant_id: Uuid,
    ) -> StoreResult<Option<DailyClosing>>;

    /// Returns the unit-day's closing, creating a Pending header with zero
    /// amounts when none exists. Get-or-create must be atomic.
    async fn ensure_closing(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        tenant_id: Uuid,
    ) -> StoreResult<DailyClosing>;

    /// Inserts a new closing.
    async fn insert_closing(&self, closing: &DailyClosing) -> StoreResult<()>;

    /// Replaces a stored closing.
    async fn update_closing(&self, closing: &DailyClosing) -> StoreResult<()>;

    /// Lists the tenant's Pending closings.
    async fn list_pending(&self, tenant_id: Uuid) -> StoreResult<Vec<DailyClosing>>;

    /// Looks up an entry by id, scoped to its tenant.
    async fn find_entry(
        &self,
        entry_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<Option<PartialRevenueEntry>>;

    /// Returns all entries recorded for one unit-day, active and inactive.
    async fn find_entries_for_day(
        &self,
        unit_id: Uuid,
        date: NaiveDate,
        tenant_id: Uuid,
    ) -> StoreResult<Vec<PartialRevenueEntry>>;

    /// Inserts a new entry.
    async fn insert_entry(&self, entry: &PartialRevenueEntry) -> StoreResult<()>;

    /// Replaces a stored entry.
    async fn update_entry(&self, entry: &PartialRevenueEntry) -> StoreResult<()>;
}

/// Persistence for adjustment requests.
#[async_trait]
pub trait AdjustmentStore: Send + Sync {
    /// Looks up a request together with the entry it references.
    async fn find_request_with_entry(
        &self,
        request_id: Uuid,
    ) -> StoreResult<Option<(AdjustmentRequest, PartialRevenueEntry)>>;

    /// Inserts a new request.
    async fn insert_request(&self, request: &AdjustmentRequest) -> StoreResult<()>;

    /// Persists a review outcome: the resolved request and, when the review
    /// touched it, the referenced entry, committed atomically.
    async fn commit_review(
        &self,
        request: &AdjustmentRequest,
        entry: Option<&PartialRevenueEntry>,
    ) -> StoreResult<()>;
}

/// Unit existence and membership checks.
#[async_trait]
pub trait UnitDirectory: Send + Sync {
    /// Returns true when the unit exists for the tenant.
    async fn unit_exists(&self, unit_id: Uuid, tenant_id: Uuid) -> StoreResult<bool>;

    /// Returns true when the user may operate on the unit.
    async fn user_has_unit_access(
        &self,
        user_id: Uuid,
        unit_id: Uuid,
        tenant_id: Uuid,
    ) -> StoreResult<bool>;
}
