//! Daily closings and partial revenue entries.
//!
//! A [`DailyClosing`] is the per-unit, per-day aggregate awaiting supervisor
//! review; [`PartialRevenueEntry`] rows are the itemized revenue records
//! linked to it. At most one closing exists per (tenant, unit, date), and the
//! active entries of a day never overlap in time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interval::TimeRange;

/// The closing approval state machine: Pending is initial, the rest terminal.
///
/// # Example
///
/// ```
/// use closing_engine::models::ClosingStatus;
///
/// assert!(!ClosingStatus::Pending.is_terminal());
/// assert!(ClosingStatus::Approved.is_terminal());
/// assert!(ClosingStatus::Rejected.is_terminal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingStatus {
    /// Submitted, awaiting supervisor review.
    Pending,
    /// Accepted by a reviewer. No further transitions.
    Approved,
    /// Refused by a reviewer. No further transitions.
    Rejected,
}

impl ClosingStatus {
    /// Returns true once the status can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClosingStatus::Approved | ClosingStatus::Rejected)
    }
}

impl std::fmt::Display for ClosingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClosingStatus::Pending => write!(f, "pending"),
            ClosingStatus::Approved => write!(f, "approved"),
            ClosingStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The closed set of payment methods an entry can carry.
///
/// # Example
///
/// ```
/// use closing_engine::models::PaymentMethod;
///
/// assert_eq!(PaymentMethod::Pix.label(), "pix");
/// assert_eq!(PaymentMethod::from_label("boleto"), Some(PaymentMethod::Boleto));
/// assert_eq!(PaymentMethod::from_label("cheque"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Debit card.
    Debit,
    /// Credit card.
    Credit,
    /// Instant transfer.
    Pix,
    /// Bank slip (monthly subscriber invoices).
    Boleto,
    /// Meal or benefit voucher.
    Voucher,
}

impl PaymentMethod {
    /// The canonical lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Debit => "debit",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Boleto => "boleto",
            PaymentMethod::Voucher => "voucher",
        }
    }

    /// Looks up a payment method by its canonical label.
    pub fn from_label(label: &str) -> Option<PaymentMethod> {
        match label {
            "cash" => Some(PaymentMethod::Cash),
            "debit" => Some(PaymentMethod::Debit),
            "credit" => Some(PaymentMethod::Credit),
            "pix" => Some(PaymentMethod::Pix),
            "boleto" => Some(PaymentMethod::Boleto),
            "voucher" => Some(PaymentMethod::Voucher),
            _ => None,
        }
    }
}

/// Where a revenue entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrigin {
    /// Keyed in by a user.
    Manual,
    /// Brought in by an import job.
    Imported,
    /// Produced while applying an approved adjustment.
    Correction,
}

impl EntryOrigin {
    /// The canonical lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            EntryOrigin::Manual => "manual",
            EntryOrigin::Imported => "imported",
            EntryOrigin::Correction => "correction",
        }
    }
}

/// One itemized revenue record with a time interval and payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRevenueEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The tenant the entry belongs to.
    pub tenant_id: Uuid,
    /// The unit the entry belongs to.
    pub unit_id: Uuid,
    /// The owning daily closing (created lazily on first entry of the day).
    pub closing_id: Uuid,
    /// The recorded amount. Always greater than zero.
    pub amount: Decimal,
    /// The interval the revenue covers. Active entries of a day never overlap.
    pub period: TimeRange,
    /// The payment method.
    pub payment_method: PaymentMethod,
    /// Where the entry came from.
    pub origin: EntryOrigin,
    /// Entries are soft-deleted by clearing this flag.
    pub active: bool,
}

/// The per-unit, per-day revenue aggregate subject to supervisor approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyClosing {
    /// Unique identifier for the closing.
    pub id: Uuid,
    /// The tenant the closing belongs to.
    pub tenant_id: Uuid,
    /// The unit the closing belongs to.
    pub unit_id: Uuid,
    /// The business date being closed.
    pub date: NaiveDate,
    /// Review state. Monotonic once terminal.
    pub status: ClosingStatus,
    /// Cash left in the register at close.
    pub cash_fund: Decimal,
    /// Amount deposited at the ATM.
    pub atm_amount: Decimal,
    /// Amount covered by monthly-subscriber invoices (boleto).
    pub boleto_amount: Decimal,
    /// Free-form reviewer or submitter notes.
    pub notes: Option<String>,
}

impl DailyClosing {
    /// Sums the active entries linked to this closing.
    ///
    /// An empty or unrelated collection yields zero.
    pub fn total(&self, entries: &[PartialRevenueEntry]) -> Decimal {
        entries
            .iter()
            .filter(|e| e.closing_id == self.id && e.active)
            .map(|e| e.amount)
            .sum()
    }
}

/// Read projection of one unit-day: the closing (if any), its entries, and
/// the aggregate total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// The closing header, absent when no entry or submission created one.
    pub closing: Option<DailyClosing>,
    /// The day's entries, active and inactive.
    pub entries: Vec<PartialRevenueEntry>,
    /// Sum of the active entries' amounts. Zero when empty or absent.
    pub total: Decimal,
}
