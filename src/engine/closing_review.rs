//! The daily-closing approval state machine.
//!
//! A closing starts Pending (whether submitted explicitly or created lazily
//! by the ledger) and moves exactly once to Approved or Rejected under
//! supervisor review. Terminal states accept no further transitions.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Caller, ClosingStatus, DailyClosing, Role};
use crate::repository::{ClosingStore, UnitDirectory};

use super::store_failure;

/// Input for submitting a unit-day closing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitClosing {
    /// The business date being closed. Must not lie in the future.
    pub date: NaiveDate,
    /// Cash left in the register. Must not be negative.
    pub cash_fund: Decimal,
    /// Optional submitter notes.
    pub notes: Option<String>,
}

/// A reviewer's decision on a pending closing.
///
/// Optional fields overwrite the stored values only when supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDecision {
    /// The status the reviewer assigns.
    pub status: ClosingStatus,
    /// Corrected cash fund, when the reviewer adjusts it.
    pub cash_fund: Option<Decimal>,
    /// ATM deposit amount.
    pub atm_amount: Option<Decimal>,
    /// Monthly-subscriber invoice (boleto) amount.
    pub boleto_amount: Option<Decimal>,
    /// Reviewer notes.
    pub notes: Option<String>,
}

/// Drives closing submission and supervisor review.
pub struct ClosingReview {
    store: Arc<dyn ClosingStore>,
    units: Arc<dyn UnitDirectory>,
}

impl ClosingReview {
    /// Creates the state machine over the given stores.
    pub fn new(store: Arc<dyn ClosingStore>, units: Arc<dyn UnitDirectory>) -> Self {
        Self { store, units }
    }

    /// Submits a new Pending closing for a unit-day.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnitNotFound`] when the unit is absent for the
    ///   caller's tenant.
    /// - Validation when the date is in the future or the cash fund is
    ///   negative.
    /// - [`EngineError::ClosingExists`] when the unit-day already has a
    ///   closing, whatever its status.
    pub async fn submit(
        &self,
        unit_id: Uuid,
        cmd: SubmitClosing,
        caller: &Caller,
    ) -> EngineResult<DailyClosing> {
        let exists = self
            .units
            .unit_exists(unit_id, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while checking unit access", e))?;
        if !exists {
            return Err(EngineError::UnitNotFound { unit_id });
        }
        if cmd.date > Utc::now().date_naive() {
            return Err(EngineError::validation("date", "date cannot be future"));
        }
        if cmd.cash_fund < Decimal::ZERO {
            return Err(EngineError::validation("cash fund", "cannot be negative"));
        }
        let prior = self
            .store
            .find_closing_for_day(unit_id, cmd.date, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while fetching daily closing", e))?;
        if prior.is_some() {
            return Err(EngineError::ClosingExists {
                unit_id,
                date: cmd.date,
            });
        }

        let closing = DailyClosing {
            id: Uuid::new_v4(),
            tenant_id: caller.tenant_id,
            unit_id,
            date: cmd.date,
            status: ClosingStatus::Pending,
            cash_fund: cmd.cash_fund,
            atm_amount: Decimal::ZERO,
            boleto_amount: Decimal::ZERO,
            notes: cmd.notes,
        };
        self.store
            .insert_closing(&closing)
            .await
            .map_err(|e| store_failure("error while saving daily closing", e))?;

        info!(%unit_id, closing_id = %closing.id, date = %closing.date, "closing submitted");
        Ok(closing)
    }

    /// Applies a reviewer's decision to a pending closing.
    ///
    /// Requires [`Role::Supervisor`] or higher. Requesting the current
    /// status, or reviewing a closing already Approved or Rejected, fails
    /// with the no-status-change error.
    pub async fn review(
        &self,
        closing_id: Uuid,
        decision: ReviewDecision,
        caller: &Caller,
    ) -> EngineResult<DailyClosing> {
        let mut closing = self
            .store
            .find_closing(closing_id, caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while fetching daily closing", e))?
            .ok_or(EngineError::ClosingNotFound { closing_id })?;

        if !caller.role.at_least(Role::Supervisor) {
            return Err(EngineError::AccessDenied {
                user_id: caller.user_id,
                unit_id: closing.unit_id,
            });
        }
        if decision.status == closing.status || closing.status.is_terminal() {
            return Err(EngineError::NoStatusChange {
                current: closing.status,
                requested: decision.status,
            });
        }
        if let Some(cash_fund) = decision.cash_fund {
            if cash_fund < Decimal::ZERO {
                return Err(EngineError::validation("cash fund", "cannot be negative"));
            }
            closing.cash_fund = cash_fund;
        }
        if let Some(atm_amount) = decision.atm_amount {
            closing.atm_amount = atm_amount;
        }
        if let Some(boleto_amount) = decision.boleto_amount {
            closing.boleto_amount = boleto_amount;
        }
        if let Some(notes) = decision.notes {
            closing.notes = Some(notes);
        }
        closing.status = decision.status;

        self.store
            .update_closing(&closing)
            .await
            .map_err(|e| store_failure("error while saving daily closing", e))?;

        info!(
            closing_id = %closing.id,
            reviewer_id = %caller.user_id,
            status = %closing.status,
            "closing reviewed"
        );
        Ok(closing)
    }

    /// Lists the tenant's closings still awaiting review.
    pub async fn pending(&self, caller: &Caller) -> EngineResult<Vec<DailyClosing>> {
        self.store
            .list_pending(caller.tenant_id)
            .await
            .map_err(|e| store_failure("error while fetching pending closings", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repository::InMemoryStore;

    struct Fixture {
        review: ClosingReview,
        submitter: Caller,
        supervisor: Caller,
        unit_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let tenant_id = Uuid::new_v4();
        let unit_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        store.add_unit(unit_id, tenant_id, &[user_id]).await;
        Fixture {
            review: ClosingReview::new(store.clone(), store),
            submitter: Caller::new(user_id, tenant_id, Role::Employee),
            supervisor: Caller::new(Uuid::new_v4(), tenant_id, Role::Supervisor),
            unit_id,
        }
    }

    fn submit_today(cash_fund: i64) -> SubmitClosing {
        SubmitClosing {
            date: Utc::now().date_naive(),
            cash_fund: Decimal::new(cash_fund, 2),
            notes: None,
        }
    }

    fn approve() -> ReviewDecision {
        ReviewDecision {
            status: ClosingStatus::Approved,
            cash_fund: None,
            atm_amount: None,
            boleto_amount: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_submit_creates_pending_closing() {
        let fx = fixture().await;
        let closing = fx
            .review
            .submit(fx.unit_id, submit_today(100_000), &fx.submitter)
            .await
            .unwrap();
        assert_eq!(closing.status, ClosingStatus::Pending);
        assert_eq!(closing.cash_fund, Decimal::new(100_000, 2));
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_conflict() {
        let fx = fixture().await;
        fx.review
            .submit(fx.unit_id, submit_today(100_000), &fx.submitter)
            .await
            .unwrap();
        let err = fx
            .review
            .submit(fx.unit_id, submit_today(50_000), &fx.submitter)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ClosingExists { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_future_date_is_rejected() {
        let fx = fixture().await;
        let cmd = SubmitClosing {
            date: Utc::now().date_naive() + chrono::Days::new(1),
            cash_fund: Decimal::ZERO,
            notes: None,
        };
        let err = fx
            .review
            .submit(fx.unit_id, cmd, &fx.submitter)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("date cannot be future"));
    }

    #[tokio::test]
    async fn test_negative_cash_fund_is_rejected() {
        let fx = fixture().await;
        let cmd = SubmitClosing {
            date: Utc::now().date_naive(),
            cash_fund: Decimal::new(-1, 2),
            notes: None,
        };
        let err = fx
            .review
            .submit(fx.unit_id, cmd, &fx.submitter)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_unknown_unit_is_not_found() {
        let fx = fixture().await;
        let err = fx
            .review
            .submit(Uuid::new_v4(), submit_today(0), &fx.submitter)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::UnitNotFound { .. }));
    }

    #[tokio::test]
    async fn test_approval_is_terminal() {
        let fx = fixture().await;
        let closing = fx
            .review
            .submit(fx.unit_id, submit_today(100_000), &fx.submitter)
            .await
            .unwrap();

        let approved = fx
            .review
            .review(closing.id, approve(), &fx.supervisor)
            .await
            .unwrap();
        assert_eq!(approved.status, ClosingStatus::Approved);

        // Any follow-up review is refused, whatever it requests.
        let back_to_pending = ReviewDecision {
            status: ClosingStatus::Pending,
            ..approve()
        };
        let err = fx
            .review
            .review(closing.id, back_to_pending, &fx.supervisor)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStateTransition);

        let reject_after = ReviewDecision {
            status: ClosingStatus::Rejected,
            ..approve()
        };
        let err = fx
            .review
            .review(closing.id, reject_after, &fx.supervisor)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NoStatusChange { .. }));
    }

    #[tokio::test]
    async fn test_requesting_current_status_is_refused() {
        let fx = fixture().await;
        let closing = fx
            .review
            .submit(fx.unit_id, submit_today(100_000), &fx.submitter)
            .await
            .unwrap();
        let noop = ReviewDecision {
            status: ClosingStatus::Pending,
            ..approve()
        };
        let err = fx
            .review
            .review(closing.id, noop, &fx.supervisor)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("no status change"));
    }

    #[tokio::test]
    async fn test_review_applies_supplied_amounts() {
        let fx = fixture().await;
        let closing = fx
            .review
            .submit(fx.unit_id, submit_today(100_000), &fx.submitter)
            .await
            .unwrap();
        let decision = ReviewDecision {
            status: ClosingStatus::Approved,
            cash_fund: Some(Decimal::new(95_000, 2)),
            atm_amount: Some(Decimal::new(40_000, 2)),
            boleto_amount: Some(Decimal::new(12_500, 2)),
            notes: Some("till was short".to_string()),
        };
        let reviewed = fx
            .review
            .review(closing.id, decision, &fx.supervisor)
            .await
            .unwrap();
        assert_eq!(reviewed.cash_fund, Decimal::new(95_000, 2));
        assert_eq!(reviewed.atm_amount, Decimal::new(40_000, 2));
        assert_eq!(reviewed.boleto_amount, Decimal::new(12_500, 2));
        assert_eq!(reviewed.notes.as_deref(), Some("till was short"));
    }

    #[tokio::test]
    async fn test_employee_cannot_review() {
        let fx = fixture().await;
        let closing = fx
            .review
            .submit(fx.unit_id, submit_today(100_000), &fx.submitter)
            .await
            .unwrap();
        let err = fx
            .review
            .review(closing.id, approve(), &fx.submitter)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn test_review_is_tenant_scoped() {
        let fx = fixture().await;
        let closing = fx
            .review
            .submit(fx.unit_id, submit_today(100_000), &fx.submitter)
            .await
            .unwrap();
        let foreign_supervisor = Caller::new(Uuid::new_v4(), Uuid::new_v4(), Role::Supervisor);
        let err = fx
            .review
            .review(closing.id, approve(), &foreign_supervisor)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ClosingNotFound { .. }));
    }

    #[tokio::test]
    async fn test_pending_lists_only_unreviewed() {
        let fx = fixture().await;
        let closing = fx
            .review
            .submit(fx.unit_id, submit_today(100_000), &fx.submitter)
            .await
            .unwrap();
        assert_eq!(fx.review.pending(&fx.supervisor).await.unwrap().len(), 1);

        fx.review
            .review(closing.id, approve(), &fx.supervisor)
            .await
            .unwrap();
        assert!(fx.review.pending(&fx.supervisor).await.unwrap().is_empty());
    }
}
