//! Error types for the scheduling and closing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all business failures the engine can report. Every variant maps to a
//! closed [`ErrorKind`] classification so boundary layers can translate
//! errors into transport responses without matching on individual variants.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AdjustmentStatus, ClosingStatus, TimeRange};
use crate::repository::StoreError;

/// The main error type for the engine.
///
/// All public engine operations return this error type. Business-rule
/// failures are always returned as values, never raised across the engine
/// boundary as panics.
///
/// # Example
///
/// ```
/// use closing_engine::error::{EngineError, ErrorKind};
/// use uuid::Uuid;
///
/// let error = EngineError::UnitNotFound { unit_id: Uuid::nil() };
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// assert_eq!(
///     error.to_string(),
///     "Unit not found: 00000000-0000-0000-0000-000000000000"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The unit does not exist for the caller's tenant.
    #[error("Unit not found: {unit_id}")]
    UnitNotFound {
        /// The unit that was not found.
        unit_id: Uuid,
    },

    /// No schedule template exists for the given (template, unit, tenant).
    #[error("Schedule template not found: {template_id} for unit {unit_id}")]
    TemplateNotFound {
        /// The template that was not found.
        template_id: Uuid,
        /// The unit the template was looked up for.
        unit_id: Uuid,
    },

    /// The shift does not exist for the caller's tenant.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The shift that was not found.
        shift_id: Uuid,
    },

    /// The daily closing does not exist for the caller's tenant.
    #[error("Daily closing not found: {closing_id}")]
    ClosingNotFound {
        /// The closing that was not found.
        closing_id: Uuid,
    },

    /// The revenue entry does not exist for the caller's tenant.
    #[error("Revenue entry not found: {entry_id}")]
    EntryNotFound {
        /// The entry that was not found.
        entry_id: Uuid,
    },

    /// The adjustment request does not exist.
    #[error("Adjustment request not found: {request_id}")]
    RequestNotFound {
        /// The request that was not found.
        request_id: Uuid,
    },

    /// An input field failed validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A closing already exists for the unit and date.
    #[error("closing already exists for unit {unit_id} on {date}")]
    ClosingExists {
        /// The unit the submission targeted.
        unit_id: Uuid,
        /// The date the submission targeted.
        date: NaiveDate,
    },

    /// The candidate interval overlaps an already-recorded one.
    ///
    /// Carries both intervals for diagnostics.
    #[error("interval {candidate} overlaps existing interval {existing}")]
    IntervalOverlap {
        /// The interval already recorded.
        existing: TimeRange,
        /// The interval that was rejected.
        candidate: TimeRange,
    },

    /// The caller is authenticated but not allowed to operate on the unit.
    #[error("Access denied for user {user_id} on unit {unit_id}")]
    AccessDenied {
        /// The caller that was denied.
        user_id: Uuid,
        /// The unit access was denied for.
        unit_id: Uuid,
    },

    /// A review requested no status change or the closing is already terminal.
    #[error("no status change: closing is {current}, requested {requested}")]
    NoStatusChange {
        /// The closing's current status.
        current: ClosingStatus,
        /// The status the review requested.
        requested: ClosingStatus,
    },

    /// The adjustment request was already approved or rejected.
    #[error("Adjustment request already resolved as {status}")]
    RequestAlreadyResolved {
        /// The request's resolved status.
        status: AdjustmentStatus,
    },

    /// An unexpected storage failure, surfaced with a stable message.
    ///
    /// The detailed cause is preserved as the error source and logged at the
    /// wrap site; it is never part of the display string.
    #[error("{message}")]
    Internal {
        /// The stable, caller-facing message.
        message: String,
        /// The underlying storage failure.
        #[source]
        source: StoreError,
    },
}

/// Closed classification of engine errors for boundary translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity is missing (or belongs to another tenant).
    NotFound,
    /// The input failed a validation rule.
    Validation,
    /// The operation conflicts with already-recorded state.
    Conflict,
    /// The caller may not operate on the target unit.
    AccessDenied,
    /// A state-machine transition was a no-op or left a terminal state.
    InvalidStateTransition,
    /// A wrapped lower-layer failure.
    Internal,
}

impl EngineError {
    /// Returns the closed classification for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::UnitNotFound { .. }
            | EngineError::TemplateNotFound { .. }
            | EngineError::ShiftNotFound { .. }
            | EngineError::ClosingNotFound { .. }
            | EngineError::EntryNotFound { .. }
            | EngineError::RequestNotFound { .. } => ErrorKind::NotFound,
            EngineError::Validation { .. } => ErrorKind::Validation,
            EngineError::ClosingExists { .. } | EngineError::IntervalOverlap { .. } => {
                ErrorKind::Conflict
            }
            EngineError::AccessDenied { .. } => ErrorKind::AccessDenied,
            EngineError::NoStatusChange { .. } | EngineError::RequestAlreadyResolved { .. } => {
                ErrorKind::InvalidStateTransition
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Builds a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
