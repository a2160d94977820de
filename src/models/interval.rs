//! Half-open time intervals.
//!
//! This module defines the [`TimeRange`] type shared by shifts, breaks, and
//! revenue entries. All overlap detection in the engine goes through this one
//! implementation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A half-open interval `[start, end)` over naive local timestamps.
///
/// The constructor enforces `end > start`; zero-length and inverted ranges
/// are rejected with a validation error.
///
/// # Example
///
/// ```
/// use closing_engine::models::TimeRange;
/// use chrono::NaiveDateTime;
///
/// fn at(s: &str) -> NaiveDateTime {
///     NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
/// }
///
/// let morning = TimeRange::new(at("2026-03-14 10:00:00"), at("2026-03-14 10:30:00")).unwrap();
/// let late = TimeRange::new(at("2026-03-14 10:15:00"), at("2026-03-14 10:45:00")).unwrap();
/// let adjacent = TimeRange::new(at("2026-03-14 10:30:00"), at("2026-03-14 11:00:00")).unwrap();
///
/// assert!(morning.overlaps(&late));
/// // Touching endpoints do not overlap: the interval is half-open.
/// assert!(!morning.overlaps(&adjacent));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// The inclusive start of the interval.
    pub start: NaiveDateTime,
    /// The exclusive end of the interval.
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// Creates a range, rejecting `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<Self> {
        if end <= start {
            return Err(EngineError::validation(
                "interval",
                "end must be greater than start",
            ));
        }
        Ok(Self { start, end })
    }

    /// Returns true when the two half-open intervals intersect.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true when `other` lies fully within this interval.
    pub fn contains(&self, other: &TimeRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// The calendar date the interval belongs to (the date of its start).
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// The interval length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
