//! Schedule templates, employee shifts, and breaks.
//!
//! A [`WorkScheduleTemplate`] carries the default timing for a unit's roster;
//! the generator expands it into concrete [`EmployeeShift`] rows. When the
//! template's end-of-day is not after its start-of-day the shift crosses
//! midnight and the end timestamp lands on the next calendar day.

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interval::TimeRange;

/// The closed set of schedule types a template can carry.
///
/// `Weekday` rosters exclude weekends, `RotatingLongShift` follows the
/// configured rotation cadence, and `Flexible` covers every remaining type
/// generically (eligible every day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Monday through Friday only.
    Weekday,
    /// Long shifts on a rotating on/off cadence.
    RotatingLongShift,
    /// No day restriction.
    Flexible,
}

impl std::fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleKind::Weekday => write!(f, "weekday"),
            ScheduleKind::RotatingLongShift => write!(f, "rotating_long_shift"),
            ScheduleKind::Flexible => write!(f, "flexible"),
        }
    }
}

/// A reusable definition of default shift timing for a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkScheduleTemplate {
    /// Unique identifier for the template.
    pub id: Uuid,
    /// The tenant the template belongs to.
    pub tenant_id: Uuid,
    /// The unit the template belongs to.
    pub unit_id: Uuid,
    /// Human-readable template name.
    pub name: String,
    /// The schedule type, driving day eligibility.
    pub kind: ScheduleKind,
    /// Default start time of day.
    pub starts_at: NaiveTime,
    /// Default end time of day. Not after `starts_at` means overnight.
    pub ends_at: NaiveTime,
}

impl WorkScheduleTemplate {
    /// Computes the concrete shift interval for a calendar date.
    ///
    /// When `ends_at <= starts_at` the end timestamp is pushed to the next
    /// calendar day, so the returned range always satisfies end > start.
    ///
    /// # Example
    ///
    /// ```
    /// use closing_engine::models::{ScheduleKind, WorkScheduleTemplate};
    /// use chrono::{NaiveDate, NaiveTime};
    /// use uuid::Uuid;
    ///
    /// let template = WorkScheduleTemplate {
    ///     id: Uuid::new_v4(),
    ///     tenant_id: Uuid::new_v4(),
    ///     unit_id: Uuid::new_v4(),
    ///     name: "night watch".to_string(),
    ///     kind: ScheduleKind::RotatingLongShift,
    ///     starts_at: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
    ///     ends_at: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    /// };
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
    /// let slot = template.slot_for(date);
    /// assert_eq!(slot.start.date(), date);
    /// assert_eq!(slot.end.date(), date.succ_opt().unwrap());
    /// ```
    pub fn slot_for(&self, date: NaiveDate) -> TimeRange {
        let start = date.and_time(self.starts_at);
        let end_date = if self.ends_at <= self.starts_at {
            date + Days::new(1)
        } else {
            date
        };
        TimeRange {
            start,
            end: end_date.and_time(self.ends_at),
        }
    }
}

/// The closed set of break types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakKind {
    /// A meal break.
    Meal,
    /// A short rest break.
    Rest,
    /// Any other interruption.
    Other,
}

/// A sub-interval of a shift during which the employee is not working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBreak {
    /// Unique identifier for the break.
    pub id: Uuid,
    /// The owning shift.
    pub shift_id: Uuid,
    /// The break type.
    pub kind: BreakKind,
    /// The break interval. Must lie within the shift interval.
    pub period: TimeRange,
}

/// A concrete, dated, user-assigned work interval generated from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeShift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The tenant the shift belongs to.
    pub tenant_id: Uuid,
    /// The unit the shift belongs to.
    pub unit_id: Uuid,
    /// The user assigned to the shift.
    pub user_id: Uuid,
    /// The calendar date the shift was generated for.
    pub date: NaiveDate,
    /// The scheduled work interval (overnight shifts end on the next day).
    pub period: TimeRange,
    /// Breaks taken during the shift, ordered by start time.
    #[serde(default)]
    pub breaks: Vec<ShiftBreak>,
    /// Shifts are never deleted, only deactivated.
    pub active: bool,
}

impl EmployeeShift {
    /// Scheduled minutes minus break minutes.
    pub fn worked_minutes(&self) -> i64 {
        let break_minutes: i64 = self.breaks.iter().map(|b| b.period.duration_minutes()).sum();
        self.period.duration_minutes() - break_minutes
    }
}
