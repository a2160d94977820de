//! Working-day policy configuration types.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from the schedule policy YAML file. The policy decides which
//! calendar dates each schedule type is eligible to work on.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use crate::models::ScheduleKind;

/// A day of the week, as written in policy files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyDay {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
}

impl PolicyDay {
    fn weekday(&self) -> Weekday {
        match self {
            PolicyDay::Monday => Weekday::Mon,
            PolicyDay::Tuesday => Weekday::Tue,
            PolicyDay::Wednesday => Weekday::Wed,
            PolicyDay::Thursday => Weekday::Thu,
            PolicyDay::Friday => Weekday::Fri,
            PolicyDay::Saturday => Weekday::Sat,
            PolicyDay::Sunday => Weekday::Sun,
        }
    }
}

/// Day exclusions for weekday-only schedules.
#[derive(Debug, Clone, Deserialize)]
pub struct WeekdayRule {
    /// Days of the week that are never worked.
    pub excluded_days: Vec<PolicyDay>,
}

impl Default for WeekdayRule {
    fn default() -> Self {
        Self {
            excluded_days: vec![PolicyDay::Saturday, PolicyDay::Sunday],
        }
    }
}

/// On/off cadence for rotating long-shift schedules.
///
/// Days are counted from the anchor date: the first `days_on` days of each
/// cycle are worked, the following `days_off` are not.
#[derive(Debug, Clone, Deserialize)]
pub struct RotationRule {
    /// Consecutive worked days per cycle.
    pub days_on: u32,
    /// Consecutive rest days per cycle.
    pub days_off: u32,
    /// The date the first cycle starts on.
    pub anchor: NaiveDate,
}

impl Default for RotationRule {
    fn default() -> Self {
        Self {
            days_on: 2,
            days_off: 2,
            // 1970-01-01
            anchor: NaiveDate::default(),
        }
    }
}

/// The complete working-day policy, one rule per schedule type.
///
/// Schedule types outside the two special cases are eligible every day.
///
/// # Example
///
/// ```
/// use closing_engine::config::SchedulePolicy;
/// use closing_engine::models::ScheduleKind;
/// use chrono::NaiveDate;
///
/// let policy = SchedulePolicy::default();
///
/// // 2026-03-14 is a Saturday.
/// let saturday = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
/// assert!(!policy.is_working_day(ScheduleKind::Weekday, saturday));
/// assert!(policy.is_working_day(ScheduleKind::Flexible, saturday));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchedulePolicy {
    /// Rule for [`ScheduleKind::Weekday`] templates.
    pub weekday: WeekdayRule,
    /// Rule for [`ScheduleKind::RotatingLongShift`] templates.
    pub rotation: RotationRule,
}

impl SchedulePolicy {
    /// Decides whether `date` is a working day for the given schedule type.
    pub fn is_working_day(&self, kind: ScheduleKind, date: NaiveDate) -> bool {
        match kind {
            ScheduleKind::Weekday => {
                let weekday = date.weekday();
                !self
                    .weekday
                    .excluded_days
                    .iter()
                    .any(|d| d.weekday() == weekday)
            }
            ScheduleKind::RotatingLongShift => {
                let cycle = (self.rotation.days_on + self.rotation.days_off) as i64;
                if cycle == 0 {
                    return false;
                }
                let offset = (date - self.rotation.anchor).num_days().rem_euclid(cycle);
                offset < self.rotation.days_on as i64
            }
            ScheduleKind::Flexible => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_weekday_rule_excludes_weekend() {
        let policy = SchedulePolicy::default();
        // 2026-03-16 is a Monday.
        assert!(policy.is_working_day(ScheduleKind::Weekday, date("2026-03-16")));
        assert!(policy.is_working_day(ScheduleKind::Weekday, date("2026-03-20")));
        assert!(!policy.is_working_day(ScheduleKind::Weekday, date("2026-03-21")));
        assert!(!policy.is_working_day(ScheduleKind::Weekday, date("2026-03-22")));
    }

    #[test]
    fn test_flexible_is_eligible_every_day() {
        let policy = SchedulePolicy::default();
        for offset in 0..14 {
            let d = date("2026-03-01") + chrono::Days::new(offset);
            assert!(policy.is_working_day(ScheduleKind::Flexible, d));
        }
    }

    #[test]
    fn test_rotation_follows_cadence_from_anchor() {
        let policy = SchedulePolicy {
            weekday: WeekdayRule::default(),
            rotation: RotationRule {
                days_on: 2,
                days_off: 2,
                anchor: date("2026-03-01"),
            },
        };
        let kind = ScheduleKind::RotatingLongShift;
        assert!(policy.is_working_day(kind, date("2026-03-01")));
        assert!(policy.is_working_day(kind, date("2026-03-02")));
        assert!(!policy.is_working_day(kind, date("2026-03-03")));
        assert!(!policy.is_working_day(kind, date("2026-03-04")));
        assert!(policy.is_working_day(kind, date("2026-03-05")));
    }

    #[test]
    fn test_rotation_handles_dates_before_anchor() {
        let policy = SchedulePolicy {
            weekday: WeekdayRule::default(),
            rotation: RotationRule {
                days_on: 2,
                days_off: 2,
                anchor: date("2026-03-05"),
            },
        };
        let kind = ScheduleKind::RotatingLongShift;
        // 2026-03-03 is two days before the anchor: cycle offset 2, a rest day.
        assert!(!policy.is_working_day(kind, date("2026-03-03")));
        // 2026-03-01 is four days before: offset 0, a worked day.
        assert!(policy.is_working_day(kind, date("2026-03-01")));
    }

    #[test]
    fn test_degenerate_rotation_never_works() {
        let policy = SchedulePolicy {
            weekday: WeekdayRule::default(),
            rotation: RotationRule {
                days_on: 0,
                days_off: 0,
                anchor: date("2026-03-01"),
            },
        };
        assert!(!policy.is_working_day(ScheduleKind::RotatingLongShift, date("2026-03-10")));
    }
}
