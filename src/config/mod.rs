//! Working-day policy configuration.
//!
//! The policy decides which calendar dates each schedule type works on. It is
//! loaded from a YAML file (see `config/schedule_policy.yaml` for the shape)
//! or built from [`SchedulePolicy::default`] when no file is supplied.

mod loader;
mod types;

pub use loader::PolicyLoader;
pub use types::{PolicyDay, RotationRule, SchedulePolicy, WeekdayRule};
