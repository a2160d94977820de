//! Domain models for the scheduling and closing engine.

mod adjustment;
mod closing;
mod identity;
mod interval;
mod schedule;

pub use adjustment::{AdjustmentKind, AdjustmentRequest, AdjustmentStatus};
pub use closing::{
    ClosingStatus, DailyClosing, DaySummary, EntryOrigin, PartialRevenueEntry, PaymentMethod,
};
pub use identity::{Caller, Role};
pub use interval::TimeRange;
pub use schedule::{BreakKind, EmployeeShift, ScheduleKind, ShiftBreak, WorkScheduleTemplate};
