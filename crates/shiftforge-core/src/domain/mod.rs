//! Domain model for shift scheduling
//!
//! - `Employee`, `Day`: indices into the assignment space
//! - `ShiftKind`: mutually exclusive shift categories for one day
//! - `ScheduleParameters`: roster size, horizon and rules for one solve
//! - `Roster`: one shift kind per (employee, day) once solved

mod ids;
mod parameters;
mod roster;
mod shift;

pub use ids::{Day, Employee};
pub use parameters::{
    HolidayRequests, ScheduleParameters, StaffingRequirements, MAX_ROSTER_CELLS,
};
pub use roster::Roster;
pub use shift::ShiftKind;
