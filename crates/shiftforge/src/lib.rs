//! ShiftForge - shift scheduling as a boolean constraint model
//!
//! Domain Parameters go through the Model Builder, the Solve Adapter and the
//! Schedule Reporter:
//!
//! ```text
//! ScheduleParameters -> ShiftModel::build -> adapter::solve -> report::report
//! ```
//!
//! [`generate_schedule`] runs the whole pipeline.
//!
//! # Example
//!
//! ```rust
//! use shiftforge::prelude::*;
//!
//! let params = ScheduleParameters::new(3, 5, 3)
//!     .with_requirements(StaffingRequirements::uniform(
//!         5,
//!         &[(ShiftKind::Day, 1), (ShiftKind::Night, 1)],
//!     ))
//!     .with_holiday_requests(HolidayRequests::new().with_request(Employee::new(0), Day::new(0)));
//!
//! let model = ShiftModel::build(&params).unwrap();
//! let outcome = solve(&BacktrackingSolver::new(), &model).unwrap();
//! let roster = outcome.result.roster().unwrap();
//! assert_eq!(roster.shift(Employee::new(0), Day::new(0)), ShiftKind::Off);
//! ```

pub mod adapter;
pub mod builder;
pub mod report;
pub mod service;

#[cfg(test)]
mod test_support;

pub use adapter::{solve, SolveOutcome};
pub use builder::{ShiftModel, ShiftVariables};
pub use report::{ScheduleReport, StaffingAudit};
pub use service::{
    generate_schedule, generate_schedule_cancellable, generate_schedule_with, ScheduleData,
    ScheduleResponse,
};

pub use shiftforge_core::{
    validate_roster, Day, Employee, HolidayRequests, Result, Roster, ScheduleParameters,
    ScheduleStatus, ShiftForgeError, ShiftKind, SolveResult, StaffingRequirements,
};
pub use shiftforge_solver::ExternalTermination;

/// Console output, enabled by the `console` feature.
#[cfg(feature = "console")]
pub use shiftforge_console as console;

pub mod prelude {
    pub use super::{generate_schedule, solve, ScheduleResponse, ShiftModel};
    pub use super::{
        Day, Employee, HolidayRequests, Roster, ScheduleParameters, ScheduleStatus,
        ShiftForgeError, ShiftKind, SolveResult, StaffingRequirements,
    };
    pub use shiftforge_config::{EnvironmentMode, SolverConfig};
    pub use shiftforge_solver::{BacktrackingSolver, ConstraintSolver};
}
