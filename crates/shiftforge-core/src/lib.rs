//! ShiftForge Core - Domain types for shift scheduling
//!
//! This crate provides the fundamental abstractions for ShiftForge:
//! - Identifiers for employees and days of the planning horizon
//! - The closed set of shift kinds and the work predicate
//! - Schedule parameters (staffing, holiday requests, rest rules)
//! - Rosters, solve outcomes and their status labels
//! - Invariant validation for returned rosters

pub mod domain;
pub mod error;
pub mod outcome;
pub mod validation;

#[cfg(test)]
mod validation_tests;

pub use domain::{
    Day, Employee, HolidayRequests, Roster, ScheduleParameters, ShiftKind, StaffingRequirements,
    MAX_ROSTER_CELLS,
};
pub use error::{Result, ShiftForgeError};
pub use outcome::{ScheduleStatus, SolveResult};
pub use validation::{validate_roster, Violation, ViolationKind};
