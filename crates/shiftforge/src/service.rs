//! Service façade: parameters in, serializable response out.

use serde::Serialize;
use shiftforge_config::{EnvironmentMode, SolverConfig};
use shiftforge_core::{
    validate_roster, Result, ScheduleParameters, ScheduleStatus, ShiftForgeError,
};
use shiftforge_solver::{BacktrackingSolver, ConstraintSolver, ExternalTermination};
use tracing::warn;

use crate::adapter::{self, SolveOutcome};
use crate::builder::ShiftModel;
use crate::report::{self, ReportBody, ScheduleReport};

/// Roster lines on success, a human-readable message otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScheduleData {
    Lines(Vec<String>),
    Message(String),
}

/// Engine statistics of the solve behind a response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveStatistics {
    pub status_name: String,
    pub branches: u64,
    pub conflicts: u64,
    pub propagations: u64,
    pub wall_time_seconds: f64,
}

/// The result of one schedule-generation request.
///
/// ```json
/// {
///   "success": true,
///   "status": "OPTIMAL",
///   "data": ["Solution found:", "Day 0:", "..."],
///   "statistics": { "status_name": "OPTIMAL", "branches": 42, ... }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResponse {
    pub success: bool,
    pub status: ScheduleStatus,
    pub data: ScheduleData,
    pub statistics: SolveStatistics,
}

impl ScheduleResponse {
    fn new(report: ScheduleReport, outcome: &SolveOutcome) -> Self {
        let data = match report.body {
            ReportBody::Schedule { lines, .. } => ScheduleData::Lines(lines),
            ReportBody::Message(message) => ScheduleData::Message(message),
        };
        let stats = &outcome.statistics;
        Self {
            success: report.status.is_success(),
            status: report.status,
            data,
            statistics: SolveStatistics {
                status_name: outcome.engine_status.name().to_string(),
                branches: stats.branches,
                conflicts: stats.conflicts,
                propagations: stats.propagations,
                wall_time_seconds: stats.wall_time.as_secs_f64(),
            },
        }
    }
}

/// Builds, solves and reports one schedule.
///
/// Uses a [`BacktrackingSolver`] configured from `config`.
///
/// # Errors
///
/// Configuration errors are returned before any solve. An `Internal` error
/// means the system failed, as opposed to "no schedule exists", which is a
/// successful call with `success: false`.
///
/// # Examples
///
/// ```
/// use shiftforge::prelude::*;
///
/// let params = ScheduleParameters::new(2, 3, 3)
///     .with_requirements(StaffingRequirements::uniform(3, &[(ShiftKind::Day, 1)]));
/// let response = generate_schedule(&params, &SolverConfig::default()).unwrap();
///
/// assert!(response.success);
/// assert_eq!(response.status.to_string(), "OPTIMAL");
/// ```
pub fn generate_schedule(
    params: &ScheduleParameters,
    config: &SolverConfig,
) -> Result<ScheduleResponse> {
    let solver = BacktrackingSolver::from_config(config);
    generate_schedule_with(&solver, params, config.environment_mode)
}

/// [`generate_schedule`] that also gives up once `cancel` is triggered.
///
/// A cancelled solve reports `UNKNOWN(0)` like any other early stop.
///
/// # Errors
///
/// Same as [`generate_schedule`].
pub fn generate_schedule_cancellable(
    params: &ScheduleParameters,
    config: &SolverConfig,
    cancel: ExternalTermination,
) -> Result<ScheduleResponse> {
    let solver = BacktrackingSolver::from_config(config).with_additional_termination(cancel);
    generate_schedule_with(&solver, params, config.environment_mode)
}

/// [`generate_schedule`] with a caller-supplied engine.
///
/// In [`EnvironmentMode::FullAssert`] every returned roster is re-validated
/// and a violation becomes an `Internal` error.
pub fn generate_schedule_with<S>(
    solver: &S,
    params: &ScheduleParameters,
    environment_mode: EnvironmentMode,
) -> Result<ScheduleResponse>
where
    S: ConstraintSolver + ?Sized,
{
    let shift_model = ShiftModel::build(params)?;
    let outcome = adapter::solve(solver, &shift_model)?;

    if environment_mode == EnvironmentMode::FullAssert {
        if let Some(roster) = outcome.result.roster() {
            if let Err(violations) = validate_roster(params, roster) {
                warn!(event = "roster_invalid", violations = violations.len());
                let details: Vec<String> =
                    violations.iter().map(|v| v.message.clone()).collect();
                return Err(ShiftForgeError::Internal(format!(
                    "solver returned a roster violating {} rule(s): {}",
                    violations.len(),
                    details.join("; ")
                )));
            }
        }
    }

    let report = report::report(params, &outcome.result);
    Ok(ScheduleResponse::new(report, &outcome))
}
