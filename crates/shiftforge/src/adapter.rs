//! Solve Adapter: runs a [`ShiftModel`] through a [`ConstraintSolver`] and
//! normalizes the engine's answer into a [`SolveResult`].

use shiftforge_core::{Day, Employee, Result, Roster, ShiftForgeError, ShiftKind, SolveResult};
use shiftforge_solver::{ConstraintSolver, CpSolverResponse, CpSolverStatus, SearchStatistics};
use tracing::warn;

use crate::builder::{ShiftModel, ShiftVariables};

/// A normalized result plus the engine's search statistics.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub result: SolveResult,
    /// Raw engine status, kept for diagnostics.
    pub engine_status: CpSolverStatus,
    pub statistics: SearchStatistics,
}

/// Makes exactly one solve attempt.
///
/// Every engine status maps to one [`SolveResult`] variant; `Unknown`
/// carries the engine's numeric code.
///
/// # Errors
///
/// Returns [`ShiftForgeError::Internal`] when a reported solution does not
/// assign exactly one shift kind to some (employee, day).
pub fn solve<S>(solver: &S, shift_model: &ShiftModel) -> Result<SolveOutcome>
where
    S: ConstraintSolver + ?Sized,
{
    let response = solver.solve(shift_model.model());
    let status = response.status();

    let result = match status {
        CpSolverStatus::Optimal => {
            SolveResult::Optimal(extract_roster(&response, shift_model.variables())?)
        }
        CpSolverStatus::Feasible => {
            SolveResult::Feasible(extract_roster(&response, shift_model.variables())?)
        }
        CpSolverStatus::Infeasible => SolveResult::Infeasible,
        CpSolverStatus::ModelInvalid => {
            let reason = response
                .invalid_reason()
                .map_or_else(|| "unspecified".to_string(), ToString::to_string);
            warn!(event = "model_invalid", solver = solver.name(), error = %reason);
            SolveResult::Invalid
        }
        CpSolverStatus::Unknown => SolveResult::Unknown(status.code()),
    };

    Ok(SolveOutcome {
        result,
        engine_status: status,
        statistics: *response.statistics(),
    })
}

/// Reads the assignment variables back into a [`Roster`].
fn extract_roster(response: &CpSolverResponse, vars: &ShiftVariables) -> Result<Roster> {
    let (num_employees, num_days) = (vars.num_employees(), vars.num_days());
    let mut shifts = Vec::with_capacity(num_employees * num_days);
    for e in (0..num_employees).map(Employee::new) {
        for d in (0..num_days).map(Day::new) {
            let mut chosen = ShiftKind::ALL
                .into_iter()
                .filter(|&shift| response.value(vars.get(e, d, shift)) == Some(true));
            match (chosen.next(), chosen.next()) {
                (Some(shift), None) => shifts.push(shift),
                _ => {
                    return Err(ShiftForgeError::Internal(format!(
                        "solution does not assign exactly one shift to employee {e} on day {d}"
                    )))
                }
            }
        }
    }
    Ok(Roster::from_fn(num_employees, num_days, |e, d| {
        shifts[e.index() * num_days + d.index()]
    }))
}
