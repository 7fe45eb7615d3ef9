//! Engine doubles for exercising the adapter and service.

use shiftforge_core::{Day, Employee, Roster};
use shiftforge_solver::{
    ConstraintSolver, CpModel, CpSolverResponse, CpSolverStatus, SearchStatistics,
};

use crate::builder::ShiftModel;

/// Answers every solve with the same response.
#[derive(Debug, Clone)]
pub(crate) struct FixedSolver {
    response: CpSolverResponse,
}

impl FixedSolver {
    pub(crate) fn new(response: CpSolverResponse) -> Self {
        Self { response }
    }

    /// Reports `roster` as the assignment of `built`.
    pub(crate) fn reporting(status: CpSolverStatus, built: &ShiftModel, roster: &Roster) -> Self {
        Self::new(CpSolverResponse::solved(
            status,
            roster_values(built, roster),
            SearchStatistics::default(),
        ))
    }
}

/// Assignment of every model variable that encodes `roster`; auxiliary
/// variables are false.
pub(crate) fn roster_values(built: &ShiftModel, roster: &Roster) -> Vec<bool> {
    let mut values = vec![false; built.model().variable_count()];
    let vars = built.variables();
    for e in (0..roster.num_employees()).map(Employee::new) {
        for d in (0..roster.num_days()).map(Day::new) {
            values[vars.get(e, d, roster.shift(e, d)).index()] = true;
        }
    }
    values
}

impl ConstraintSolver for FixedSolver {
    fn solve(&self, _model: &CpModel) -> CpSolverResponse {
        self.response.clone()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
