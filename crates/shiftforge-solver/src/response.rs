//! Solve outcome.

use std::fmt;

use crate::model::{BoolVar, ModelError};
use crate::statistics::SearchStatistics;

/// Outcome category of a solve.
///
/// Numeric codes follow the common CP solver convention and are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpSolverStatus {
    /// Search stopped before reaching a conclusion.
    Unknown,
    /// The model was rejected before search.
    ModelInvalid,
    /// A solution was found but not proven optimal.
    Feasible,
    /// No assignment satisfies the model.
    Infeasible,
    /// A solution was found and proven optimal.
    Optimal,
}

impl CpSolverStatus {
    pub fn code(self) -> i32 {
        match self {
            CpSolverStatus::Unknown => 0,
            CpSolverStatus::ModelInvalid => 1,
            CpSolverStatus::Feasible => 2,
            CpSolverStatus::Infeasible => 3,
            CpSolverStatus::Optimal => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CpSolverStatus::Unknown => "UNKNOWN",
            CpSolverStatus::ModelInvalid => "MODEL_INVALID",
            CpSolverStatus::Feasible => "FEASIBLE",
            CpSolverStatus::Infeasible => "INFEASIBLE",
            CpSolverStatus::Optimal => "OPTIMAL",
        }
    }

    /// Returns true when the response carries an assignment.
    pub fn has_solution(self) -> bool {
        matches!(self, CpSolverStatus::Optimal | CpSolverStatus::Feasible)
    }
}

impl fmt::Display for CpSolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one solve: status, assignment and statistics.
#[derive(Debug, Clone)]
pub struct CpSolverResponse {
    status: CpSolverStatus,
    values: Vec<bool>,
    statistics: SearchStatistics,
    invalid_reason: Option<ModelError>,
}

impl CpSolverResponse {
    /// A response carrying an assignment, indexed by variable.
    pub fn solved(
        status: CpSolverStatus,
        values: Vec<bool>,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            status,
            values,
            statistics,
            invalid_reason: None,
        }
    }

    pub fn without_solution(status: CpSolverStatus, statistics: SearchStatistics) -> Self {
        Self {
            status,
            values: Vec::new(),
            statistics,
            invalid_reason: None,
        }
    }

    pub fn invalid(reason: ModelError) -> Self {
        Self {
            status: CpSolverStatus::ModelInvalid,
            values: Vec::new(),
            statistics: SearchStatistics::default(),
            invalid_reason: Some(reason),
        }
    }

    pub fn status(&self) -> CpSolverStatus {
        self.status
    }

    /// Value of `var` in the solution, or `None` without one.
    pub fn value(&self, var: BoolVar) -> Option<bool> {
        self.values.get(var.index()).copied()
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn has_solution(&self) -> bool {
        self.status.has_solution()
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Why the model was rejected, for `ModelInvalid` responses.
    pub fn invalid_reason(&self) -> Option<&ModelError> {
        self.invalid_reason.as_ref()
    }
}
