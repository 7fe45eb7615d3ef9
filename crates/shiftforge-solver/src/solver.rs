//! The solving contract.

use crate::model::CpModel;
use crate::response::CpSolverResponse;

/// Anything that can solve a [`CpModel`].
///
/// One call is one solve attempt. Implementations keep no state between
/// calls, so a shared solver can serve concurrent requests.
pub trait ConstraintSolver {
    /// Solves the model and reports the outcome.
    ///
    /// A malformed model is reported as `ModelInvalid`, never as a panic.
    fn solve(&self, model: &CpModel) -> CpSolverResponse;

    /// Returns the engine name for diagnostics.
    fn name(&self) -> &'static str;
}
