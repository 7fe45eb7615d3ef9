//! ShiftForge Solver Engine
//!
//! A boolean constraint solver consumed through a narrow contract:
//! build a [`CpModel`], hand it to a [`ConstraintSolver`], read the
//! [`CpSolverResponse`].
//!
//! This crate provides:
//! - The model (boolean variables, linear and implication constraints)
//! - A propagating depth-first backtracking solver
//! - Termination conditions
//! - Search statistics
//!
//! # Example
//!
//! ```
//! use shiftforge_solver::{BacktrackingSolver, ConstraintSolver, CpModel, CpSolverStatus};
//!
//! let mut model = CpModel::new("example");
//! let x = model.new_bool_var("x");
//! let y = model.new_bool_var("y");
//! model.add_exactly_one([x, y]);
//! model.add_implication(x, y);
//!
//! let response = BacktrackingSolver::new().solve(&model);
//! assert_eq!(response.status(), CpSolverStatus::Optimal);
//! assert_eq!(response.value(x), Some(false));
//! assert_eq!(response.value(y), Some(true));
//! ```

pub mod model;
pub mod response;
pub mod scope;
pub mod search;
pub mod solver;
pub mod statistics;
pub mod termination;

pub use model::{BoolVar, Constraint, CpModel, LinearExpr, Literal, ModelError};
pub use response::{CpSolverResponse, CpSolverStatus};
pub use scope::SearchScope;
pub use search::{BacktrackingSolver, ConfiguredTermination};
pub use solver::ConstraintSolver;
pub use statistics::SearchStatistics;
pub use termination::{
    ExternalTermination, NoTermination, NodeCountTermination, OrTermination, Termination,
    TimeTermination,
};
