//! Error types for ShiftForge

use thiserror::Error;

use crate::domain::{Day, ShiftKind};

/// Main error type for ShiftForge operations
#[derive(Debug, Error)]
pub enum ShiftForgeError {
    /// Invalid schedule parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// A staffing requirement asks for more employees than the roster holds
    #[error(
        "Configuration error: {shift} on day {day} requires {required} employees \
         but only {available} exist"
    )]
    RequirementExceedsRoster {
        day: Day,
        shift: ShiftKind,
        required: usize,
        available: usize,
    },

    /// A staffing requirement targets a non-work shift kind
    #[error("Configuration error: staffing requirement for non-work shift {shift} on day {day}")]
    NonWorkRequirement { day: Day, shift: ShiftKind },

    /// The solving engine rejected the constraint model
    #[error("Model invalid: {0}")]
    ModelInvalid(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShiftForgeError {
    /// Returns true for errors caused by the caller's parameters.
    ///
    /// These are detected while building the model and never reach the solver.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ShiftForgeError::Config(_)
                | ShiftForgeError::RequirementExceedsRoster { .. }
                | ShiftForgeError::NonWorkRequirement { .. }
        )
    }
}

/// Result type alias for ShiftForge operations
pub type Result<T> = std::result::Result<T, ShiftForgeError>;
