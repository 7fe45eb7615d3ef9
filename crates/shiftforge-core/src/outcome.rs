//! Normalized solve outcomes.

use std::fmt;

use crate::domain::Roster;

/// The outcome of one solve attempt.
///
/// Each engine status maps to exactly one variant. Only `Optimal` and
/// `Feasible` carry a roster; no partial roster is ever produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// A roster was found and proven optimal.
    Optimal(Roster),
    /// A roster was found without an optimality proof.
    Feasible(Roster),
    /// No roster satisfies every constraint.
    Infeasible,
    /// The engine rejected the model as malformed.
    Invalid,
    /// The engine stopped without a definitive answer; carries its raw status code.
    Unknown(i32),
}

impl SolveResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SolveResult::Optimal(_) | SolveResult::Feasible(_))
    }

    pub fn roster(&self) -> Option<&Roster> {
        match self {
            SolveResult::Optimal(roster) | SolveResult::Feasible(roster) => Some(roster),
            _ => None,
        }
    }

    pub fn into_roster(self) -> Option<Roster> {
        match self {
            SolveResult::Optimal(roster) | SolveResult::Feasible(roster) => Some(roster),
            _ => None,
        }
    }

    pub fn status(&self) -> ScheduleStatus {
        match self {
            SolveResult::Optimal(_) => ScheduleStatus::Optimal,
            SolveResult::Feasible(_) => ScheduleStatus::Feasible,
            SolveResult::Infeasible => ScheduleStatus::Infeasible,
            SolveResult::Invalid => ScheduleStatus::ModelInvalid,
            SolveResult::Unknown(code) => ScheduleStatus::Unknown(*code),
        }
    }
}

/// Machine-distinguishable status label of a solve outcome.
///
/// Renders as `OPTIMAL`, `FEASIBLE`, `INFEASIBLE`, `MODEL_INVALID` or
/// `UNKNOWN(<code>)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleStatus {
    Optimal,
    Feasible,
    Infeasible,
    ModelInvalid,
    Unknown(i32),
}

impl ScheduleStatus {
    pub fn is_success(self) -> bool {
        matches!(self, ScheduleStatus::Optimal | ScheduleStatus::Feasible)
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Optimal => f.write_str("OPTIMAL"),
            ScheduleStatus::Feasible => f.write_str("FEASIBLE"),
            ScheduleStatus::Infeasible => f.write_str("INFEASIBLE"),
            ScheduleStatus::ModelInvalid => f.write_str("MODEL_INVALID"),
            ScheduleStatus::Unknown(code) => write!(f, "UNKNOWN({})", code),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ScheduleStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShiftKind;

    #[test]
    fn test_status_labels() {
        assert_eq!(ScheduleStatus::Optimal.to_string(), "OPTIMAL");
        assert_eq!(ScheduleStatus::Feasible.to_string(), "FEASIBLE");
        assert_eq!(ScheduleStatus::Infeasible.to_string(), "INFEASIBLE");
        assert_eq!(ScheduleStatus::ModelInvalid.to_string(), "MODEL_INVALID");
        assert_eq!(ScheduleStatus::Unknown(0).to_string(), "UNKNOWN(0)");
    }

    #[test]
    fn test_only_success_carries_roster() {
        let roster = Roster::from_fn(1, 1, |_, _| ShiftKind::Off);
        assert!(SolveResult::Optimal(roster.clone()).roster().is_some());
        assert!(SolveResult::Feasible(roster).is_success());
        assert!(SolveResult::Infeasible.roster().is_none());
        assert!(SolveResult::Invalid.into_roster().is_none());
        assert_eq!(SolveResult::Unknown(7).status(), ScheduleStatus::Unknown(7));
        assert!(!SolveResult::Unknown(7).is_success());
    }
}
