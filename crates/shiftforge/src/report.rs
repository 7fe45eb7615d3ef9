//! Schedule Reporter: renders a [`SolveResult`] as roster lines, a staffing
//! audit, or a status message.
//!
//! Pure formatting. The roster is trusted as solved; nothing is re-checked
//! here.

use std::fmt;

use shiftforge_core::{
    Day, Employee, Roster, ScheduleParameters, ScheduleStatus, ShiftKind, SolveResult,
};

pub const INFEASIBLE_MESSAGE: &str =
    "No solution found. Constraints might be too tight or conflicting.";
pub const MODEL_INVALID_MESSAGE: &str = "Model is invalid. Check model construction.";

/// Assigned versus required headcount for one (day, work kind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffingAudit {
    pub day: Day,
    pub shift: ShiftKind,
    pub assigned: Vec<Employee>,
    /// `None` when the (day, shift) has no requirement.
    pub required: Option<usize>,
}

impl StaffingAudit {
    /// Returns true when there is no requirement or it is met exactly.
    pub fn is_met(&self) -> bool {
        self.required.map_or(true, |n| n == self.assigned.len())
    }
}

impl fmt::Display for StaffingAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assigned: Vec<String> = self.assigned.iter().map(ToString::to_string).collect();
        write!(
            f,
            "    -> {} assigned: {} (Required: ",
            self.shift.display_name(),
            assigned.join(", ")
        )?;
        match self.required {
            Some(n) => write!(f, "{})", n),
            None => f.write_str("unconstrained)"),
        }
    }
}

/// What a report carries besides its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBody {
    Schedule {
        lines: Vec<String>,
        audit: Vec<StaffingAudit>,
    },
    Message(String),
}

/// A rendered solve outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleReport {
    pub status: ScheduleStatus,
    pub body: ReportBody,
}

impl ScheduleReport {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn lines(&self) -> Option<&[String]> {
        match &self.body {
            ReportBody::Schedule { lines, .. } => Some(lines),
            ReportBody::Message(_) => None,
        }
    }

    pub fn audit(&self) -> Option<&[StaffingAudit]> {
        match &self.body {
            ReportBody::Schedule { audit, .. } => Some(audit),
            ReportBody::Message(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match &self.body {
            ReportBody::Schedule { .. } => None,
            ReportBody::Message(message) => Some(message),
        }
    }
}

/// Renders any solve result.
pub fn report(params: &ScheduleParameters, result: &SolveResult) -> ScheduleReport {
    let body = match result.roster() {
        Some(roster) => ReportBody::Schedule {
            lines: roster_lines(params, roster),
            audit: staffing_audit(params, roster),
        },
        None => ReportBody::Message(status_message(result)),
    };
    ScheduleReport {
        status: result.status(),
        body,
    }
}

/// Day-by-day roster lines followed by each day's staffing audit.
///
/// ```text
/// Solution found:
/// Day 0:
///   Employee 0: Day Off (Shift ID: 0)
///   Employee 1: Night Shift (Shift ID: 2)
///   Employee 2: Day Shift (Shift ID: 1)
///     -> Day Shift assigned: 2 (Required: 1)
///     -> Night Shift assigned: 1 (Required: 1)
/// --------------------
/// ```
pub fn roster_lines(params: &ScheduleParameters, roster: &Roster) -> Vec<String> {
    let mut lines = vec!["Solution found:".to_string()];
    for day in (0..roster.num_days()).map(Day::new) {
        lines.push(format!("Day {}:", day));
        for employee in (0..roster.num_employees()).map(Employee::new) {
            let shift = roster.shift(employee, day);
            lines.push(format!(
                "  Employee {}: {} (Shift ID: {})",
                employee,
                shift.display_name(),
                shift.index()
            ));
        }
        for shift in ShiftKind::WORK {
            lines.push(audit_entry(params, roster, day, shift).to_string());
        }
    }
    lines.push("-".repeat(20));
    lines
}

/// One entry per (day, work kind), in day order.
pub fn staffing_audit(params: &ScheduleParameters, roster: &Roster) -> Vec<StaffingAudit> {
    (0..roster.num_days())
        .map(Day::new)
        .flat_map(|day| ShiftKind::WORK.map(|shift| audit_entry(params, roster, day, shift)))
        .collect()
}

/// The message shown instead of a roster.
pub fn status_message(result: &SolveResult) -> String {
    match result {
        SolveResult::Optimal(_) | SolveResult::Feasible(_) => "Solution found.".to_string(),
        SolveResult::Infeasible => INFEASIBLE_MESSAGE.to_string(),
        SolveResult::Invalid => MODEL_INVALID_MESSAGE.to_string(),
        SolveResult::Unknown(code) => {
            format!("Solver status: {code} (An unknown error or other status occurred)")
        }
    }
}

fn audit_entry(
    params: &ScheduleParameters,
    roster: &Roster,
    day: Day,
    shift: ShiftKind,
) -> StaffingAudit {
    StaffingAudit {
        day,
        shift,
        assigned: roster.employees_on(day, shift),
        required: params.requirements.get(day, shift),
    }
}

#[cfg(test)]
mod tests {
    use shiftforge_test::{roster_from_rows, scenario_a};

    use super::*;

    fn scenario_a_roster() -> Roster {
        roster_from_rows(&["ODDNO", "DNODD", "NONON"])
    }

    #[test]
    fn test_roster_lines_layout() {
        let lines = roster_lines(&scenario_a(), &scenario_a_roster());

        assert_eq!(lines[0], "Solution found:");
        assert_eq!(lines[1], "Day 0:");
        assert_eq!(lines[2], "  Employee 0: Day Off (Shift ID: 0)");
        assert_eq!(lines[3], "  Employee 1: Day Shift (Shift ID: 1)");
        assert_eq!(lines[4], "  Employee 2: Night Shift (Shift ID: 2)");
        assert_eq!(lines[5], "    -> Day Shift assigned: 1 (Required: 1)");
        assert_eq!(lines[6], "    -> Night Shift assigned: 2 (Required: 1)");
        assert_eq!(lines[7], "Day 1:");
        assert_eq!(lines.last().map(String::as_str), Some("--------------------"));
        // Header, 5 x (day + 3 employees + 2 audits), footer.
        assert_eq!(lines.len(), 1 + 5 * 6 + 1);
    }

    #[test]
    fn test_unconstrained_audit_line() {
        let params = ScheduleParameters::new(2, 1, 3);
        let roster = roster_from_rows(&["D", "D"]);
        let lines = roster_lines(&params, &roster);

        assert_eq!(lines[4], "    -> Day Shift assigned: 0, 1 (Required: unconstrained)");
        assert_eq!(lines[5], "    -> Night Shift assigned:  (Required: unconstrained)");
    }

    #[test]
    fn test_staffing_audit() {
        let audit = staffing_audit(&scenario_a(), &scenario_a_roster());

        assert_eq!(audit.len(), 10);
        assert_eq!(audit[0].day, Day::new(0));
        assert_eq!(audit[0].shift, ShiftKind::Day);
        assert_eq!(audit[0].assigned, vec![Employee::new(1)]);
        assert_eq!(audit[0].required, Some(1));
        assert!(audit.iter().all(StaffingAudit::is_met));
    }

    #[test]
    fn test_success_report_has_lines_and_audit() {
        let report = report(&scenario_a(), &SolveResult::Feasible(scenario_a_roster()));

        assert!(report.is_success());
        assert_eq!(report.status, ScheduleStatus::Feasible);
        assert!(report.lines().is_some());
        assert_eq!(report.audit().map(<[_]>::len), Some(10));
        assert!(report.message().is_none());
    }

    #[test]
    fn test_failure_messages() {
        let params = scenario_a();

        let infeasible = report(&params, &SolveResult::Infeasible);
        assert_eq!(infeasible.status.to_string(), "INFEASIBLE");
        assert_eq!(infeasible.message(), Some(INFEASIBLE_MESSAGE));
        assert!(infeasible.lines().is_none());

        let invalid = report(&params, &SolveResult::Invalid);
        assert_eq!(invalid.status.to_string(), "MODEL_INVALID");
        assert_eq!(invalid.message(), Some(MODEL_INVALID_MESSAGE));

        let unknown = report(&params, &SolveResult::Unknown(0));
        assert_eq!(unknown.status.to_string(), "UNKNOWN(0)");
        assert_eq!(
            unknown.message(),
            Some("Solver status: 0 (An unknown error or other status occurred)")
        );
    }
}
