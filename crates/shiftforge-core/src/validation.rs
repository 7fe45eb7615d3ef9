//! Invariant checks for solved rosters.
//!
//! Re-checks a roster against the schedule parameters without trusting the
//! solver. Detects:
//! - Roster dimensions that disagree with the parameters
//! - Staffing counts that differ from the required headcount
//! - Holiday requests that were not honored
//! - Night shifts not followed by a day off
//! - Windows of `max_consecutive_work_days + 1` days without a day off
//!
//! Exactly one shift per (employee, day) holds by construction of [`Roster`].

use crate::domain::{Day, Employee, Roster, ScheduleParameters, ShiftKind};

/// A violated invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Error category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Roster size differs from the parameters.
    ShapeMismatch,
    /// Assigned headcount differs from the requirement.
    Staffing,
    /// A requested holiday was not `Off`.
    Holiday,
    /// A night shift was followed by a work day.
    NightRest,
    /// Too many work days inside one window.
    ConsecutiveWork,
}

impl Violation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster against every scheduling invariant.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(violations)` with every detected issue.
pub fn validate_roster(
    params: &ScheduleParameters,
    roster: &Roster,
) -> Result<(), Vec<Violation>> {
    if roster.num_employees() != params.num_employees || roster.num_days() != params.num_days {
        return Err(vec![Violation::new(
            ViolationKind::ShapeMismatch,
            format!(
                "Roster is {}x{} but parameters describe {}x{}",
                roster.num_employees(),
                roster.num_days(),
                params.num_employees,
                params.num_days
            ),
        )]);
    }

    let mut violations = Vec::new();

    for (day, shift, required) in params.requirements.iter() {
        if !params.contains_day(day) {
            continue;
        }
        let assigned = roster.count(day, shift);
        if assigned != required {
            violations.push(Violation::new(
                ViolationKind::Staffing,
                format!(
                    "Day {}: {} has {} employees, {} required",
                    day, shift, assigned, required
                ),
            ));
        }
    }

    for (employee, day) in params.holiday_requests.requested() {
        if let Some(shift) = roster.get(employee, day) {
            if shift != ShiftKind::Off {
                violations.push(Violation::new(
                    ViolationKind::Holiday,
                    format!(
                        "Employee {} requested day {} off but works {}",
                        employee, day, shift
                    ),
                ));
            }
        }
    }

    for employee in params.employees() {
        check_night_rest(params, roster, employee, &mut violations);
        check_consecutive_work(params, roster, employee, &mut violations);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_night_rest(
    params: &ScheduleParameters,
    roster: &Roster,
    employee: Employee,
    violations: &mut Vec<Violation>,
) {
    for d in 0..params.num_days.saturating_sub(1) {
        let day = Day::new(d);
        if roster.shift(employee, day) == ShiftKind::Night
            && roster.shift(employee, day.next()) != ShiftKind::Off
        {
            violations.push(Violation::new(
                ViolationKind::NightRest,
                format!(
                    "Employee {} works NIGHT on day {} and {} on day {}",
                    employee,
                    day,
                    roster.shift(employee, day.next()),
                    day.next()
                ),
            ));
        }
    }
}

fn check_consecutive_work(
    params: &ScheduleParameters,
    roster: &Roster,
    employee: Employee,
    violations: &mut Vec<Violation>,
) {
    let limit = params.max_consecutive_work_days;
    if params.num_days <= limit {
        return;
    }
    let window = limit + 1;

    let shifts = roster.employee_shifts(employee);
    for (start, days) in shifts.windows(window).enumerate() {
        let worked = days.iter().filter(|s| s.is_work()).count();
        if worked > limit {
            violations.push(Violation::new(
                ViolationKind::ConsecutiveWork,
                format!(
                    "Employee {} works {} of the {} days starting at day {} (limit {})",
                    employee, worked, window, start, limit
                ),
            ));
        }
    }
}
