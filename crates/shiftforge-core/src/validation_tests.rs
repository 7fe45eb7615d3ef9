//! Tests for roster validation.

use crate::domain::{Day, Employee, HolidayRequests, Roster, ScheduleParameters, ShiftKind, StaffingRequirements};
use crate::validation::{validate_roster, ViolationKind};

use ShiftKind::{Day as D, Night as N, Off as O};

fn roster_from_rows(rows: &[&[ShiftKind]]) -> Roster {
    let num_days = rows.first().map_or(0, |r| r.len());
    Roster::from_fn(rows.len(), num_days, |e, d| rows[e.index()][d.index()])
}

fn kinds(violations: &[crate::Violation]) -> Vec<ViolationKind> {
    violations.iter().map(|v| v.kind).collect()
}

#[test]
fn test_valid_roster() {
    let params = ScheduleParameters::new(3, 4, 3)
        .with_requirements(StaffingRequirements::uniform(4, &[(D, 1), (N, 1)]))
        .with_holiday_requests(HolidayRequests::new().with_request(Employee::new(0), Day::new(0)));

    let roster = roster_from_rows(&[
        &[O, D, N, O],
        &[D, N, O, D],
        &[N, O, D, N],
    ]);

    assert_eq!(validate_roster(&params, &roster), Ok(()));
}

#[test]
fn test_shape_mismatch() {
    let params = ScheduleParameters::new(2, 2, 3);
    let roster = roster_from_rows(&[&[O, O, O]]);

    let violations = validate_roster(&params, &roster).unwrap_err();
    assert_eq!(kinds(&violations), vec![ViolationKind::ShapeMismatch]);
}

#[test]
fn test_staffing_must_match_exactly() {
    let params = ScheduleParameters::new(2, 1, 3)
        .with_requirements(StaffingRequirements::new().with(Day::new(0), D, 1));
    let roster = roster_from_rows(&[&[D], &[D]]);

    let violations = validate_roster(&params, &roster).unwrap_err();
    assert_eq!(kinds(&violations), vec![ViolationKind::Staffing]);
}

#[test]
fn test_absent_requirement_is_unconstrained() {
    let params = ScheduleParameters::new(2, 1, 3)
        .with_requirements(StaffingRequirements::new().with(Day::new(0), D, 1));
    let roster = roster_from_rows(&[&[D], &[N]]);

    assert_eq!(validate_roster(&params, &roster), Ok(()));
}

#[test]
fn test_holiday_violation() {
    let params = ScheduleParameters::new(1, 2, 3)
        .with_holiday_requests(HolidayRequests::new().with_request(Employee::new(0), Day::new(1)));
    let roster = roster_from_rows(&[&[O, D]]);

    let violations = validate_roster(&params, &roster).unwrap_err();
    assert_eq!(kinds(&violations), vec![ViolationKind::Holiday]);
}

#[test]
fn test_night_rest_violation() {
    let params = ScheduleParameters::new(1, 3, 3);
    let roster = roster_from_rows(&[&[N, D, O]]);

    let violations = validate_roster(&params, &roster).unwrap_err();
    assert_eq!(kinds(&violations), vec![ViolationKind::NightRest]);
}

#[test]
fn test_night_on_last_day_is_allowed() {
    let params = ScheduleParameters::new(1, 2, 3);
    let roster = roster_from_rows(&[&[O, N]]);

    assert_eq!(validate_roster(&params, &roster), Ok(()));
}

#[test]
fn test_consecutive_work_violation() {
    let params = ScheduleParameters::new(1, 5, 3);
    let roster = roster_from_rows(&[&[D, D, D, D, O]]);

    let violations = validate_roster(&params, &roster).unwrap_err();
    assert_eq!(kinds(&violations), vec![ViolationKind::ConsecutiveWork]);
}

#[test]
fn test_short_horizon_has_no_window() {
    let params = ScheduleParameters::new(1, 3, 3);
    let roster = roster_from_rows(&[&[D, D, D]]);

    assert_eq!(validate_roster(&params, &roster), Ok(()));
}

#[test]
fn test_unbounded_consecutive_limit() {
    let params = ScheduleParameters::new(1, 4, usize::MAX);
    let roster = roster_from_rows(&[&[D, D, D, D]]);

    assert_eq!(validate_roster(&params, &roster), Ok(()));
}

#[test]
fn test_empty_roster() {
    let params = ScheduleParameters::new(0, 0, 3);
    let roster = Roster::from_fn(0, 0, |_, _| O);

    assert!(roster.is_empty());
    assert_eq!(validate_roster(&params, &roster), Ok(()));
}
