//! End-to-end scenarios: build, solve and re-validate every returned roster.

use shiftforge::prelude::*;
use shiftforge::report::staffing_audit;
use shiftforge_config::ValueSelectionType;
use shiftforge_test::{
    assert_valid_roster, default_parameters, holiday_shortage_scenario, night_rest_scenario,
    scenario_a, scenario_b, window_scenario,
};

fn solve_roster(params: &ScheduleParameters, solver: &impl ConstraintSolver) -> Roster {
    let model = ShiftModel::build(params).unwrap();
    let outcome = solve(solver, &model).unwrap();
    assert!(
        outcome.result.is_success(),
        "expected a roster, got {}",
        outcome.result.status()
    );
    let roster = outcome.result.into_roster().unwrap();
    assert_valid_roster(params, &roster);
    roster
}

#[test]
fn scenario_a_honors_holidays() {
    let params = scenario_a();
    let roster = solve_roster(&params, &BacktrackingSolver::new());

    assert_eq!(roster.shift(Employee::new(0), Day::new(0)), ShiftKind::Off);
    assert_eq!(roster.shift(Employee::new(1), Day::new(2)), ShiftKind::Off);
    for day in params.days() {
        assert_eq!(roster.count(day, ShiftKind::Day), 1);
        assert_eq!(roster.count(day, ShiftKind::Night), 1);
    }
}

#[test]
fn scenario_b_fails_before_solving() {
    let err = ShiftModel::build(&scenario_b()).unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "Configuration error: DAY on day 0 requires 4 employees but only 3 exist"
    );
}

#[test]
fn scenario_c_night_is_followed_by_rest() {
    let params = night_rest_scenario();
    for seed in 0..5 {
        let solver = BacktrackingSolver::new()
            .with_value_selection(ValueSelectionType::Random)
            .with_random_seed(seed);
        let roster = solve_roster(&params, &solver);

        for employee in params.employees() {
            for day in params.days().take(params.num_days - 1) {
                if roster.shift(employee, day) == ShiftKind::Night {
                    assert_eq!(roster.shift(employee, day.next()), ShiftKind::Off);
                }
            }
        }
    }
}

#[test]
fn scenario_d_forces_rest_inside_window() {
    let params = window_scenario();
    let roster = solve_roster(&params, &BacktrackingSolver::new());

    // Employee 1 is on holiday for days 0-2, so employee 0 covers them.
    for d in 0..3 {
        assert_eq!(roster.shift(Employee::new(0), Day::new(d)), ShiftKind::Day);
    }
    assert_eq!(roster.shift(Employee::new(0), Day::new(3)), ShiftKind::Off);
    assert_eq!(roster.shift(Employee::new(1), Day::new(3)), ShiftKind::Day);
}

#[test]
fn every_window_has_a_rest_day() {
    let params = default_parameters();
    let roster = solve_roster(&params, &BacktrackingSolver::new());
    let k = params.max_consecutive_work_days;

    for employee in params.employees() {
        let shifts = roster.employee_shifts(employee);
        for window in shifts.windows(k + 1) {
            assert!(window.iter().any(|s| !s.is_work()));
        }
    }
}

#[test]
fn reference_instance_is_fully_staffed() {
    let params = default_parameters();
    let roster = solve_roster(&params, &BacktrackingSolver::new());

    let audit = staffing_audit(&params, &roster);
    assert_eq!(audit.len(), 60);
    assert!(audit.iter().all(|entry| entry.is_met()));
}

#[test]
fn empty_roster_is_optimal() {
    for params in [
        ScheduleParameters::new(0, 30, 3),
        ScheduleParameters::new(25, 0, 3),
    ] {
        let model = ShiftModel::build(&params).unwrap();
        let outcome = solve(&BacktrackingSolver::new(), &model).unwrap();

        assert_eq!(outcome.result.status(), ScheduleStatus::Optimal);
        assert!(outcome.result.roster().unwrap().is_empty());
    }
}

#[test]
fn solving_twice_yields_valid_rosters() {
    let params = scenario_a();
    let config = SolverConfig::new().with_environment_mode(EnvironmentMode::FullAssert);

    let first = generate_schedule(&params, &config).unwrap();
    let second = generate_schedule(&params, &config).unwrap();
    assert!(first.success);
    assert!(second.success);
    assert_eq!(first.status, second.status);
}

#[test]
fn random_value_selection_stays_valid() {
    let params = scenario_a();
    for seed in 0..10 {
        let solver = BacktrackingSolver::new()
            .with_value_selection(ValueSelectionType::Random)
            .with_random_seed(seed);
        solve_roster(&params, &solver);
    }
}

#[test]
fn min_value_first_stays_valid() {
    let params = default_parameters();
    let solver = BacktrackingSolver::new().with_value_selection(ValueSelectionType::MinValueFirst);
    solve_roster(&params, &solver);
}

#[test]
fn holiday_conflict_is_infeasible_not_an_error() {
    // The only employee is needed every day but asks for day 1 off.
    let params = ScheduleParameters::new(1, 3, 3)
        .with_requirements(StaffingRequirements::uniform(3, &[(ShiftKind::Day, 1)]))
        .with_holiday_requests(HolidayRequests::new().with_request(Employee::new(0), Day::new(1)));

    let model = ShiftModel::build(&params).unwrap();
    let outcome = solve(&BacktrackingSolver::new(), &model).unwrap();
    assert_eq!(outcome.result, SolveResult::Infeasible);
}

#[test]
fn consecutive_limit_can_make_horizon_infeasible() {
    // One employee must work 5 days straight with at most 3 allowed.
    let params = ScheduleParameters::new(1, 5, 3)
        .with_requirements(StaffingRequirements::uniform(5, &[(ShiftKind::Day, 1)]));

    let response = generate_schedule(&params, &SolverConfig::default()).unwrap();
    assert!(!response.success);
    assert_eq!(response.status, ScheduleStatus::Infeasible);
}

#[test]
fn last_day_shortage_is_proven_infeasible() {
    // A time limit turns a runaway search into UNKNOWN rather than a hang.
    let config = SolverConfig::new().with_termination_seconds(60);
    for num_days in [10, 30] {
        let params = holiday_shortage_scenario(num_days);
        let response = generate_schedule(&params, &config).unwrap();

        assert!(!response.success);
        assert_eq!(response.status, ScheduleStatus::Infeasible, "{num_days} days");
    }
}

#[test]
fn last_day_shortage_is_infeasible_for_every_value_order() {
    let params = holiday_shortage_scenario(10);
    for value_selection in [ValueSelectionType::MinValueFirst, ValueSelectionType::Random] {
        let solver = BacktrackingSolver::new()
            .with_value_selection(value_selection)
            .with_random_seed(7);
        let model = ShiftModel::build(&params).unwrap();
        let outcome = solve(&solver, &model).unwrap();
        assert_eq!(outcome.result, SolveResult::Infeasible);
    }
}

#[test]
fn unbounded_consecutive_limit_solves() {
    let params = ScheduleParameters::new(2, 3, usize::MAX)
        .with_requirements(StaffingRequirements::uniform(3, &[(ShiftKind::Day, 1)]));

    let response = generate_schedule(&params, &SolverConfig::default()).unwrap();
    assert!(response.success);
    assert_eq!(response.status, ScheduleStatus::Optimal);
}

#[test]
fn config_file_drives_a_solve() {
    let app = shiftforge_config::AppConfig::from_toml_str(
        r#"
        [solver]
        environment_mode = "full_assert"

        [solver.termination]
        seconds_spent_limit = 30

        [schedule]
        num_employees = 3
        num_days = 5
        max_consecutive_work_days = 3
        staffing = [
            { shift = "DAY", headcount = 1 },
            { shift = "NIGHT", headcount = 1 },
        ]
        holidays = [
            { employee = 0, day = 0 },
            { employee = 1, day = 2 },
        ]
        "#,
    )
    .unwrap();
    let params = app.schedule.to_parameters().unwrap();
    assert_eq!(params, scenario_a());

    let response = generate_schedule(&params, &app.solver).unwrap();
    assert!(response.success);
}
