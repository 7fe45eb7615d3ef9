//! Domain Parameters fixtures.

use shiftforge_core::{
    Day, Employee, HolidayRequests, ScheduleParameters, ShiftKind, StaffingRequirements,
};

/// 3 employees, 5 days, 1 DAY + 1 NIGHT per day, holidays (0, 0) and
/// (1, 2), at most 3 consecutive work days.
pub fn scenario_a() -> ScheduleParameters {
    ScheduleParameters::new(3, 5, 3)
        .with_requirements(StaffingRequirements::uniform(
            5,
            &[(ShiftKind::Day, 1), (ShiftKind::Night, 1)],
        ))
        .with_holiday_requests(
            HolidayRequests::new()
                .with_request(Employee::new(0), Day::new(0))
                .with_request(Employee::new(1), Day::new(2)),
        )
}

/// [`scenario_a`] with 4 DAY staff per day: more than the roster holds.
pub fn scenario_b() -> ScheduleParameters {
    let mut params = scenario_a();
    params.requirements = StaffingRequirements::uniform(
        5,
        &[(ShiftKind::Day, 4), (ShiftKind::Night, 1)],
    );
    params
}

/// 4 employees, 6 days, 1 DAY + 1 NIGHT per day; every night worker has to
/// be rotated out the following day.
pub fn night_rest_scenario() -> ScheduleParameters {
    ScheduleParameters::new(4, 6, 3).with_requirements(StaffingRequirements::uniform(
        6,
        &[(ShiftKind::Day, 1), (ShiftKind::Night, 1)],
    ))
}

/// 2 employees, 4 days, 1 DAY per day, employee 1 off on days 0 to 2.
///
/// Employee 0 covers the first three days alone and so must be off on day 3.
pub fn window_scenario() -> ScheduleParameters {
    let holidays = (0..3).fold(HolidayRequests::new(), |requests, d| {
        requests.with_request(Employee::new(1), Day::new(d))
    });
    ScheduleParameters::new(2, 4, 3)
        .with_requirements(StaffingRequirements::uniform(4, &[(ShiftKind::Day, 1)]))
        .with_holiday_requests(holidays)
}

/// 6 employees, 2 DAY + 2 NIGHT per day, at most 3 consecutive work days,
/// employees 0 to 2 off on the last day.
///
/// The last day needs four workers but only three are left, so no roster
/// exists. Every earlier day is individually satisfiable.
pub fn holiday_shortage_scenario(num_days: usize) -> ScheduleParameters {
    let last_day = Day::new(num_days.saturating_sub(1));
    let holidays = (0..3).fold(HolidayRequests::new(), |requests, e| {
        requests.with_request(Employee::new(e), last_day)
    });
    ScheduleParameters::new(6, num_days, 3)
        .with_requirements(StaffingRequirements::uniform(
            num_days,
            &[(ShiftKind::Day, 2), (ShiftKind::Night, 2)],
        ))
        .with_holiday_requests(holidays)
}

/// The built-in reference instance: 25 employees, 30 days, 1 DAY + 1 NIGHT
/// per day, holidays (0, 0) and (1, 2), at most 3 consecutive work days.
pub fn default_parameters() -> ScheduleParameters {
    ScheduleParameters::new(25, 30, 3)
        .with_requirements(StaffingRequirements::uniform(
            30,
            &[(ShiftKind::Day, 1), (ShiftKind::Night, 1)],
        ))
        .with_holiday_requests(
            HolidayRequests::new()
                .with_request(Employee::new(0), Day::new(0))
                .with_request(Employee::new(1), Day::new(2)),
        )
}
