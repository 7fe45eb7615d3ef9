//! Model Builder: translates [`ScheduleParameters`] into a [`CpModel`].
//!
//! One boolean per (employee, day, shift kind), plus five constraint
//! families:
//!
//! 1. exactly one shift kind per (employee, day)
//! 2. exact headcount per required (day, work kind)
//! 3. holiday requests fix `OFF`
//! 4. `NIGHT` on day d forces `OFF` on day d+1
//! 5. at most K work days in every window of K+1 consecutive days
//!
//! Building is a pure function of the parameters. Configuration errors are
//! reported here and never reach the solver.

use shiftforge_core::{
    Day, Employee, HolidayRequests, Result, ScheduleParameters, ShiftForgeError, ShiftKind,
    StaffingRequirements, MAX_ROSTER_CELLS,
};
use shiftforge_solver::{BoolVar, CpModel, LinearExpr};
use tracing::info;

/// The assignment variables of one model.
///
/// Auxiliary variables added by the constraint families are not part of it,
/// so nothing downstream can observe them.
#[derive(Debug, Clone)]
pub struct ShiftVariables {
    num_employees: usize,
    num_days: usize,
    // Employee-major: (e, d, s).
    vars: Vec<BoolVar>,
}

impl ShiftVariables {
    pub fn num_employees(&self) -> usize {
        self.num_employees
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn contains(&self, employee: Employee, day: Day) -> bool {
        employee.index() < self.num_employees && day.index() < self.num_days
    }

    /// The variable for (employee, day, shift).
    ///
    /// # Panics
    ///
    /// Panics if the employee or day is out of range.
    pub fn get(&self, employee: Employee, day: Day, shift: ShiftKind) -> BoolVar {
        assert!(
            self.contains(employee, day),
            "({employee}, {day}) outside {}x{}",
            self.num_employees,
            self.num_days
        );
        let cell = employee.index() * self.num_days + day.index();
        self.vars[cell * ShiftKind::ALL.len() + shift.index()]
    }

    /// The shift-kind variables of one (employee, day), in [`ShiftKind::ALL`] order.
    pub fn cell(&self, employee: Employee, day: Day) -> [BoolVar; 3] {
        ShiftKind::ALL.map(|shift| self.get(employee, day, shift))
    }

    /// Every variable ordered by day, then employee, then shift kind.
    pub fn day_major(&self) -> Vec<BoolVar> {
        let mut order = Vec::with_capacity(self.vars.len());
        for d in 0..self.num_days {
            for e in 0..self.num_employees {
                order.extend(self.cell(Employee::new(e), Day::new(d)));
            }
        }
        order
    }

    fn employees(&self) -> impl Iterator<Item = Employee> {
        (0..self.num_employees).map(Employee::new)
    }

    fn days(&self) -> impl Iterator<Item = Day> {
        (0..self.num_days).map(Day::new)
    }
}

/// Allocates one boolean per (employee, day, shift kind).
///
/// Zero employees or zero days give an empty variable space. Rosters above
/// [`MAX_ROSTER_CELLS`] cells are a configuration error.
pub fn build_variables(
    model: &mut CpModel,
    params: &ScheduleParameters,
) -> Result<ShiftVariables> {
    let (num_employees, num_days) = (params.num_employees, params.num_days);
    let capacity = params
        .roster_cells()
        .filter(|&cells| cells <= MAX_ROSTER_CELLS)
        .and_then(|cells| cells.checked_mul(ShiftKind::ALL.len()))
        .ok_or_else(|| {
            ShiftForgeError::Config(format!(
                "a {num_employees}x{num_days} roster exceeds the limit of {MAX_ROSTER_CELLS} cells"
            ))
        })?;
    let mut vars = Vec::with_capacity(capacity);
    for e in 0..num_employees {
        for d in 0..num_days {
            for shift in ShiftKind::ALL {
                vars.push(model.new_bool_var(format!("shift_e{e}_d{d}_s{}", shift.index())));
            }
        }
    }
    Ok(ShiftVariables {
        num_employees,
        num_days,
        vars,
    })
}

pub fn add_exactly_one_shift_per_day(model: &mut CpModel, vars: &ShiftVariables) {
    for e in vars.employees() {
        for d in vars.days() {
            model.add_exactly_one(vars.cell(e, d));
        }
    }
}

/// Requires the exact headcount for every (day, work kind) in `requirements`.
///
/// Absent entries stay unconstrained.
///
/// # Errors
///
/// Fails on a non-work shift kind, a day outside the horizon, or a headcount
/// larger than the roster.
pub fn add_staffing_requirements(
    model: &mut CpModel,
    vars: &ShiftVariables,
    requirements: &StaffingRequirements,
) -> Result<()> {
    for (day, shift, headcount) in requirements.iter() {
        if !shift.is_work() {
            return Err(ShiftForgeError::NonWorkRequirement { day, shift });
        }
        if day.index() >= vars.num_days {
            return Err(ShiftForgeError::Config(format!(
                "staffing requirement for {shift} on day {day} is outside the {}-day horizon",
                vars.num_days
            )));
        }
        if headcount > vars.num_employees {
            return Err(ShiftForgeError::RequirementExceedsRoster {
                day,
                shift,
                required: headcount,
                available: vars.num_employees,
            });
        }

        let assigned = LinearExpr::sum(vars.employees().map(|e| vars.get(e, day, shift)));
        model.add_eq(assigned, headcount as i64);
    }
    Ok(())
}

/// Fixes `OFF` for every requested (employee, day).
///
/// # Errors
///
/// Fails on a request outside the roster or horizon.
pub fn add_holiday_requests(
    model: &mut CpModel,
    vars: &ShiftVariables,
    requests: &HolidayRequests,
) -> Result<()> {
    for (employee, day) in requests.requested() {
        if !vars.contains(employee, day) {
            return Err(ShiftForgeError::Config(format!(
                "holiday request for employee {employee} on day {day} is outside the {}x{} roster",
                vars.num_employees, vars.num_days
            )));
        }
        model.add_fixed(vars.get(employee, day, ShiftKind::Off), true);
    }
    Ok(())
}

/// `NIGHT` on day d implies `OFF` on day d+1. The converse is not implied.
pub fn add_night_rest_rule(model: &mut CpModel, vars: &ShiftVariables) {
    for e in vars.employees() {
        for d in vars.days().take(vars.num_days.saturating_sub(1)) {
            model.add_implication(
                vars.get(e, d, ShiftKind::Night),
                vars.get(e, d.next(), ShiftKind::Off),
            );
        }
    }
}

/// Bounds every window of `max_days + 1` consecutive days to at most
/// `max_days` work days.
///
/// Each window gets its own "is working" flag per day, tied to the day's
/// work-kind variables. A horizon of `max_days` days or fewer has no window.
pub fn add_consecutive_work_limit(model: &mut CpModel, vars: &ShiftVariables, max_days: usize) {
    if vars.num_days <= max_days {
        return;
    }
    let window_len = max_days + 1;
    for e in vars.employees() {
        for start in 0..vars.num_days - max_days {
            let mut flags = Vec::with_capacity(window_len);
            for day in (start..start + window_len).map(Day::new) {
                let working = model.new_bool_var(format!("e{}_d{}_is_working", e, day));
                let work_vars = ShiftKind::WORK.map(|shift| vars.get(e, day, shift));
                model.add_eq(LinearExpr::sum(work_vars).minus(working), 0);
                flags.push(working);
            }
            model.add_le(LinearExpr::sum(flags), max_days as i64);
        }
    }
}

/// A built constraint model and its assignment variables.
#[derive(Debug, Clone)]
pub struct ShiftModel {
    pub(crate) model: CpModel,
    pub(crate) variables: ShiftVariables,
}

impl ShiftModel {
    /// Builds the full model for `params`.
    ///
    /// Branching visits days in order and, within a day, employees in order,
    /// trying each shift kind in turn.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for requirements or requests the
    /// parameters cannot express.
    pub fn build(params: &ScheduleParameters) -> Result<Self> {
        let mut model = CpModel::new("shift_scheduling");
        let variables = build_variables(&mut model, params)?;

        add_exactly_one_shift_per_day(&mut model, &variables);
        add_staffing_requirements(&mut model, &variables, &params.requirements)?;
        add_holiday_requests(&mut model, &variables, &params.holiday_requests)?;
        add_night_rest_rule(&mut model, &variables);
        add_consecutive_work_limit(&mut model, &variables, params.max_consecutive_work_days);
        model.add_decision_strategy(variables.day_major());

        info!(
            event = "model_built",
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            employees = params.num_employees,
            days = params.num_days,
        );

        Ok(Self { model, variables })
    }

    pub fn model(&self) -> &CpModel {
        &self.model
    }

    pub fn variables(&self) -> &ShiftVariables {
        &self.variables
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
