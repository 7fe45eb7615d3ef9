//! Solved rosters.

use super::{Day, Employee, ShiftKind};

/// One shift kind per (employee, day).
///
/// Built once from a solver assignment and read-only afterwards. Stored
/// employee-major, so `shifts[e * num_days + d]` is employee `e` on day `d`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Roster {
    num_employees: usize,
    num_days: usize,
    shifts: Vec<ShiftKind>,
}

impl Roster {
    /// Builds a roster by asking `shift_of` for every (employee, day).
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftforge_core::{Day, Employee, Roster, ShiftKind};
    ///
    /// let roster = Roster::from_fn(2, 3, |e, _| {
    ///     if e.index() == 0 { ShiftKind::Day } else { ShiftKind::Off }
    /// });
    /// assert_eq!(roster.shift(Employee::new(0), Day::new(2)), ShiftKind::Day);
    /// assert_eq!(roster.count(Day::new(1), ShiftKind::Off), 1);
    /// ```
    pub fn from_fn<F>(num_employees: usize, num_days: usize, mut shift_of: F) -> Self
    where
        F: FnMut(Employee, Day) -> ShiftKind,
    {
        let mut shifts = Vec::with_capacity(num_employees * num_days);
        for e in 0..num_employees {
            for d in 0..num_days {
                shifts.push(shift_of(Employee::new(e), Day::new(d)));
            }
        }
        Self {
            num_employees,
            num_days,
            shifts,
        }
    }

    pub fn num_employees(&self) -> usize {
        self.num_employees
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    /// Returns true when the roster has no (employee, day) cells.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Returns the shift kind of `employee` on `day`.
    ///
    /// # Panics
    ///
    /// Panics if either index lies outside the roster.
    pub fn shift(&self, employee: Employee, day: Day) -> ShiftKind {
        assert!(
            employee.index() < self.num_employees && day.index() < self.num_days,
            "({}, {}) outside a {}x{} roster",
            employee,
            day,
            self.num_employees,
            self.num_days
        );
        self.shifts[employee.index() * self.num_days + day.index()]
    }

    pub fn get(&self, employee: Employee, day: Day) -> Option<ShiftKind> {
        if employee.index() < self.num_employees && day.index() < self.num_days {
            Some(self.shifts[employee.index() * self.num_days + day.index()])
        } else {
            None
        }
    }

    /// Employees assigned `shift` on `day`, in index order.
    pub fn employees_on(&self, day: Day, shift: ShiftKind) -> Vec<Employee> {
        (0..self.num_employees)
            .map(Employee::new)
            .filter(|&e| self.shift(e, day) == shift)
            .collect()
    }

    pub fn count(&self, day: Day, shift: ShiftKind) -> usize {
        (0..self.num_employees)
            .filter(|&e| self.shift(Employee::new(e), day) == shift)
            .count()
    }

    /// The shifts of one employee across the horizon.
    pub fn employee_shifts(&self, employee: Employee) -> &[ShiftKind] {
        let start = employee.index() * self.num_days;
        &self.shifts[start..start + self.num_days]
    }
}
