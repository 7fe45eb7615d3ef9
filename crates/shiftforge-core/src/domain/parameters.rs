//! Schedule parameters for a single solve.

use std::collections::BTreeMap;

use super::{Day, Employee, ShiftKind};

/// Required headcount per (day, work shift kind).
///
/// A missing entry means the pair is unconstrained, not that zero employees
/// are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffingRequirements {
    entries: BTreeMap<(Day, ShiftKind), usize>,
}

impl StaffingRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the same headcounts on every day of the horizon.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftforge_core::{Day, ShiftKind, StaffingRequirements};
    ///
    /// let req = StaffingRequirements::uniform(5, &[(ShiftKind::Day, 1), (ShiftKind::Night, 1)]);
    /// assert_eq!(req.len(), 10);
    /// assert_eq!(req.get(Day::new(4), ShiftKind::Night), Some(1));
    /// assert_eq!(req.get(Day::new(5), ShiftKind::Night), None);
    /// ```
    pub fn uniform(num_days: usize, per_day: &[(ShiftKind, usize)]) -> Self {
        let mut requirements = Self::new();
        for d in 0..num_days {
            for &(shift, headcount) in per_day {
                requirements.set(Day::new(d), shift, headcount);
            }
        }
        requirements
    }

    /// Sets the headcount for one (day, shift) pair, returning the previous one.
    pub fn set(&mut self, day: Day, shift: ShiftKind, headcount: usize) -> Option<usize> {
        self.entries.insert((day, shift), headcount)
    }

    pub fn with(mut self, day: Day, shift: ShiftKind, headcount: usize) -> Self {
        self.set(day, shift, headcount);
        self
    }

    pub fn get(&self, day: Day, shift: ShiftKind) -> Option<usize> {
        self.entries.get(&(day, shift)).copied()
    }

    /// Iterates entries in (day, shift) order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, ShiftKind, usize)> + '_ {
        self.entries
            .iter()
            .map(|(&(day, shift), &headcount)| (day, shift, headcount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Holiday requests per (employee, day).
///
/// A request is hard: a requested day is always `Off`. Entries stored as
/// `false` are kept but impose nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayRequests {
    entries: BTreeMap<(Employee, Day), bool>,
}

impl HolidayRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, employee: Employee, day: Day, requested: bool) {
        self.entries.insert((employee, day), requested);
    }

    /// Adds a request for `employee` to be off on `day`.
    pub fn with_request(mut self, employee: Employee, day: Day) -> Self {
        self.set(employee, day, true);
        self
    }

    pub fn is_requested(&self, employee: Employee, day: Day) -> bool {
        self.entries.get(&(employee, day)).copied().unwrap_or(false)
    }

    /// Iterates the (employee, day) pairs marked as requested.
    pub fn requested(&self) -> impl Iterator<Item = (Employee, Day)> + '_ {
        self.entries
            .iter()
            .filter(|(_, &requested)| requested)
            .map(|(&key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the model builder needs for one solve.
///
/// Largest number of (employee, day) cells a single solve accepts.
pub const MAX_ROSTER_CELLS: usize = 100_000;

/// Passed by reference into each request; nothing here is process-wide.
///
/// # Examples
///
/// ```
/// use shiftforge_core::{Day, Employee, HolidayRequests, ScheduleParameters, ShiftKind, StaffingRequirements};
///
/// let params = ScheduleParameters::new(3, 5, 3)
///     .with_requirements(StaffingRequirements::uniform(5, &[(ShiftKind::Day, 1)]))
///     .with_holiday_requests(HolidayRequests::new().with_request(Employee::new(0), Day::new(0)));
///
/// assert_eq!(params.employees().count(), 3);
/// assert_eq!(params.days().last(), Some(Day::new(4)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleParameters {
    pub num_employees: usize,
    pub num_days: usize,
    pub requirements: StaffingRequirements,
    pub holiday_requests: HolidayRequests,
    /// No employee works more than this many consecutive days.
    pub max_consecutive_work_days: usize,
}

impl ScheduleParameters {
    /// Creates parameters without staffing requirements or holiday requests.
    pub fn new(num_employees: usize, num_days: usize, max_consecutive_work_days: usize) -> Self {
        Self {
            num_employees,
            num_days,
            requirements: StaffingRequirements::new(),
            holiday_requests: HolidayRequests::new(),
            max_consecutive_work_days,
        }
    }

    pub fn with_requirements(mut self, requirements: StaffingRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_holiday_requests(mut self, holiday_requests: HolidayRequests) -> Self {
        self.holiday_requests = holiday_requests;
        self
    }

    pub fn employees(&self) -> impl Iterator<Item = Employee> {
        (0..self.num_employees).map(Employee::new)
    }

    pub fn days(&self) -> impl Iterator<Item = Day> {
        (0..self.num_days).map(Day::new)
    }

    pub fn contains_employee(&self, employee: Employee) -> bool {
        employee.index() < self.num_employees
    }

    pub fn contains_day(&self, day: Day) -> bool {
        day.index() < self.num_days
    }

    /// Number of (employee, day) cells, or `None` on overflow.
    pub fn roster_cells(&self) -> Option<usize> {
        self.num_employees.checked_mul(self.num_days)
    }

    /// Whether the roster fits within [`MAX_ROSTER_CELLS`].
    pub fn is_within_size_limit(&self) -> bool {
        self.roster_cells().is_some_and(|cells| cells <= MAX_ROSTER_CELLS)
    }
}
