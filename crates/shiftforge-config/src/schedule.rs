//! File-backed schedule parameters and the demo application config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shiftforge_core::{
    Day, Employee, HolidayRequests, ScheduleParameters, ShiftKind, StaffingRequirements,
    MAX_ROSTER_CELLS,
};

use crate::{ConfigError, SolverConfig};

const DEFAULT_NUM_EMPLOYEES: usize = 25;
const DEFAULT_NUM_DAYS: usize = 30;
const DEFAULT_MAX_CONSECUTIVE_WORK_DAYS: usize = 3;

/// Schedule parameters as they appear in a config file or request body.
///
/// # Examples
///
/// ```
/// use shiftforge_config::ScheduleConfig;
///
/// let config = ScheduleConfig::from_toml_str(r#"
///     num_employees = 3
///     num_days = 5
///     max_consecutive_work_days = 3
///
///     [[staffing]]
///     shift = "DAY"
///     headcount = 1
///
///     [[staffing]]
///     day = 4
///     shift = "NIGHT"
///     headcount = 2
///
///     [[holidays]]
///     employee = 0
///     day = 0
/// "#).unwrap();
///
/// let params = config.to_parameters().unwrap();
/// assert_eq!(params.requirements.len(), 6);
/// assert_eq!(params.holiday_requests.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleConfig {
    pub num_employees: usize,
    pub num_days: usize,
    pub max_consecutive_work_days: usize,

    /// Staffing entries, applied in order.
    #[serde(default)]
    pub staffing: Vec<StaffingEntry>,

    /// Holiday requests.
    #[serde(default)]
    pub holidays: Vec<HolidayEntry>,
}

/// Required headcount for one shift kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StaffingEntry {
    /// Day the entry applies to; every day of the horizon when absent.
    #[serde(default)]
    pub day: Option<usize>,
    pub shift: ShiftKind,
    pub headcount: usize,
}

/// A request for one employee to be off on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HolidayEntry {
    pub employee: usize,
    pub day: usize,
}

impl Default for ScheduleConfig {
    /// 25 employees over 30 days, one DAY and one NIGHT per day, employee 0
    /// off on day 0, employee 1 off on day 2, at most 3 consecutive work days.
    fn default() -> Self {
        Self {
            num_employees: DEFAULT_NUM_EMPLOYEES,
            num_days: DEFAULT_NUM_DAYS,
            max_consecutive_work_days: DEFAULT_MAX_CONSECUTIVE_WORK_DAYS,
            staffing: vec![
                StaffingEntry {
                    day: None,
                    shift: ShiftKind::Day,
                    headcount: 1,
                },
                StaffingEntry {
                    day: None,
                    shift: ShiftKind::Night,
                    headcount: 1,
                },
            ],
            holidays: vec![
                HolidayEntry {
                    employee: 0,
                    day: 0,
                },
                HolidayEntry {
                    employee: 1,
                    day: 2,
                },
            ],
        }
    }
}

impl ScheduleConfig {
    /// Loads schedule parameters from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses schedule parameters from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Parses schedule parameters from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Converts into the parameters consumed by the model builder.
    ///
    /// Staffing entries without a day expand to every day of the horizon; a
    /// later entry for the same (day, shift) replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the roster exceeds
    /// [`MAX_ROSTER_CELLS`] cells, or when an entry names a day or employee
    /// outside the horizon or roster.
    pub fn to_parameters(&self) -> Result<ScheduleParameters, ConfigError> {
        let within_limit = self
            .num_employees
            .checked_mul(self.num_days)
            .is_some_and(|cells| cells <= MAX_ROSTER_CELLS);
        if !within_limit {
            return Err(ConfigError::Invalid(format!(
                "a {}x{} roster exceeds the limit of {} cells",
                self.num_employees, self.num_days, MAX_ROSTER_CELLS
            )));
        }

        let mut requirements = StaffingRequirements::new();
        for entry in &self.staffing {
            match entry.day {
                Some(d) if d >= self.num_days => {
                    return Err(ConfigError::Invalid(format!(
                        "staffing entry for {} names day {} outside a {}-day horizon",
                        entry.shift, d, self.num_days
                    )));
                }
                Some(d) => {
                    requirements.set(Day::new(d), entry.shift, entry.headcount);
                }
                None => {
                    for d in 0..self.num_days {
                        requirements.set(Day::new(d), entry.shift, entry.headcount);
                    }
                }
            }
        }

        let mut holiday_requests = HolidayRequests::new();
        for entry in &self.holidays {
            if entry.employee >= self.num_employees || entry.day >= self.num_days {
                return Err(ConfigError::Invalid(format!(
                    "holiday request ({}, {}) outside a {}x{} roster",
                    entry.employee, entry.day, self.num_employees, self.num_days
                )));
            }
            holiday_requests.set(Employee::new(entry.employee), Day::new(entry.day), true);
        }

        Ok(
            ScheduleParameters::new(
                self.num_employees,
                self.num_days,
                self.max_consecutive_work_days,
            )
            .with_requirements(requirements)
            .with_holiday_requests(holiday_requests),
        )
    }
}

/// HTTP server settings for the demo service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Top-level config file of the scheduling service.
///
/// # Examples
///
/// ```
/// use shiftforge_config::AppConfig;
///
/// let config = AppConfig::from_toml_str(r#"
///     [solver.termination]
///     seconds_spent_limit = 10
///
///     [schedule]
///     num_employees = 4
///     num_days = 7
///     max_consecutive_work_days = 5
/// "#).unwrap();
///
/// assert_eq!(config.schedule.num_employees, 4);
/// assert_eq!(config.server.bind, "0.0.0.0:8080");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default)]
    pub solver: SolverConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Loads the application config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses the application config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}
