//! Shared test fixtures for ShiftForge crates.
//!
//! - [`scenario`] - Domain Parameters for the reference scenarios
//! - [`roster`] - Rosters written as text rows, and invariant assertions
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! shiftforge-test = { workspace = true }
//! ```
//!
//! ```
//! use shiftforge_test::{roster_from_rows, scenario_a};
//!
//! let params = scenario_a();
//! let roster = roster_from_rows(&["ODNOD", "DNODN", "NODNO"]);
//! assert_eq!(roster.num_employees(), params.num_employees);
//! ```

pub mod roster;
pub mod scenario;

pub use roster::{assert_valid_roster, roster_from_rows};
pub use scenario::{
    default_parameters, holiday_shortage_scenario, night_rest_scenario, scenario_a, scenario_b,
    window_scenario,
};
