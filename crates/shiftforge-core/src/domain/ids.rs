//! Employee and day identifiers.

use std::fmt;

/// An employee, identified by its index in `[0, num_employees)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Employee(usize);

impl Employee {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Employee(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day of the planning horizon, identified by its index in `[0, num_days)`.
///
/// Days are ordered and contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Day(usize);

impl Day {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Day(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns the following day.
    #[inline]
    pub const fn next(self) -> Self {
        Day(self.0 + 1)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
