//! Shift kinds.

use std::fmt;

/// A mutually exclusive category of one employee's status on one day.
///
/// `Off` is the only non-work category; the work categories are listed in
/// [`ShiftKind::WORK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ShiftKind {
    Off,
    Day,
    Night,
}

impl ShiftKind {
    /// Every shift kind, in order.
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Off, ShiftKind::Day, ShiftKind::Night];

    /// The work categories, in order.
    pub const WORK: [ShiftKind; 2] = [ShiftKind::Day, ShiftKind::Night];

    /// Returns true for every category other than `Off`.
    #[inline]
    pub const fn is_work(self) -> bool {
        !matches!(self, ShiftKind::Off)
    }

    /// Position of this kind within [`ShiftKind::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            ShiftKind::Off => 0,
            ShiftKind::Day => 1,
            ShiftKind::Night => 2,
        }
    }

    /// Human-readable name used in roster listings.
    pub const fn display_name(self) -> &'static str {
        match self {
            ShiftKind::Off => "Day Off",
            ShiftKind::Day => "Day Shift",
            ShiftKind::Night => "Night Shift",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ShiftKind::Off => "OFF",
            ShiftKind::Day => "DAY",
            ShiftKind::Night => "NIGHT",
        };
        f.write_str(label)
    }
}
