//! Roster fixtures and assertions.

use shiftforge_core::{validate_roster, Day, Employee, Roster, ScheduleParameters, ShiftKind};

/// Builds a roster from one text row per employee, one character per day:
/// `O` off, `D` day shift, `N` night shift.
///
/// # Panics
///
/// Panics on ragged rows or unknown characters.
pub fn roster_from_rows(rows: &[&str]) -> Roster {
    let num_days = rows.first().map_or(0, |row| row.len());
    assert!(
        rows.iter().all(|row| row.len() == num_days),
        "rows must all have {num_days} days"
    );
    Roster::from_fn(rows.len(), num_days, |e: Employee, d: Day| {
        match rows[e.index()].as_bytes()[d.index()] {
            b'O' => ShiftKind::Off,
            b'D' => ShiftKind::Day,
            b'N' => ShiftKind::Night,
            other => panic!("unknown shift '{}'", other as char),
        }
    })
}

/// Asserts that `roster` satisfies every roster invariant for `params`.
///
/// # Panics
///
/// Panics listing each violation.
pub fn assert_valid_roster(params: &ScheduleParameters, roster: &Roster) {
    if let Err(violations) = validate_roster(params, roster) {
        let messages: Vec<String> = violations.iter().map(|v| v.message.clone()).collect();
        panic!("roster violates {} rule(s):\n{}", messages.len(), messages.join("\n"));
    }
}
