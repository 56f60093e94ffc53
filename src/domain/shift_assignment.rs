//! Bulk shift assignment over the employee roster.
//!
//! Assigning a shift to a set of employees over a date range drops any of
//! their existing assignments whose range intersects the new one, even
//! partially, and appends the new assignment. The drop-wholesale policy is
//! deliberate: overlapping old assignments are removed, never clipped to
//! the non-overlapping remainder.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{employee::Employee, shift::ShiftAssignment};

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    /// Precondition failure: empty target set, empty shift id, or an
    /// inverted date range. The roster is left untouched.
    #[error("invalid assignment request: {reason}")]
    InvalidAssignmentRequest { reason: String },
}

fn invalid(reason: &str) -> AssignmentError {
    AssignmentError::InvalidAssignmentRequest {
        reason: reason.to_string(),
    }
}

/// Returns a fresh roster with the assignment applied to every targeted
/// employee. Pure: inputs are never mutated. Target ids with no matching
/// employee are no-ops rather than failures; non-targeted employees pass
/// through structurally unchanged.
pub fn assign_shift(
    employees: &[Employee],
    target_ids: &HashSet<String>,
    shift_id: &str,
    range: DateRange,
) -> Result<Vec<Employee>, AssignmentError> {
    if target_ids.is_empty() {
        return Err(invalid("no employees selected"));
    }
    if shift_id.is_empty() {
        return Err(invalid("no shift selected"));
    }
    if range.start > range.end {
        return Err(invalid("start date is after end date"));
    }

    Ok(employees
        .iter()
        .map(|employee| {
            if !target_ids.contains(&employee.id) {
                return employee.clone();
            }

            let mut kept: Vec<ShiftAssignment> = employee
                .shift_assignments
                .iter()
                .filter(|a| !a.overlaps(range.start, range.end))
                .cloned()
                .collect();
            kept.push(ShiftAssignment {
                shift_id: shift_id.to_string(),
                start_date: range.start,
                end_date: range.end,
            });

            Employee {
                shift_assignments: kept,
                ..employee.clone()
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn assignment(shift_id: &str, start: &str, end: &str) -> ShiftAssignment {
        ShiftAssignment {
            shift_id: shift_id.to_string(),
            start_date: d(start),
            end_date: d(end),
        }
    }

    fn employee(id: &str, assignments: Vec<ShiftAssignment>) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {id}"),
            department: "Engineering".to_string(),
            enrollment_date: d("2022-01-01"),
            role: Role::Employee,
            image_url: None,
            shift_assignments: assignments,
            access_rights: Vec::new(),
        }
    }

    fn targets(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange {
            start: d(start),
            end: d(end),
        }
    }

    fn assert_no_overlaps(assignments: &[ShiftAssignment]) {
        for (i, a) in assignments.iter().enumerate() {
            for b in &assignments[i + 1..] {
                assert!(
                    !a.overlaps(b.start_date, b.end_date),
                    "{a:?} overlaps {b:?}"
                );
            }
        }
    }

    #[test]
    fn appends_to_disjoint_assignments() {
        let roster = vec![employee("E1", vec![assignment("shift-1", "2024-07-01", "2024-07-15")])];
        let updated =
            assign_shift(&roster, &targets(&["E1"]), "shift-2", range("2024-07-16", "2024-07-31"))
                .unwrap();
        assert_eq!(updated[0].shift_assignments.len(), 2);
        assert_no_overlaps(&updated[0].shift_assignments);
        // The original roster is untouched.
        assert_eq!(roster[0].shift_assignments.len(), 1);
    }

    #[test]
    fn drops_partially_overlapping_assignment_wholesale() {
        let roster = vec![employee("E1", vec![assignment("shift-1", "2024-07-01", "2024-07-20")])];
        let updated =
            assign_shift(&roster, &targets(&["E1"]), "shift-2", range("2024-07-16", "2024-07-31"))
                .unwrap();
        // The old assignment is removed entirely, not clipped to July 1-15.
        assert_eq!(
            updated[0].shift_assignments,
            vec![assignment("shift-2", "2024-07-16", "2024-07-31")]
        );
    }

    #[test]
    fn reassigning_identical_range_replaces_it() {
        let roster = vec![employee(
            "E1",
            vec![
                assignment("shift-1", "2024-07-01", "2024-07-15"),
                assignment("shift-2", "2024-07-16", "2024-07-31"),
            ],
        )];
        let updated =
            assign_shift(&roster, &targets(&["E1"]), "shift-2", range("2024-07-16", "2024-07-31"))
                .unwrap();
        // The identical old assignment intersects, gets dropped, and the new
        // one takes its place: structurally equal result, no duplicate.
        assert_eq!(updated[0].shift_assignments.len(), 2);
        assert_no_overlaps(&updated[0].shift_assignments);
        assert_eq!(
            updated[0].shift_assignments.last(),
            Some(&assignment("shift-2", "2024-07-16", "2024-07-31"))
        );
    }

    #[test]
    fn single_day_touching_ranges_intersect() {
        let roster = vec![employee("E1", vec![assignment("shift-1", "2024-07-01", "2024-07-16")])];
        let updated =
            assign_shift(&roster, &targets(&["E1"]), "shift-2", range("2024-07-16", "2024-07-31"))
                .unwrap();
        assert_eq!(updated[0].shift_assignments.len(), 1);
    }

    #[test]
    fn non_targets_pass_through_unchanged() {
        let roster = vec![
            employee("E1", vec![assignment("shift-1", "2024-07-01", "2024-07-31")]),
            employee("E2", vec![assignment("shift-1", "2024-07-01", "2024-07-31")]),
        ];
        let updated =
            assign_shift(&roster, &targets(&["E1"]), "shift-3", range("2024-07-01", "2024-07-31"))
                .unwrap();
        assert_eq!(updated[1], roster[1]);
    }

    #[test]
    fn unknown_target_id_is_a_no_op() {
        let roster = vec![employee("E1", vec![])];
        let updated =
            assign_shift(&roster, &targets(&["E1", "ghost"]), "shift-1", range("2024-07-01", "2024-07-31"))
                .unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].shift_assignments.len(), 1);
    }

    #[test]
    fn empty_target_set_is_rejected() {
        let roster = vec![employee("E1", vec![])];
        let err = assign_shift(&roster, &HashSet::new(), "shift-1", range("2024-07-01", "2024-07-31"))
            .unwrap_err();
        assert!(matches!(err, AssignmentError::InvalidAssignmentRequest { .. }));
    }

    #[test]
    fn empty_shift_id_is_rejected() {
        let roster = vec![employee("E1", vec![])];
        let err = assign_shift(&roster, &targets(&["E1"]), "", range("2024-07-01", "2024-07-31"))
            .unwrap_err();
        assert!(matches!(err, AssignmentError::InvalidAssignmentRequest { .. }));
    }

    #[test]
    fn inverted_range_is_rejected_and_roster_unchanged() {
        let roster = vec![employee("E1", vec![assignment("shift-1", "2024-07-01", "2024-07-15")])];
        let err = assign_shift(&roster, &targets(&["E1"]), "shift-2", range("2024-07-31", "2024-07-16"))
            .unwrap_err();
        assert!(matches!(err, AssignmentError::InvalidAssignmentRequest { .. }));
        assert_eq!(roster[0].shift_assignments.len(), 1);
    }

    #[test]
    fn result_is_always_overlap_free() {
        let roster = vec![employee(
            "E1",
            vec![
                assignment("shift-1", "2024-07-01", "2024-07-10"),
                assignment("shift-2", "2024-07-11", "2024-07-20"),
                assignment("shift-3", "2024-07-21", "2024-07-31"),
            ],
        )];
        let updated =
            assign_shift(&roster, &targets(&["E1"]), "shift-1", range("2024-07-05", "2024-07-25"))
                .unwrap();
        assert_no_overlaps(&updated[0].shift_assignments);
        // Everything intersecting July 5-25 is gone.
        assert_eq!(
            updated[0].shift_assignments,
            vec![assignment("shift-1", "2024-07-05", "2024-07-25")]
        );
    }
}
