//! Validation for candidate assignments and loaded schedule data.
//!
//! Two entry points:
//! - [`validate`]: checks one candidate assignment against an engineer's
//!   shift and existing assignments. Short-circuits on the first failure.
//! - [`validate_input`]: integrity checks over a loaded roster and
//!   schedule. Collects every problem found.
//!
//! # Candidate checks (in order)
//! 1. Shift containment: the window must fit inside the engineer's shift.
//! 2. Overlap: the window must not intersect any other assignment of the
//!    same engineer (the one named by `exclude_id` is skipped).

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchedulingError;
use crate::models::{Assignment, Engineer, HourWindow, OvernightPolicy};

/// A proposed placement of work on an engineer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Target engineer ID.
    pub engineer_id: String,
    /// Requested hour window.
    #[serde(flatten)]
    pub window: HourWindow,
}

impl Candidate {
    /// Creates a candidate.
    pub fn new(engineer_id: impl Into<String>, window: HourWindow) -> Self {
        Self {
            engineer_id: engineer_id.into(),
            window,
        }
    }
}

/// Which rule a candidate broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Window lies outside the engineer's shift.
    ShiftViolation,
    /// Window overlaps an existing assignment.
    SlotConflict,
}

/// A failed candidate validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Violated rule.
    pub kind: ConflictKind,
    /// Engineer ID for shift violations, assignment ID for slot conflicts.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<Conflict> for SchedulingError {
    fn from(c: Conflict) -> Self {
        match c.kind {
            ConflictKind::ShiftViolation => SchedulingError::ShiftViolation(c.message),
            ConflictKind::SlotConflict => SchedulingError::SlotConflict(c.message),
        }
    }
}

/// Validates a candidate against the engineer's shift and assignments.
///
/// `existing` is the set of assignments on the target date; only entries
/// belonging to `engineer` are considered. `exclude_id` skips the entry
/// being moved during a reschedule.
///
/// Overnight shifts are split at midnight; use [`validate_with_policy`]
/// to choose otherwise.
pub fn validate(
    candidate: &Candidate,
    engineer: &Engineer,
    existing: &[Assignment],
    exclude_id: Option<&str>,
) -> Result<(), Conflict> {
    validate_with_policy(
        candidate,
        engineer,
        existing,
        exclude_id,
        OvernightPolicy::default(),
    )
}

/// [`validate`] with an explicit overnight shift policy.
pub fn validate_with_policy(
    candidate: &Candidate,
    engineer: &Engineer,
    existing: &[Assignment],
    exclude_id: Option<&str>,
    policy: OvernightPolicy,
) -> Result<(), Conflict> {
    let window = &candidate.window;

    if !engineer.shift.contains_for(window, policy) {
        return Err(Conflict {
            kind: ConflictKind::ShiftViolation,
            entity_id: engineer.id.clone(),
            message: format!(
                "Shift violation: {}'s shift is {}",
                engineer.display_name(),
                engineer.shift
            ),
        });
    }

    if let Some(hit) = first_overlap(&engineer.id, window, existing, exclude_id) {
        return Err(Conflict {
            kind: ConflictKind::SlotConflict,
            entity_id: hit.id.clone(),
            message: format!(
                "Conflict: {} already has {} at {}",
                engineer.display_name(),
                hit.crq_number,
                hit.window
            ),
        });
    }

    Ok(())
}

/// First assignment of `engineer_id` (other than `exclude_id`) that
/// intersects `window`, in input order.
pub(crate) fn first_overlap<'a>(
    engineer_id: &str,
    window: &HourWindow,
    existing: &'a [Assignment],
    exclude_id: Option<&str>,
) -> Option<&'a Assignment> {
    existing.iter().find(|a| {
        a.engineer_id == engineer_id && Some(a.id.as_str()) != exclude_id && a.overlaps(window)
    })
}

/// Validation result for loaded data.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A data integrity problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of data integrity problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An assignment references an engineer that isn't on the roster.
    UnknownEngineer,
    /// An engineer's shift has no working hours.
    InvalidShift,
    /// An assignment lies outside its engineer's shift.
    OutsideShift,
    /// Two assignments of one engineer on one date overlap.
    OverlappingAssignments,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a loaded roster and schedule.
///
/// Checks:
/// 1. No duplicate engineer IDs
/// 2. Every shift has working hours
/// 3. No duplicate assignment IDs
/// 4. Every assignment references a roster engineer
/// 5. Every assignment lies inside its engineer's shift
/// 6. No two assignments of one engineer overlap on the same date
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(engineers: &[Engineer], assignments: &[Assignment]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut roster: HashMap<&str, &Engineer> = HashMap::new();
    for e in engineers {
        if roster.insert(e.id.as_str(), e).is_some() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate engineer ID: {}", e.id),
            ));
        }
        if e.shift.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidShift,
                format!("Engineer '{}' has an unusable shift {}", e.id, e.shift),
            ));
        }
    }

    let mut assignment_ids = HashSet::new();
    for a in assignments {
        if !assignment_ids.insert(a.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate assignment ID: {}", a.id),
            ));
        }

        match roster.get(a.engineer_id.as_str()) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEngineer,
                format!(
                    "Assignment '{}' references unknown engineer '{}'",
                    a.id, a.engineer_id
                ),
            )),
            Some(e) if !e.shift.contains(&a.window) => errors.push(ValidationError::new(
                ValidationErrorKind::OutsideShift,
                format!(
                    "Assignment '{}' at {} is outside {}'s shift {}",
                    a.id,
                    a.window,
                    e.display_name(),
                    e.shift
                ),
            )),
            Some(_) => {}
        }
    }

    // Pairwise overlap per engineer and date
    let mut groups: HashMap<(&str, chrono::NaiveDate), Vec<&Assignment>> = HashMap::new();
    for a in assignments {
        groups
            .entry((a.engineer_id.as_str(), a.date))
            .or_default()
            .push(a);
    }
    for ((engineer_id, date), group) in &groups {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if a.window.overlaps(&b.window) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::OverlappingAssignments,
                        format!(
                            "Assignments '{}' and '{}' overlap for engineer '{}' on {}",
                            a.id, b.id, engineer_id, date
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngineerLevel, ShiftWindow, TaskType};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 16).unwrap()
    }

    fn w(start: u8, end: u8) -> HourWindow {
        HourWindow::new(start, end).unwrap()
    }

    fn engineer(id: &str, start: u8, end: u8) -> Engineer {
        Engineer::new(id, EngineerLevel::L3, ShiftWindow::new(start, end))
            .with_name(format!("Engineer {id}"))
    }

    fn entry(id: &str, eng: &str, start: u8, end: u8) -> Assignment {
        Assignment::new(id, format!("CRQ-{id}"), eng, date(), w(start, end), TaskType::MopCreation)
    }

    #[test]
    fn test_valid_candidate() {
        let eng = engineer("e1", 9, 18);
        let existing = vec![entry("s1", "e1", 10, 12)];
        assert!(validate(&Candidate::new("e1", w(12, 14)), &eng, &existing, None).is_ok());
        assert!(validate(&Candidate::new("e1", w(9, 10)), &eng, &existing, None).is_ok());
    }

    #[test]
    fn test_shift_violation_before_start() {
        let eng = engineer("e1", 9, 18);
        let err = validate(&Candidate::new("e1", w(7, 9)), &eng, &[], None).unwrap_err();
        assert_eq!(err.kind, ConflictKind::ShiftViolation);
        assert_eq!(err.entity_id, "e1");
        assert_eq!(err.message, "Shift violation: Engineer e1's shift is 9:00–18:00");
    }

    #[test]
    fn test_shift_violation_after_end() {
        let eng = engineer("e1", 9, 18);
        let err = validate(&Candidate::new("e1", w(17, 19)), &eng, &[], None).unwrap_err();
        assert_eq!(err.kind, ConflictKind::ShiftViolation);
    }

    #[test]
    fn test_shift_checked_before_overlap() {
        let eng = engineer("e1", 9, 18);
        let existing = vec![entry("s1", "e1", 9, 11)];
        let err = validate(&Candidate::new("e1", w(8, 10)), &eng, &existing, None).unwrap_err();
        assert_eq!(err.kind, ConflictKind::ShiftViolation);
    }

    #[test]
    fn test_slot_conflict_names_assignment() {
        let eng = engineer("e1", 9, 18);
        let existing = vec![entry("s1", "e1", 10, 12)];
        let err = validate(&Candidate::new("e1", w(11, 13)), &eng, &existing, None).unwrap_err();
        assert_eq!(err.kind, ConflictKind::SlotConflict);
        assert_eq!(err.entity_id, "s1");
        assert_eq!(err.message, "Conflict: Engineer e1 already has CRQ-s1 at 10:00–12:00");
    }

    #[test]
    fn test_other_engineers_ignored() {
        let eng = engineer("e1", 9, 18);
        let existing = vec![entry("s1", "e2", 10, 12)];
        assert!(validate(&Candidate::new("e1", w(10, 12)), &eng, &existing, None).is_ok());
    }

    #[test]
    fn test_exclude_id_skips_self() {
        let eng = engineer("e1", 9, 18);
        let existing = vec![entry("s1", "e1", 10, 12)];
        let same_place = Candidate::new("e1", w(10, 12));
        assert!(validate(&same_place, &eng, &existing, Some("s1")).is_ok());
        assert!(validate(&same_place, &eng, &existing, None).is_err());
    }

    #[test]
    fn test_overnight_shift_policy() {
        let night = engineer("e4", 22, 6);
        let early = Candidate::new("e4", w(1, 3));
        assert!(validate(&early, &night, &[], None).is_ok());

        let err = validate_with_policy(&early, &night, &[], None, OvernightPolicy::Reject)
            .unwrap_err();
        assert_eq!(err.kind, ConflictKind::ShiftViolation);
        assert_eq!(err.message, "Shift violation: Engineer e4's shift is 22:00–6:00");
    }

    #[test]
    fn test_conflict_into_error() {
        let eng = engineer("e1", 9, 18);
        let conflict = validate(&Candidate::new("e1", w(5, 6)), &eng, &[], None).unwrap_err();
        let err: SchedulingError = conflict.into();
        assert!(matches!(err, SchedulingError::ShiftViolation(_)));
    }

    #[test]
    fn test_valid_input() {
        let engineers = vec![engineer("e1", 9, 18), engineer("e2", 22, 6)];
        let assignments = vec![
            entry("s1", "e1", 10, 12),
            entry("s2", "e1", 12, 14),
            entry("s3", "e2", 23, 24),
        ];
        assert!(validate_input(&engineers, &assignments).is_ok());
    }

    #[test]
    fn test_duplicate_engineer_id() {
        let engineers = vec![engineer("e1", 9, 18), engineer("e1", 8, 17)];
        let errors = validate_input(&engineers, &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("engineer")));
    }

    #[test]
    fn test_duplicate_assignment_id() {
        let engineers = vec![engineer("e1", 9, 18)];
        let assignments = vec![entry("s1", "e1", 9, 10), entry("s1", "e1", 10, 11)];
        let errors = validate_input(&engineers, &assignments).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("assignment")));
    }

    #[test]
    fn test_unknown_engineer() {
        let errors = validate_input(&[], &[entry("s1", "ghost", 9, 10)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownEngineer));
    }

    #[test]
    fn test_empty_shift() {
        let errors = validate_input(&[engineer("e1", 9, 9)], &[]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidShift));
    }

    #[test]
    fn test_outside_shift() {
        let engineers = vec![engineer("e1", 9, 18)];
        let errors = validate_input(&engineers, &[entry("s1", "e1", 17, 19)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::OutsideShift));
    }

    #[test]
    fn test_overlapping_assignments() {
        let engineers = vec![engineer("e1", 9, 18)];
        let assignments = vec![entry("s1", "e1", 10, 12), entry("s2", "e1", 11, 13)];
        let errors = validate_input(&engineers, &assignments).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::OverlappingAssignments);
    }

    #[test]
    fn test_multiple_errors() {
        let engineers = vec![engineer("e1", 9, 9)];
        let assignments = vec![entry("s1", "ghost", 9, 10), entry("s1", "e1", 9, 10)];
        let errors = validate_input(&engineers, &assignments).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
