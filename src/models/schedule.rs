//! Schedule store.
//!
//! The schedule is the caller-owned collection of assignments. The engine
//! only ever reads it through slices; writes go through [`ScheduleStore`],
//! which the caller invokes after a draft has been validated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Assignment, HourWindow};
use crate::error::{Result, SchedulingError};

/// Write seam for persisting validated assignments.
///
/// Implemented by [`Schedule`] for in-process use. Callers with their own
/// storage implement it to receive commits from a [`Draft`](crate::scheduler::Draft).
pub trait ScheduleStore {
    /// All stored assignments.
    fn assignments(&self) -> &[Assignment];

    /// Looks up an assignment by ID.
    fn get(&self, id: &str) -> Option<&Assignment> {
        self.assignments().iter().find(|a| a.id == id)
    }

    /// Appends a new assignment.
    fn insert(&mut self, assignment: Assignment) -> Result<()>;

    /// Moves an existing assignment to another engineer and/or window.
    fn reschedule(&mut self, id: &str, engineer_id: &str, window: HourWindow) -> Result<()>;
}

/// In-memory schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Stored assignments, in insertion order.
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from existing assignments.
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Loads a schedule from a JSON array of assignments.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let assignments: Vec<Assignment> = serde_json::from_str(json)?;
        Ok(Self::from_assignments(assignments))
    }

    /// Assignments on a date, cloned into an owned list.
    ///
    /// This is the date-scoped view the validator and suggester expect.
    pub fn on_date(&self, date: NaiveDate) -> Vec<Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect()
    }

    /// All assignments for an engineer, across dates.
    pub fn for_engineer(&self, engineer_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.engineer_id == engineer_id)
            .collect()
    }

    /// Assignments for an engineer on a date, ordered by start hour.
    pub fn for_engineer_on(&self, engineer_id: &str, date: NaiveDate) -> Vec<&Assignment> {
        let mut out: Vec<&Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.engineer_id == engineer_id && a.date == date)
            .collect();
        out.sort_by_key(|a| a.window.start_hour());
        out
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl ScheduleStore for Schedule {
    fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    fn insert(&mut self, assignment: Assignment) -> Result<()> {
        if self.get(&assignment.id).is_some() {
            return Err(SchedulingError::DuplicateAssignment(assignment.id));
        }
        self.assignments.push(assignment);
        Ok(())
    }

    fn reschedule(&mut self, id: &str, engineer_id: &str, window: HourWindow) -> Result<()> {
        let entry = self
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SchedulingError::UnknownAssignment(id.to_string()))?;
        entry.engineer_id = engineer_id.to_string();
        entry.window = window;
        Ok(())
    }
}
