//! Candidate lifecycle for the creation dialog and drag-to-reschedule.
//!
//! # State machine
//!
//! ```text
//! Drafting ──validate──▶ Validating ──▶ Valid ──commit──▶ Committed
//!     ▲                              └─▶ Invalid
//!     └──────────── any field edit ──────┘
//! ```
//!
//! Any edit to engineer or window drops the previous result and returns
//! the draft to `Drafting`. Only a `Valid` draft may be committed. A
//! create draft inserts a new assignment; a reschedule draft updates the
//! moved assignment in place.
//!
//! Commit re-runs validation against the store it writes to, with the
//! resolver used by the last `validate`. If the store changed underneath
//! the draft and the placement no longer fits, the commit is refused and
//! the draft becomes `Invalid` with a fresh resolution.

use std::fmt;

use chrono::{NaiveDate, Utc};

use super::resolver::{ConflictResolver, Resolution};
use crate::error::{Result, SchedulingError};
use crate::models::{Assignment, Engineer, HourWindow, ScheduleStore, TaskDetails};
use crate::validation::Candidate;

/// Lifecycle state of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    /// Being edited; has no current validation result.
    Drafting,
    /// Validation in progress.
    Validating,
    /// Passed validation; may be committed.
    Valid,
    /// Failed validation; must be edited and re-validated.
    Invalid,
    /// Written to the store. Terminal.
    Committed,
}

impl DraftState {
    fn as_str(self) -> &'static str {
        match self {
            Self::Drafting => "drafting",
            Self::Validating => "validating",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Committed => "committed",
        }
    }
}

impl fmt::Display for DraftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
enum DraftKind {
    Create(TaskDetails),
    Reschedule { assignment_id: String },
}

/// A candidate assignment being edited, validated and committed.
#[derive(Debug, Clone)]
pub struct Draft {
    kind: DraftKind,
    date: NaiveDate,
    engineer_id: Option<String>,
    window: Option<HourWindow>,
    state: DraftState,
    resolution: Option<Resolution>,
    resolver: ConflictResolver,
}

impl Draft {
    /// Starts a draft for a new assignment on `date`.
    pub fn create(date: NaiveDate, details: TaskDetails) -> Self {
        Self {
            kind: DraftKind::Create(details),
            date,
            engineer_id: None,
            window: None,
            state: DraftState::Drafting,
            resolution: None,
            resolver: ConflictResolver::default(),
        }
    }

    /// Starts a draft that moves an existing assignment.
    ///
    /// Engineer and window start at the assignment's current placement.
    pub fn reschedule(assignment: &Assignment) -> Self {
        Self {
            kind: DraftKind::Reschedule {
                assignment_id: assignment.id.clone(),
            },
            date: assignment.date,
            engineer_id: Some(assignment.engineer_id.clone()),
            window: Some(assignment.window),
            state: DraftState::Drafting,
            resolution: None,
            resolver: ConflictResolver::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> DraftState {
        self.state
    }

    /// Target date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Latest validation result, cleared by any edit.
    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    /// The assignment being moved, for reschedule drafts.
    pub fn exclude_id(&self) -> Option<&str> {
        match &self.kind {
            DraftKind::Create(_) => None,
            DraftKind::Reschedule { assignment_id } => Some(assignment_id),
        }
    }

    /// The current candidate, once engineer and window are both set.
    pub fn candidate(&self) -> Option<Candidate> {
        match (&self.engineer_id, self.window) {
            (Some(id), Some(window)) => Some(Candidate::new(id.clone(), window)),
            _ => None,
        }
    }

    /// Changes the target engineer.
    pub fn set_engineer(&mut self, engineer_id: impl Into<String>) -> Result<()> {
        self.edit()?;
        self.engineer_id = Some(engineer_id.into());
        Ok(())
    }

    /// Changes the hour window.
    pub fn set_window(&mut self, window: HourWindow) -> Result<()> {
        self.edit()?;
        self.window = Some(window);
        Ok(())
    }

    /// Changes the hour window from raw hours, rejecting bad intervals.
    pub fn set_hours(&mut self, start_hour: u8, end_hour: u8) -> Result<()> {
        let window = HourWindow::new(start_hour, end_hour)?;
        self.set_window(window)
    }

    fn edit(&mut self) -> Result<()> {
        if self.state == DraftState::Committed {
            return Err(SchedulingError::AlreadyCommitted);
        }
        self.state = DraftState::Drafting;
        self.resolution = None;
        Ok(())
    }

    /// Validates the current candidate against the store's assignments on
    /// the draft's date.
    pub fn validate<S: ScheduleStore + ?Sized>(
        &mut self,
        resolver: &ConflictResolver,
        roster: &[Engineer],
        store: &S,
    ) -> Result<&Resolution> {
        if self.state == DraftState::Committed {
            return Err(SchedulingError::AlreadyCommitted);
        }
        let candidate = match (&self.engineer_id, self.window) {
            (None, _) => return Err(SchedulingError::MissingField("engineer")),
            (_, None) => return Err(SchedulingError::MissingField("hour window")),
            (Some(id), Some(window)) => Candidate::new(id.clone(), window),
        };

        self.state = DraftState::Validating;
        self.resolver = resolver.clone();
        let on_date = self.assignments_on_date(store);

        let resolution = match resolver.resolve(&candidate, roster, &on_date, self.exclude_id()) {
            Ok(r) => r,
            Err(e) => {
                self.state = DraftState::Drafting;
                return Err(e);
            }
        };

        self.state = if resolution.is_valid() {
            DraftState::Valid
        } else {
            DraftState::Invalid
        };
        Ok(self.resolution.insert(resolution))
    }

    /// Writes a validated draft to the store.
    ///
    /// Returns the ID of the created or moved assignment. Refused unless
    /// the draft is `Valid`.
    pub fn commit<S: ScheduleStore + ?Sized>(
        &mut self,
        roster: &[Engineer],
        store: &mut S,
    ) -> Result<String> {
        if self.state != DraftState::Valid {
            return Err(SchedulingError::CommitRefused(self.state.as_str()));
        }
        let (engineer_id, window) = match (&self.engineer_id, self.window) {
            (Some(id), Some(window)) => (id.clone(), window),
            _ => return Err(SchedulingError::CommitRefused(self.state.as_str())),
        };

        let candidate = Candidate::new(engineer_id.clone(), window);
        let on_date = self.assignments_on_date(&*store);
        let recheck = self
            .resolver
            .resolve(&candidate, roster, &on_date, self.exclude_id())?;
        if let Resolution::Invalid { conflict, .. } = &recheck {
            tracing::warn!(
                engineer = %engineer_id,
                %window,
                kind = ?conflict.kind,
                "commit refused: placement no longer valid"
            );
            let err = SchedulingError::from(conflict.clone());
            self.state = DraftState::Invalid;
            self.resolution = Some(recheck);
            return Err(err);
        }

        let id = match &self.kind {
            DraftKind::Reschedule { assignment_id } => {
                store.reschedule(assignment_id, &engineer_id, window)?;
                assignment_id.clone()
            }
            DraftKind::Create(details) => {
                let engineer = roster
                    .iter()
                    .find(|e| e.id == engineer_id)
                    .ok_or_else(|| SchedulingError::UnknownEngineer(engineer_id.clone()))?;
                let assignment = build_assignment(&*store, details, engineer, self.date, window);
                let id = assignment.id.clone();
                store.insert(assignment)?;
                id
            }
        };

        tracing::info!(
            assignment = %id,
            engineer = %engineer_id,
            date = %self.date,
            %window,
            "committed assignment"
        );
        self.state = DraftState::Committed;
        Ok(id)
    }

    fn assignments_on_date<S: ScheduleStore + ?Sized>(&self, store: &S) -> Vec<Assignment> {
        store
            .assignments()
            .iter()
            .filter(|a| a.date == self.date)
            .cloned()
            .collect()
    }
}

/// Builds a new assignment, filling blank task fields from the engineer.
fn build_assignment<S: ScheduleStore + ?Sized>(
    store: &S,
    details: &TaskDetails,
    engineer: &Engineer,
    date: NaiveDate,
    window: HourWindow,
) -> Assignment {
    let now = Utc::now();
    let base = format!("s-{}", now.timestamp_millis());
    let mut id = base.clone();
    let mut n = 1;
    while store.get(&id).is_some() {
        id = format!("{base}-{n}");
        n += 1;
    }

    let (domain, subdomain) = if details.domain.is_empty() {
        (engineer.domain.clone(), engineer.subdomain.clone())
    } else {
        (details.domain.clone(), details.subdomain.clone())
    };

    let mut assignment = Assignment::new(
        id,
        details.crq_number.clone(),
        engineer.id.clone(),
        date,
        window,
        details.task_type,
    )
    .with_requestor(details.requestor)
    .with_domain(domain, subdomain)
    .with_level_required(details.level_required.unwrap_or(engineer.level))
    .with_sla_status(details.sla_status)
    .with_allocated_at(now);
    assignment.team = engineer.team;
    assignment
}
