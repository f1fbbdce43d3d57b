//! Assignment (schedule entry) model.
//!
//! An assignment records that a CRQ task is scheduled on one engineer,
//! on one calendar date, during one half-open hour window. Assignments
//! are created by the caller after a successful validation and are only
//! moved through the same validation path.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EngineerLevel, HourWindow, Team};

/// Kind of work a CRQ task requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Review of the change request itself.
    #[serde(rename = "CRQ Review")]
    CrqReview,
    /// Assessment of affected services.
    #[serde(rename = "Impact Analysis")]
    ImpactAnalysis,
    /// Writing the method of procedure.
    #[serde(rename = "MOP Creation")]
    MopCreation,
    /// Checking a method of procedure.
    #[serde(rename = "MOP Validation")]
    MopValidation,
    /// Booking the maintenance window.
    #[serde(rename = "Scheduling of Activity")]
    SchedulingOfActivity,
    /// Notifying stakeholders of the window.
    #[serde(rename = "Scheduling Communication")]
    SchedulingCommunication,
    /// Hands-on network execution.
    #[serde(rename = "Activity NW Exec")]
    ActivityNwExec,
    /// Rolling out the change.
    Deployment,
    /// Reverting the change.
    Rollback,
    /// Post-change observation.
    Monitoring,
}

impl TaskType {
    /// All task types, in dashboard column order.
    pub const ALL: [TaskType; 10] = [
        Self::CrqReview,
        Self::ImpactAnalysis,
        Self::MopCreation,
        Self::MopValidation,
        Self::SchedulingOfActivity,
        Self::SchedulingCommunication,
        Self::ActivityNwExec,
        Self::Deployment,
        Self::Rollback,
        Self::Monitoring,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::CrqReview => "CRQ Review",
            Self::ImpactAnalysis => "Impact Analysis",
            Self::MopCreation => "MOP Creation",
            Self::MopValidation => "MOP Validation",
            Self::SchedulingOfActivity => "Scheduling of Activity",
            Self::SchedulingCommunication => "Scheduling Communication",
            Self::ActivityNwExec => "Activity NW Exec",
            Self::Deployment => "Deployment",
            Self::Rollback => "Rollback",
            Self::Monitoring => "Monitoring",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who raised the change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestorType {
    /// Deployment team.
    Deployment,
    /// Network operations center.
    #[serde(rename = "NOC")]
    Noc,
    /// Regional circle office.
    Circle,
}

impl RequestorType {
    /// All requestors, in dashboard order.
    pub const ALL: [RequestorType; 3] = [Self::Deployment, Self::Noc, Self::Circle];
}

/// SLA status as reported by the upstream CRQ system.
///
/// Informational only: the engine never derives or updates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlaStatus {
    /// Within SLA.
    #[serde(rename = "On Track")]
    OnTrack,
    /// Close to breaching.
    #[serde(rename = "At Risk")]
    AtRisk,
    /// SLA missed.
    Breached,
}

impl SlaStatus {
    /// All statuses, in dashboard order.
    pub const ALL: [SlaStatus; 3] = [Self::OnTrack, Self::AtRisk, Self::Breached];

    /// Whether the status needs attention (`At Risk` or `Breached`).
    pub fn is_at_risk(self) -> bool {
        matches!(self, Self::AtRisk | Self::Breached)
    }
}

/// A CRQ task scheduled on an engineer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique schedule entry identifier.
    pub id: String,
    /// Change request number (e.g. `CRQ-2025-001`).
    pub crq_number: String,
    /// Assigned engineer ID.
    pub engineer_id: String,
    /// Calendar date of the work.
    pub date: NaiveDate,
    /// Hour window on `date`.
    #[serde(flatten)]
    pub window: HourWindow,
    /// Kind of work.
    pub task_type: TaskType,
    /// Requestor classification.
    pub requestor: RequestorType,
    /// Owning team, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    /// Domain classification.
    pub domain: String,
    /// Subdomain classification.
    pub subdomain: String,
    /// Minimum level required to perform the task.
    pub level_required: EngineerLevel,
    /// Upstream SLA status.
    pub sla_status: SlaStatus,
    /// When the assignment was created.
    pub allocated_at: DateTime<Utc>,
}

/// Task metadata for a new assignment, independent of who and when.
///
/// Filled in by the creation dialog; the engineer, date and window come
/// from the validated draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    /// Change request number.
    pub crq_number: String,
    /// Kind of work.
    pub task_type: TaskType,
    /// Requestor classification.
    pub requestor: RequestorType,
    /// Domain; empty means "use the engineer's domain".
    #[serde(default)]
    pub domain: String,
    /// Subdomain; empty means "use the engineer's subdomain".
    #[serde(default)]
    pub subdomain: String,
    /// Required level; `None` means "use the engineer's level".
    #[serde(default)]
    pub level_required: Option<EngineerLevel>,
    /// Initial SLA status.
    pub sla_status: SlaStatus,
}

impl TaskDetails {
    /// Creates task details for a new `Deployment` request that is on track.
    pub fn new(crq_number: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            crq_number: crq_number.into(),
            task_type,
            requestor: RequestorType::Deployment,
            domain: String::new(),
            subdomain: String::new(),
            level_required: None,
            sla_status: SlaStatus::OnTrack,
        }
    }

    /// Sets the requestor.
    pub fn with_requestor(mut self, requestor: RequestorType) -> Self {
        self.requestor = requestor;
        self
    }

    /// Sets domain and subdomain.
    pub fn with_domain(mut self, domain: impl Into<String>, subdomain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self.subdomain = subdomain.into();
        self
    }

    /// Sets the required level.
    pub fn with_level_required(mut self, level: EngineerLevel) -> Self {
        self.level_required = Some(level);
        self
    }

    /// Sets the initial SLA status.
    pub fn with_sla_status(mut self, status: SlaStatus) -> Self {
        self.sla_status = status;
        self
    }
}

impl Assignment {
    /// Creates an assignment allocated now, with `Deployment`, `L1` and
    /// `On Track` defaults.
    pub fn new(
        id: impl Into<String>,
        crq_number: impl Into<String>,
        engineer_id: impl Into<String>,
        date: NaiveDate,
        window: HourWindow,
        task_type: TaskType,
    ) -> Self {
        Self {
            id: id.into(),
            crq_number: crq_number.into(),
            engineer_id: engineer_id.into(),
            date,
            window,
            task_type,
            requestor: RequestorType::Deployment,
            team: None,
            domain: String::new(),
            subdomain: String::new(),
            level_required: EngineerLevel::L1,
            sla_status: SlaStatus::OnTrack,
            allocated_at: Utc::now(),
        }
    }

    /// Sets the requestor.
    pub fn with_requestor(mut self, requestor: RequestorType) -> Self {
        self.requestor = requestor;
        self
    }

    /// Sets domain and subdomain.
    pub fn with_domain(mut self, domain: impl Into<String>, subdomain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self.subdomain = subdomain.into();
        self
    }

    /// Sets the owning team.
    pub fn with_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    /// Sets the required level.
    pub fn with_level_required(mut self, level: EngineerLevel) -> Self {
        self.level_required = level;
        self
    }

    /// Sets the SLA status.
    pub fn with_sla_status(mut self, status: SlaStatus) -> Self {
        self.sla_status = status;
        self
    }

    /// Sets the allocation timestamp.
    pub fn with_allocated_at(mut self, at: DateTime<Utc>) -> Self {
        self.allocated_at = at;
        self
    }

    /// Duration in hours.
    #[inline]
    pub fn hours(&self) -> u8 {
        self.window.duration()
    }

    /// Whether this assignment's window intersects `window`.
    #[inline]
    pub fn overlaps(&self, window: &HourWindow) -> bool {
        self.window.overlaps(window)
    }
}
