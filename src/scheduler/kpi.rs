//! Dashboard metrics (KPIs).
//!
//! Computes the per-engineer and per-day indicators shown on the
//! operations dashboard from a roster and one date's assignments.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled hours | Sum of assignment durations for an engineer |
//! | Utilization | scheduled / shift hours, as a rounded percentage |
//! | Free hours | shift hours - scheduled hours |
//! | Active engineers | Distinct engineers with at least one assignment |
//! | SLA at risk | Assignments whose status is `At Risk` or `Breached` |
//! | Workload | CRQ count and booked hours per requestor or level |
//! | Domain hours | Booked hours per domain, largest first |

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::UtilizationThresholds;
use crate::models::{
    Assignment, Engineer, EngineerLevel, RequestorType, SlaStatus, Team, TaskType,
};

/// How loaded an engineer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UtilizationBand {
    /// At or below the moderate threshold.
    Low,
    /// Above moderate, at or below high.
    Moderate,
    /// Above the high threshold.
    High,
}

impl UtilizationBand {
    /// Classifies a utilization percentage.
    pub fn classify(percent: u32, thresholds: &UtilizationThresholds) -> Self {
        if percent > thresholds.high_above {
            Self::High
        } else if percent > thresholds.moderate_above {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Workload summary for one engineer on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineerUtilization {
    /// Engineer ID.
    pub engineer_id: String,
    /// Hours booked.
    pub scheduled_hours: u32,
    /// Hours in the shift.
    pub shift_hours: u32,
    /// Rounded percentage of the shift that is booked (0 for empty shifts).
    pub utilization_percent: u32,
    /// Unbooked shift hours; negative if overbooked.
    pub free_hours: i32,
    /// Number of assignments.
    pub task_count: usize,
    /// Load classification.
    pub band: UtilizationBand,
}

impl EngineerUtilization {
    /// Computes utilization for `engineer` from the date's assignments.
    pub fn for_engineer(
        engineer: &Engineer,
        assignments: &[Assignment],
        thresholds: &UtilizationThresholds,
    ) -> Self {
        let mine: Vec<&Assignment> = assignments
            .iter()
            .filter(|a| a.engineer_id == engineer.id)
            .collect();
        let scheduled_hours: u32 = mine.iter().map(|a| u32::from(a.hours())).sum();
        let shift_hours = u32::from(engineer.shift.hours());

        let utilization_percent = if shift_hours == 0 {
            0
        } else {
            (f64::from(scheduled_hours) * 100.0 / f64::from(shift_hours)).round() as u32
        };

        Self {
            engineer_id: engineer.id.clone(),
            scheduled_hours,
            shift_hours,
            utilization_percent,
            free_hours: shift_hours as i32 - scheduled_hours as i32,
            task_count: mine.len(),
            band: UtilizationBand::classify(utilization_percent, thresholds),
        }
    }
}

/// Engineers with spare capacity, most senior first, then most free hours.
pub fn free_engineers<'a>(
    engineers: &'a [Engineer],
    assignments: &[Assignment],
    thresholds: &UtilizationThresholds,
) -> Vec<(&'a Engineer, EngineerUtilization)> {
    let mut free: Vec<(&Engineer, EngineerUtilization)> = engineers
        .iter()
        .map(|e| (e, EngineerUtilization::for_engineer(e, assignments, thresholds)))
        .filter(|(_, u)| u.free_hours > 0)
        .collect();
    free.sort_by(|(a, ua), (b, ub)| {
        a.level
            .cmp(&b.level)
            .then_with(|| ub.free_hours.cmp(&ua.free_hours))
    });
    free
}

/// Headline numbers for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of CRQ assignments.
    pub total_crqs: usize,
    /// Sum of assignment durations.
    pub total_hours: u32,
    /// Distinct engineers with work.
    pub active_engineers: usize,
    /// Roster size.
    pub roster_size: usize,
    /// Assignments `At Risk` or `Breached`.
    pub sla_at_risk: usize,
}

impl DashboardStats {
    /// Computes stats from the roster and a date's assignments.
    pub fn calculate(engineers: &[Engineer], assignments: &[Assignment]) -> Self {
        let active: HashSet<&str> = assignments.iter().map(|a| a.engineer_id.as_str()).collect();
        Self {
            total_crqs: assignments.len(),
            total_hours: assignments.iter().map(|a| u32::from(a.hours())).sum(),
            active_engineers: active.len(),
            roster_size: engineers.len(),
            sla_at_risk: assignments
                .iter()
                .filter(|a| a.sla_status.is_at_risk())
                .count(),
        }
    }
}

/// CRQ count and booked hours for a group of assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// Number of assignments.
    pub crq_count: usize,
    /// Sum of assignment durations.
    pub hours: u32,
}

impl Workload {
    fn add(&mut self, a: &Assignment) {
        self.crq_count += 1;
        self.hours += u32::from(a.hours());
    }

    fn of<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> Self {
        let mut w = Self::default();
        for a in assignments {
            w.add(a);
        }
        w
    }
}

/// Workload per requestor. Every requestor is listed, in dashboard order.
pub fn workload_by_requestor(assignments: &[Assignment]) -> Vec<(RequestorType, Workload)> {
    RequestorType::ALL
        .into_iter()
        .map(|r| (r, Workload::of(assignments.iter().filter(|a| a.requestor == r))))
        .collect()
}

/// Engineers and workload at one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelWorkload {
    /// Level.
    pub level: EngineerLevel,
    /// Roster engineers at this level, in roster order.
    pub engineer_ids: Vec<String>,
    /// Work booked on those engineers.
    pub workload: Workload,
}

/// Workload per level, `L4` first.
///
/// Assignments are attributed to their engineer's level; assignments for
/// engineers missing from the roster are not counted.
pub fn workload_by_level(
    engineers: &[Engineer],
    assignments: &[Assignment],
) -> Vec<LevelWorkload> {
    let levels: HashMap<&str, EngineerLevel> = engineers
        .iter()
        .map(|e| (e.id.as_str(), e.level))
        .collect();

    EngineerLevel::ALL
        .into_iter()
        .map(|level| LevelWorkload {
            level,
            engineer_ids: engineers
                .iter()
                .filter(|e| e.level == level)
                .map(|e| e.id.clone())
                .collect(),
            workload: Workload::of(
                assignments
                    .iter()
                    .filter(|a| levels.get(a.engineer_id.as_str()) == Some(&level)),
            ),
        })
        .collect()
}

/// Booked hours per domain, most hours first, ties by domain name.
pub fn hours_by_domain(assignments: &[Assignment]) -> Vec<(String, u32)> {
    let mut hours: HashMap<&str, u32> = HashMap::new();
    for a in assignments {
        *hours.entry(a.domain.as_str()).or_insert(0) += u32::from(a.hours());
    }
    let mut out: Vec<(String, u32)> = hours
        .into_iter()
        .map(|(domain, h)| (domain.to_string(), h))
        .collect();
    out.sort_by(|(da, ha), (db, hb)| hb.cmp(ha).then_with(|| da.cmp(db)));
    out
}

/// CRQ count per team. Both teams are listed; assignments without a team
/// are not counted.
pub fn crq_count_by_team(assignments: &[Assignment]) -> Vec<(Team, usize)> {
    Team::ALL
        .into_iter()
        .map(|t| (t, assignments.iter().filter(|a| a.team == Some(t)).count()))
        .collect()
}

/// Assignment count per SLA status, in dashboard order.
pub fn count_by_sla_status(assignments: &[Assignment]) -> Vec<(SlaStatus, usize)> {
    SlaStatus::ALL
        .into_iter()
        .map(|s| (s, assignments.iter().filter(|a| a.sla_status == s).count()))
        .collect()
}

/// Booked hours per engineer per task type.
///
/// Task types with no hours are omitted from an engineer's map.
pub fn task_hours_by_engineer(
    assignments: &[Assignment],
) -> HashMap<String, BTreeMap<&'static str, u32>> {
    let mut out: HashMap<String, BTreeMap<&'static str, u32>> = HashMap::new();
    for a in assignments {
        *out.entry(a.engineer_id.clone())
            .or_default()
            .entry(a.task_type.label())
            .or_insert(0) += u32::from(a.hours());
    }
    out
}

/// Task types that appear at least once, in dashboard column order.
pub fn active_task_types(assignments: &[Assignment]) -> Vec<TaskType> {
    TaskType::ALL
        .into_iter()
        .filter(|t| assignments.iter().any(|a| a.task_type == *t))
        .collect()
}
