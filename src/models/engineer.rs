//! Engineer (roster) model.
//!
//! Engineers are the resources that CRQ tasks are assigned to. Each has a
//! competency level, a domain classification, a shift window and a set of
//! task types they are qualified for. Engineers are reference data: loaded
//! once and never mutated by the engine.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ShiftWindow, TaskType};

/// Competency level, most senior first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineerLevel {
    /// Most senior.
    L4,
    /// Senior.
    L3,
    /// Intermediate.
    L2,
    /// Least senior.
    L1,
}

impl EngineerLevel {
    /// All levels in seniority order.
    pub const ALL: [EngineerLevel; 4] = [Self::L4, Self::L3, Self::L2, Self::L1];

    /// Seniority rank: 0 for `L4` up to 3 for `L1`. Lower is more senior.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Self::L4 => 0,
            Self::L3 => 1,
            Self::L2 => 2,
            Self::L1 => 3,
        }
    }

    /// Whether this level is the same as or more senior than `other`.
    #[inline]
    pub fn at_least(self, other: Self) -> bool {
        self.rank() <= other.rank()
    }
}

impl PartialOrd for EngineerLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EngineerLevel {
    /// Orders by rank, so sorting puts `L4` first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for EngineerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::L4 => "L4",
            Self::L3 => "L3",
            Self::L2 => "L2",
            Self::L1 => "L1",
        };
        f.write_str(s)
    }
}

/// Team classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Change control board.
    #[serde(rename = "CCB")]
    Ccb,
    /// Scheduling and execution.
    #[serde(rename = "SE")]
    Se,
}

impl Team {
    /// All teams, in dashboard order.
    pub const ALL: [Team; 2] = [Self::Ccb, Self::Se];
}

/// An engineer on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engineer {
    /// Unique engineer identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Competency level.
    pub level: EngineerLevel,
    /// Domain classification.
    pub domain: String,
    /// Subdomain classification.
    pub subdomain: String,
    /// Working hours.
    #[serde(flatten)]
    pub shift: ShiftWindow,
    /// Task types this engineer is qualified to perform.
    #[serde(default)]
    pub skills: Vec<TaskType>,
    /// Team, if classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
}

impl Engineer {
    /// Creates an engineer with an empty domain and no skills.
    pub fn new(id: impl Into<String>, level: EngineerLevel, shift: ShiftWindow) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            level,
            domain: String::new(),
            subdomain: String::new(),
            shift,
            skills: Vec::new(),
            team: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets domain and subdomain.
    pub fn with_domain(mut self, domain: impl Into<String>, subdomain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self.subdomain = subdomain.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: TaskType) -> Self {
        if !self.skills.contains(&skill) {
            self.skills.push(skill);
        }
        self
    }

    /// Sets the team.
    pub fn with_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    /// Whether this engineer is qualified for a task type.
    pub fn has_skill(&self, task: TaskType) -> bool {
        self.skills.contains(&task)
    }

    /// Name for messages; falls back to the id when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engineer_builder() {
        let e = Engineer::new("e1", EngineerLevel::L4, ShiftWindow::new(9, 18))
            .with_name("Rajesh Kumar")
            .with_domain("IP Core", "MPLS Core")
            .with_skill(TaskType::CrqReview)
            .with_skill(TaskType::ImpactAnalysis)
            .with_skill(TaskType::CrqReview)
            .with_team(Team::Ccb);

        assert_eq!(e.id, "e1");
        assert_eq!(e.display_name(), "Rajesh Kumar");
        assert_eq!(e.skills.len(), 2);
        assert!(e.has_skill(TaskType::ImpactAnalysis));
        assert!(!e.has_skill(TaskType::Rollback));
        assert_eq!(e.team, Some(Team::Ccb));
    }

    #[test]
    fn test_level_ordering() {
        assert!(EngineerLevel::L4 < EngineerLevel::L1);
        assert!(EngineerLevel::L4.at_least(EngineerLevel::L3));
        assert!(EngineerLevel::L3.at_least(EngineerLevel::L3));
        assert!(!EngineerLevel::L2.at_least(EngineerLevel::L3));

        let mut levels = vec![EngineerLevel::L1, EngineerLevel::L4, EngineerLevel::L2];
        levels.sort();
        assert_eq!(levels, vec![EngineerLevel::L4, EngineerLevel::L2, EngineerLevel::L1]);
    }

    #[test]
    fn test_display_name_fallback() {
        let e = Engineer::new("e9", EngineerLevel::L1, ShiftWindow::new(9, 18));
        assert_eq!(e.display_name(), "e9");
    }

    #[test]
    fn test_engineer_from_roster_json() {
        let json = r#"{
            "id": "e4", "name": "Sneha Reddy", "level": "L3",
            "domain": "Packet", "subdomain": "Packet Change",
            "shiftStart": 22, "shiftEnd": 6, "team": "SE",
            "skills": ["Scheduling of Activity", "Scheduling Communication"]
        }"#;
        let e: Engineer = serde_json::from_str(json).unwrap();
        assert_eq!(e.level, EngineerLevel::L3);
        assert_eq!(e.shift, ShiftWindow::new(22, 6));
        assert!(e.shift.is_overnight());
        assert_eq!(e.team, Some(Team::Se));
        assert!(e.has_skill(TaskType::SchedulingOfActivity));

        let back = serde_json::to_value(&e).unwrap();
        assert_eq!(back["shiftStart"], 22);
        assert_eq!(back["shiftEnd"], 6);
    }

    #[test]
    fn test_roster_rejects_out_of_range_shift() {
        let json = r#"{
            "id": "e11", "name": "Bad Shift", "level": "L2",
            "domain": "Packet", "subdomain": "Packet Change",
            "shiftStart": 30, "shiftEnd": 6
        }"#;
        assert!(serde_json::from_str::<Engineer>(json).is_err());
    }
}
