//! Validator + suggester facade.
//!
//! Both UI entry points (the creation dialog and drag-to-reschedule) go
//! through [`ConflictResolver::resolve`], so the shift and overlap rules
//! live in exactly one place.

use serde::{Deserialize, Serialize};

use super::suggest::{suggest_with_config, Suggestion};
use crate::config::EngineConfig;
use crate::error::{Result, SchedulingError};
use crate::models::{Assignment, Engineer};
use crate::validation::{validate_with_policy, Candidate, Conflict};

/// Outcome of resolving a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// The candidate may be committed.
    Valid,
    /// The candidate was rejected.
    Invalid {
        /// Rule that failed.
        conflict: Conflict,
        /// Proposed fix; `None` when nothing was found.
        remedy: Option<Suggestion>,
    },
}

impl Resolution {
    /// Whether the candidate passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The conflict, if rejected.
    pub fn conflict(&self) -> Option<&Conflict> {
        match self {
            Self::Valid => None,
            Self::Invalid { conflict, .. } => Some(conflict),
        }
    }

    /// The suggestion, if one was found.
    pub fn remedy(&self) -> Option<&Suggestion> {
        match self {
            Self::Valid => None,
            Self::Invalid { remedy, .. } => remedy.as_ref(),
        }
    }

    /// Text shown under the conflict message.
    pub fn remedy_text(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid { remedy: Some(s), .. } => Some(s.to_string()),
            Self::Invalid { remedy: None, .. } => Some("No alternatives available".to_string()),
        }
    }

    /// Converts a rejection into an error.
    ///
    /// A rejection without a remedy becomes `NoAlternativeFound`; otherwise
    /// the conflict's own kind is reported.
    pub fn into_result(self, candidate: &Candidate) -> Result<()> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid { remedy: None, .. } => Err(SchedulingError::NoAlternativeFound {
                engineer_id: candidate.engineer_id.clone(),
                window: candidate.window.to_string(),
            }),
            Self::Invalid { conflict, .. } => Err(conflict.into()),
        }
    }
}

/// Runs validation and, on failure, the remedy search.
///
/// Holds only configuration; every call receives the roster and the
/// date's assignments by reference.
#[derive(Debug, Clone, Default)]
pub struct ConflictResolver {
    config: EngineConfig,
}

impl ConflictResolver {
    /// Creates a resolver.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates a candidate for a known engineer.
    pub fn validate(
        &self,
        candidate: &Candidate,
        engineer: &Engineer,
        existing: &[Assignment],
        exclude_id: Option<&str>,
    ) -> std::result::Result<(), Conflict> {
        validate_with_policy(
            candidate,
            engineer,
            existing,
            exclude_id,
            self.config.overnight_shifts,
        )
    }

    /// Searches for a remedy after a failed validation.
    pub fn suggest(
        &self,
        candidate: &Candidate,
        engineer: &Engineer,
        all_assignments: &[Assignment],
        pool: &[Engineer],
        failure: &Conflict,
        exclude_id: Option<&str>,
    ) -> Option<Suggestion> {
        suggest_with_config(
            &self.config,
            candidate,
            engineer,
            all_assignments,
            pool,
            failure,
            exclude_id,
        )
    }

    /// Validates a candidate and, if it fails, looks for a remedy.
    ///
    /// `roster` is both the lookup for the candidate's engineer and the
    /// pool of substitutes. `assignments` must be scoped to the target date.
    pub fn resolve(
        &self,
        candidate: &Candidate,
        roster: &[Engineer],
        assignments: &[Assignment],
        exclude_id: Option<&str>,
    ) -> Result<Resolution> {
        let engineer = roster
            .iter()
            .find(|e| e.id == candidate.engineer_id)
            .ok_or_else(|| SchedulingError::UnknownEngineer(candidate.engineer_id.clone()))?;

        match self.validate(candidate, engineer, assignments, exclude_id) {
            Ok(()) => {
                tracing::debug!(
                    engineer = %engineer.id,
                    window = %candidate.window,
                    "candidate valid"
                );
                Ok(Resolution::Valid)
            }
            Err(conflict) => {
                tracing::debug!(
                    engineer = %engineer.id,
                    window = %candidate.window,
                    kind = ?conflict.kind,
                    "candidate rejected"
                );
                let remedy =
                    self.suggest(candidate, engineer, assignments, roster, &conflict, exclude_id);
                Ok(Resolution::Invalid { conflict, remedy })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EngineerLevel, HourWindow, OvernightPolicy, ShiftWindow, TaskType};
    use crate::validation::ConflictKind;
    use chrono::NaiveDate;

    fn w(start: u8, end: u8) -> HourWindow {
        HourWindow::new(start, end).unwrap()
    }

    fn roster() -> Vec<Engineer> {
        vec![
            Engineer::new("e1", EngineerLevel::L4, ShiftWindow::new(9, 18)).with_name("Rajesh"),
            Engineer::new("e3", EngineerLevel::L3, ShiftWindow::new(9, 18)).with_name("Amit"),
            Engineer::new("e4", EngineerLevel::L3, ShiftWindow::new(22, 6)).with_name("Sneha"),
        ]
    }

    fn entry(id: &str, eng: &str, start: u8, end: u8) -> Assignment {
        let date = NaiveDate::from_ymd_opt(2025, 2, 16).unwrap();
        Assignment::new(id, format!("CRQ-{id}"), eng, date, w(start, end), TaskType::MopCreation)
    }

    #[test]
    fn test_resolve_valid() {
        let resolver = ConflictResolver::default();
        let r = resolver
            .resolve(&Candidate::new("e3", w(12, 14)), &roster(), &[entry("s5", "e3", 9, 11)], None)
            .unwrap();
        assert!(r.is_valid());
        assert!(r.remedy_text().is_none());
        assert!(r.into_result(&Candidate::new("e3", w(12, 14))).is_ok());
    }

    #[test]
    fn test_resolve_conflict_with_slot() {
        let resolver = ConflictResolver::default();
        let r = resolver
            .resolve(&Candidate::new("e3", w(10, 12)), &roster(), &[entry("s5", "e3", 9, 11)], None)
            .unwrap();
        assert_eq!(r.conflict().unwrap().kind, ConflictKind::SlotConflict);
        assert_eq!(r.remedy_text().unwrap(), "Nearest free slot: 11:00–13:00");
    }

    #[test]
    fn test_resolve_unknown_engineer() {
        let resolver = ConflictResolver::default();
        let err = resolver
            .resolve(&Candidate::new("ghost", w(10, 12)), &roster(), &[], None)
            .unwrap_err();
        assert!(matches!(err, SchedulingError::UnknownEngineer(_)));
    }

    #[test]
    fn test_no_alternative_into_error() {
        // Single-engineer roster, fully booked.
        let roster = vec![Engineer::new("e1", EngineerLevel::L4, ShiftWindow::new(9, 11))];
        let booked = vec![entry("s1", "e1", 9, 11)];
        let candidate = Candidate::new("e1", w(9, 10));
        let r = ConflictResolver::default()
            .resolve(&candidate, &roster, &booked, None)
            .unwrap();
        assert_eq!(r.remedy_text().unwrap(), "No alternatives available");
        assert!(matches!(
            r.into_result(&candidate),
            Err(SchedulingError::NoAlternativeFound { .. })
        ));
    }

    #[test]
    fn test_resolver_honors_overnight_policy() {
        let candidate = Candidate::new("e4", w(1, 3));
        let split = ConflictResolver::default();
        assert!(split.resolve(&candidate, &roster(), &[], None).unwrap().is_valid());

        let reject =
            ConflictResolver::new(EngineConfig::default().with_overnight_shifts(OvernightPolicy::Reject));
        let r = reject.resolve(&candidate, &roster(), &[], None).unwrap();
        assert_eq!(r.conflict().unwrap().kind, ConflictKind::ShiftViolation);
        // An overnight shift has no hours under this policy, so nothing to offer.
        assert!(r.remedy().is_none());
        assert_eq!(r.remedy_text().unwrap(), "No alternatives available");
    }
}
