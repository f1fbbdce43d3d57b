//! Remedy search for failed candidates.
//!
//! # Algorithm
//!
//! A shift violation needs no search: the remedy is the engineer's own
//! shift. For a slot conflict two strategies run in order, and the first
//! that finds something wins:
//!
//! 1. **Nearest free slot**: keep the engineer and duration, scan start
//!    hours from the beginning of the shift and take the first window that
//!    overlaps none of the engineer's assignments.
//! 2. **Alternate engineer**: keep the window, take the first engineer in
//!    pool order who is at least as senior and has nothing overlapping it.
//!
//! Changing both engineer and time is never attempted.
//!
//! # Complexity
//! O(s * n) for strategy 1 and O(p * n) for strategy 2, where s = slot
//! starts in the shift, p = pool size, n = assignments on the date.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::models::{Assignment, Engineer, EngineerLevel, HourWindow, ShiftWindow};
use crate::validation::{first_overlap, Candidate, Conflict, ConflictKind};

/// A proposed fix for a rejected candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    /// Reschedule inside the engineer's shift.
    WithinShift {
        /// Engineer whose shift was violated.
        engineer_id: String,
        /// That engineer's shift.
        shift: ShiftWindow,
    },
    /// Same engineer, earliest free window of the same duration.
    FreeSlot {
        /// Original engineer.
        engineer_id: String,
        /// Free window.
        window: HourWindow,
    },
    /// Same window, a different engineer of equal or higher level.
    AlternateEngineer {
        /// Substitute engineer ID.
        engineer_id: String,
        /// Substitute display name.
        name: String,
        /// Substitute level.
        level: EngineerLevel,
    },
}

impl Suggestion {
    /// Applies the suggestion to a candidate, yielding the candidate it
    /// proposes. `WithinShift` has no single concrete placement and
    /// returns `None`.
    pub fn apply(&self, candidate: &Candidate) -> Option<Candidate> {
        match self {
            Self::WithinShift { .. } => None,
            Self::FreeSlot {
                engineer_id,
                window,
            } => Some(Candidate::new(engineer_id.clone(), *window)),
            Self::AlternateEngineer { engineer_id, .. } => {
                Some(Candidate::new(engineer_id.clone(), candidate.window))
            }
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithinShift { shift, .. } => write!(f, "Schedule within {shift}"),
            Self::FreeSlot { window, .. } => write!(f, "Nearest free slot: {window}"),
            Self::AlternateEngineer { name, level, .. } => {
                write!(f, "Alternate engineer: {name} ({level})")
            }
        }
    }
}

/// Searches for a remedy using the default configuration.
///
/// `all_assignments` is every assignment on the target date; `pool` is the
/// roster to draw substitutes from (the original engineer is skipped).
/// Returns `None` when no free slot or substitute exists.
pub fn suggest(
    candidate: &Candidate,
    engineer: &Engineer,
    all_assignments: &[Assignment],
    pool: &[Engineer],
    failure: &Conflict,
    exclude_id: Option<&str>,
) -> Option<Suggestion> {
    suggest_with_config(
        &EngineConfig::default(),
        candidate,
        engineer,
        all_assignments,
        pool,
        failure,
        exclude_id,
    )
}

/// [`suggest`] under an explicit configuration.
pub fn suggest_with_config(
    config: &EngineConfig,
    candidate: &Candidate,
    engineer: &Engineer,
    all_assignments: &[Assignment],
    pool: &[Engineer],
    failure: &Conflict,
    exclude_id: Option<&str>,
) -> Option<Suggestion> {
    if failure.kind == ConflictKind::ShiftViolation {
        if engineer.shift.segments_for(config.overnight_shifts).is_empty() {
            tracing::warn!(
                engineer = %engineer.id,
                shift = %engineer.shift,
                "shift has no schedulable hours"
            );
            return None;
        }
        return Some(Suggestion::WithinShift {
            engineer_id: engineer.id.clone(),
            shift: engineer.shift,
        });
    }

    let duration = candidate.window.duration();
    if let Some(window) = nearest_free_slot(config, engineer, duration, all_assignments, exclude_id)
    {
        tracing::debug!(engineer = %engineer.id, %window, "found free slot");
        return Some(Suggestion::FreeSlot {
            engineer_id: engineer.id.clone(),
            window,
        });
    }

    let alt = alternate_engineer(
        config,
        engineer,
        &candidate.window,
        all_assignments,
        pool,
        exclude_id,
    );
    if let Some(alt) = alt {
        tracing::debug!(engineer = %engineer.id, alternate = %alt.id, "found alternate engineer");
        return Some(Suggestion::AlternateEngineer {
            engineer_id: alt.id.clone(),
            name: alt.display_name().to_string(),
            level: alt.level,
        });
    }

    tracing::warn!(
        engineer = %engineer.id,
        window = %candidate.window,
        "no alternatives available"
    );
    None
}

/// Strategy 1: earliest window of `duration` hours in the engineer's shift
/// that overlaps none of their assignments.
pub fn nearest_free_slot(
    config: &EngineConfig,
    engineer: &Engineer,
    duration: u8,
    all_assignments: &[Assignment],
    exclude_id: Option<&str>,
) -> Option<HourWindow> {
    engineer
        .shift
        .slot_starts_for(duration, config.overnight_shifts)
        .into_iter()
        .filter_map(|h| HourWindow::new(h, h + duration).ok())
        .find(|w| first_overlap(&engineer.id, w, all_assignments, exclude_id).is_none())
}

/// Strategy 2: first pool engineer, other than `engineer`, who is at least
/// as senior and free for `window`.
pub fn alternate_engineer<'a>(
    config: &EngineConfig,
    engineer: &Engineer,
    window: &HourWindow,
    all_assignments: &[Assignment],
    pool: &'a [Engineer],
    exclude_id: Option<&str>,
) -> Option<&'a Engineer> {
    pool.iter().find(|e| {
        e.id != engineer.id
            && e.level.at_least(engineer.level)
            && (!config.alternate_within_shift
                || e.shift.contains_for(window, config.overnight_shifts))
            && first_overlap(&e.id, window, all_assignments, exclude_id).is_none()
    })
}
