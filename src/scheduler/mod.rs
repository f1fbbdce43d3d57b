//! Conflict resolution, candidate lifecycle and dashboard KPIs.
//!
//! # Algorithm
//!
//! [`ConflictResolver`] validates a candidate (shift containment, then
//! overlap) and, when it fails, runs the two-step remedy search in
//! [`suggest`]: nearest free slot for the same engineer, then the first
//! equal-or-more-senior engineer free for the same window.
//!
//! [`Draft`] wraps a candidate for the creation dialog and the
//! drag-to-reschedule gesture and only lets a validated candidate reach
//! the store.
//!
//! # KPI
//!
//! [`kpi`] computes utilization, free capacity, headline stats and
//! per-requestor, per-level, per-domain and per-team breakdowns for a
//! date's schedule.

mod draft;
pub mod kpi;
mod resolver;
pub mod suggest;

pub use draft::{Draft, DraftState};
pub use kpi::{DashboardStats, EngineerUtilization, LevelWorkload, UtilizationBand, Workload};
pub use resolver::{ConflictResolver, Resolution};
pub use suggest::{suggest, suggest_with_config, Suggestion};
