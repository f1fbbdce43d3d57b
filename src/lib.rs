//! Scheduling conflict-resolution engine for CRQ task assignment.
//!
//! Decides whether a proposed assignment of a change-request task to an
//! engineer at a given hour window is valid, and if not, proposes a
//! remedy: the nearest free slot for the same engineer, or an equally or
//! more senior engineer who is free at the requested time.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Engineer`, `EngineerLevel`, `ShiftWindow`,
//!   `HourWindow`, `Assignment`, `Schedule`, `ScheduleStore`
//! - **`validation`**: Candidate checks (shift containment, overlap) and
//!   loaded-data integrity checks
//! - **`scheduler`**: `ConflictResolver`, remedy search, `Draft` lifecycle
//!   and dashboard KPIs
//! - **`config`**: `EngineConfig`
//!
//! # Example
//!
//! ```
//! use crq_schedule::models::{Assignment, Engineer, EngineerLevel, HourWindow, ShiftWindow, TaskType};
//! use crq_schedule::scheduler::ConflictResolver;
//! use crq_schedule::validation::Candidate;
//!
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 2, 16).unwrap();
//! let roster = vec![
//!     Engineer::new("e1", EngineerLevel::L4, ShiftWindow::new(9, 18)).with_name("Rajesh Kumar"),
//! ];
//! let booked = vec![Assignment::new(
//!     "s1", "CRQ-2025-001", "e1", date,
//!     HourWindow::new(10, 12).unwrap(), TaskType::CrqReview,
//! )];
//!
//! let candidate = Candidate::new("e1", HourWindow::new(11, 13).unwrap());
//! let resolution = ConflictResolver::default()
//!     .resolve(&candidate, &roster, &booked, None)
//!     .unwrap();
//!
//! assert!(!resolution.is_valid());
//! assert_eq!(resolution.remedy_text().unwrap(), "Nearest free slot: 12:00–14:00");
//! ```
//!
//! The engine holds no state between calls and never writes to the
//! schedule; callers commit through [`models::ScheduleStore`], usually via
//! [`scheduler::Draft::commit`].

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod telemetry;
pub mod validation;

pub use error::{Result, SchedulingError};
