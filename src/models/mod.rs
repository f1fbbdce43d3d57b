//! Scheduling domain models.
//!
//! Provides the data types the conflict-resolution engine works over:
//! the engineer roster, hour and shift windows, CRQ assignments and the
//! caller-owned schedule store.
//!
//! # Domain Mappings
//!
//! | crq-schedule | Meaning |
//! |--------------|---------|
//! | Engineer | Roster entry with level, domain, shift and skills |
//! | ShiftWindow | Working hours, possibly crossing midnight |
//! | HourWindow | Half-open hour interval on one date |
//! | Assignment | A CRQ task placed on an engineer, date and window |
//! | Schedule | In-memory assignment store owned by the caller |

mod assignment;
mod engineer;
mod schedule;
mod shift;

pub use assignment::{Assignment, RequestorType, SlaStatus, TaskDetails, TaskType};
pub use engineer::{Engineer, EngineerLevel, Team};
pub use schedule::{Schedule, ScheduleStore};
pub use shift::{HourWindow, OvernightPolicy, ShiftWindow, HOURS_PER_DAY};
