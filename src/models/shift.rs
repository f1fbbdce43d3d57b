//! Hour windows and shift models.
//!
//! All times are whole hours on a single calendar date (`0..=24`).
//! Assignment intervals and shift intervals are half-open: `[start, end)`.
//!
//! # Overnight shifts
//! A shift whose start is later than its end (e.g. `22–6`) covers the
//! night. On one calendar date it is represented by two sub-intervals,
//! `[0, end)` and `[start, 24)`. A window is inside such a shift iff it
//! fits entirely inside one of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

/// Last hour boundary of a calendar day.
pub const HOURS_PER_DAY: u8 = 24;

/// A half-open hour interval `[start_hour, end_hour)` on one date.
///
/// Always has a positive duration and never extends past hour 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWindow")]
pub struct HourWindow {
    start_hour: u8,
    end_hour: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWindow {
    start_hour: u8,
    end_hour: u8,
}

impl TryFrom<RawWindow> for HourWindow {
    type Error = SchedulingError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        Self::new(raw.start_hour, raw.end_hour)
    }
}

impl HourWindow {
    /// Creates a window, rejecting non-positive durations and hours past 24.
    pub fn new(start_hour: u8, end_hour: u8) -> Result<Self> {
        if start_hour >= end_hour || end_hour > HOURS_PER_DAY {
            return Err(SchedulingError::InvalidInterval {
                start_hour,
                end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    /// Inclusive start hour.
    #[inline]
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// Exclusive end hour.
    #[inline]
    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Length in hours.
    #[inline]
    pub fn duration(&self) -> u8 {
        self.end_hour - self.start_hour
    }

    /// Whether an hour falls within this window.
    #[inline]
    pub fn contains_hour(&self, hour: u8) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }

    /// Whether `other` lies entirely inside this window.
    pub fn covers(&self, other: &Self) -> bool {
        other.start_hour >= self.start_hour && other.end_hour <= self.end_hour
    }

    /// Whether two windows intersect.
    ///
    /// Touching windows (`10–12` and `12–14`) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.end_hour <= other.start_hour || self.start_hour >= other.end_hour)
    }
}

impl fmt::Display for HourWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00–{}:00", self.start_hour, self.end_hour)
    }
}

/// How shifts that cross midnight are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvernightPolicy {
    /// Split into `[start, 24)` and `[0, end)` on the same date.
    #[default]
    SplitAtMidnight,
    /// Treat overnight shifts as having no working hours on any date.
    Reject,
}

/// An engineer's working hours.
///
/// `start_hour < end_hour` is a day shift, `start_hour > end_hour` an
/// overnight shift and `start_hour == end_hour` an empty shift.
///
/// Serialized as flat `shiftStart` / `shiftEnd` fields so it can be
/// flattened into roster records. Deserializing rejects hours above 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawShift")]
pub struct ShiftWindow {
    /// Shift start hour (inclusive).
    #[serde(rename = "shiftStart")]
    pub start_hour: u8,
    /// Shift end hour (exclusive).
    #[serde(rename = "shiftEnd")]
    pub end_hour: u8,
}

#[derive(Deserialize)]
struct RawShift {
    #[serde(rename = "shiftStart")]
    start_hour: u8,
    #[serde(rename = "shiftEnd")]
    end_hour: u8,
}

impl TryFrom<RawShift> for ShiftWindow {
    type Error = SchedulingError;

    fn try_from(raw: RawShift) -> Result<Self> {
        if raw.start_hour > HOURS_PER_DAY || raw.end_hour > HOURS_PER_DAY {
            return Err(SchedulingError::InvalidInterval {
                start_hour: raw.start_hour,
                end_hour: raw.end_hour,
            });
        }
        Ok(Self {
            start_hour: raw.start_hour,
            end_hour: raw.end_hour,
        })
    }
}

impl ShiftWindow {
    /// Creates a shift window. Hours above 24 are clamped.
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour: start_hour.min(HOURS_PER_DAY),
            end_hour: end_hour.min(HOURS_PER_DAY),
        }
    }

    /// Whether the shift crosses midnight.
    #[inline]
    pub fn is_overnight(&self) -> bool {
        self.start_hour > self.end_hour
    }

    /// Whether the shift has no working hours.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_hour == self.end_hour
    }

    /// Total shift length in hours.
    pub fn hours(&self) -> u8 {
        if self.is_overnight() {
            HOURS_PER_DAY - self.start_hour + self.end_hour
        } else {
            self.end_hour - self.start_hour
        }
    }

    /// The same-date sub-intervals covered by this shift, in shift order.
    ///
    /// A day shift yields one window. An overnight shift yields the
    /// evening part first, then the early-morning part. Zero-length parts
    /// (e.g. a `22–0` shift) are omitted.
    pub fn segments(&self) -> Vec<HourWindow> {
        self.segments_for(OvernightPolicy::default())
    }

    /// Like [`segments`](Self::segments), under an explicit overnight policy.
    pub fn segments_for(&self, policy: OvernightPolicy) -> Vec<HourWindow> {
        if !self.is_overnight() {
            return HourWindow::new(self.start_hour, self.end_hour)
                .into_iter()
                .collect();
        }
        match policy {
            OvernightPolicy::Reject => Vec::new(),
            OvernightPolicy::SplitAtMidnight => [
                HourWindow::new(self.start_hour, HOURS_PER_DAY),
                HourWindow::new(0, self.end_hour),
            ]
            .into_iter()
            .filter_map(|w| w.ok())
            .collect(),
        }
    }

    /// Whether a window lies entirely inside the shift.
    pub fn contains(&self, window: &HourWindow) -> bool {
        self.contains_for(window, OvernightPolicy::default())
    }

    /// Like [`contains`](Self::contains), under an explicit overnight policy.
    pub fn contains_for(&self, window: &HourWindow, policy: OvernightPolicy) -> bool {
        self.segments_for(policy).iter().any(|seg| seg.covers(window))
    }

    /// Whether an hour is within working time.
    pub fn contains_hour(&self, hour: u8) -> bool {
        self.segments().iter().any(|seg| seg.contains_hour(hour))
    }

    /// Window-start hours at which a slot of `duration` hours fits in the
    /// shift, in shift order (earliest in the shift first).
    pub fn slot_starts(&self, duration: u8) -> Vec<u8> {
        self.slot_starts_for(duration, OvernightPolicy::default())
    }

    /// Like [`slot_starts`](Self::slot_starts), under an explicit overnight policy.
    pub fn slot_starts_for(&self, duration: u8, policy: OvernightPolicy) -> Vec<u8> {
        self.segments_for(policy)
            .iter()
            .filter(|seg| seg.duration() >= duration)
            .flat_map(|seg| seg.start_hour()..=seg.end_hour() - duration)
            .collect()
    }
}

impl fmt::Display for ShiftWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00–{}:00", self.start_hour, self.end_hour)
    }
}
