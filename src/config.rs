//! Engine configuration.
//!
//! Deserialized from JSON by the host application; every field has a
//! default so an empty object (`{}`) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};
use crate::models::OvernightPolicy;

/// Utilization percentages at which an engineer moves to a busier band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilizationThresholds {
    /// Above this percentage an engineer is `Moderate`.
    pub moderate_above: u32,
    /// Above this percentage an engineer is `High`.
    pub high_above: u32,
}

impl Default for UtilizationThresholds {
    fn default() -> Self {
        Self {
            moderate_above: 50,
            high_above: 80,
        }
    }
}

/// Root configuration for the conflict resolver and dashboard metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Interpretation of shifts that cross midnight.
    pub overnight_shifts: OvernightPolicy,
    /// Only suggest alternate engineers whose shift covers the requested
    /// window. Off by default: alternates are matched on level and
    /// availability alone.
    pub alternate_within_shift: bool,
    /// Utilization band thresholds.
    pub utilization: UtilizationThresholds,
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the overnight shift policy.
    pub fn with_overnight_shifts(mut self, policy: OvernightPolicy) -> Self {
        self.overnight_shifts = policy;
        self
    }

    /// Requires alternate engineers to be on shift for the requested window.
    pub fn with_alternate_within_shift(mut self, enabled: bool) -> Self {
        self.alternate_within_shift = enabled;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let t = &self.utilization;
        if t.moderate_above >= t.high_above {
            return Err(SchedulingError::Config(format!(
                "utilization.moderate_above ({}) must be below utilization.high_above ({})",
                t.moderate_above, t.high_above
            )));
        }
        if t.high_above > 100 {
            return Err(SchedulingError::Config(
                "utilization.high_above must be at most 100".into(),
            ));
        }
        Ok(())
    }
}
