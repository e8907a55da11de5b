//! Configuration for schedule computation and result classification.

use serde::{Deserialize, Serialize};

/// Configuration for the CPM engine.
///
/// None of these settings affect the computed dates; they control logging and
/// how results are classified for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
    /// Tasks with slack at or below this value (but above zero) are flagged as warnings.
    pub warning_slack_threshold: i64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            warning_slack_threshold: 2,
        }
    }
}

impl ScheduleConfig {
    /// Return a copy with a different verbosity level.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Return a copy with a different warning threshold.
    pub fn with_warning_slack_threshold(mut self, threshold: i64) -> Self {
        self.warning_slack_threshold = threshold;
        self
    }
}
