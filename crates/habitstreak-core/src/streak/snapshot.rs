use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::period::Cadence;

/// Result of one streak computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    /// Consecutive completed periods counting back from now
    pub current_streak: u32,
    /// Longest run ever achieved, never below `current_streak`
    pub best_streak: u32,
    /// Anchor of the oldest period in the current run
    pub streak_start_date: Option<DateTime<Utc>>,
    pub total_completed_periods: u32,
    pub total_periods: u32,
    /// The current period is not completed yet
    pub at_risk: bool,
    pub cadence: Cadence,
    /// The "now" the snapshot was computed against
    pub computed_at: DateTime<Utc>,
}

impl StreakSnapshot {
    /// Snapshot for a habit with no history.
    pub fn empty(cadence: Cadence, computed_at: DateTime<Utc>) -> Self {
        Self {
            current_streak: 0,
            best_streak: 0,
            streak_start_date: None,
            total_completed_periods: 0,
            total_periods: 0,
            at_risk: true,
            cadence,
            computed_at,
        }
    }

    /// Share of recorded periods that were completed (0.0 to 1.0).
    pub fn completion_rate(&self) -> f64 {
        if self.total_periods == 0 {
            return 0.0;
        }
        f64::from(self.total_completed_periods) / f64::from(self.total_periods)
    }
}
