//! Milestone ladder for streak lengths.
//!
//! Maps a streak onto a fixed ladder of thresholds, reports progress toward
//! the next rung, and detects which rungs a streak change has just crossed so
//! the UI can celebrate them once.

use serde::Serialize;

use crate::error::ValidationError;
use crate::streak::StreakSnapshot;

/// A rung on the achievement ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MilestoneThreshold {
    pub value: u32,
    pub label: &'static str,
    pub description: &'static str,
}

impl MilestoneThreshold {
    pub const fn new(value: u32, label: &'static str, description: &'static str) -> Self {
        Self {
            value,
            label,
            description,
        }
    }
}

/// Default ladder, ascending.
pub static MILESTONES: [MilestoneThreshold; 8] = [
    MilestoneThreshold::new(3, "Primeros pasos", "Tres periodos seguidos"),
    MilestoneThreshold::new(7, "Crecimiento", "Una semana de constancia"),
    MilestoneThreshold::new(14, "Constancia", "Dos semanas sin fallar"),
    MilestoneThreshold::new(21, "Hábito formado", "Tres semanas: el hábito echa raíces"),
    MilestoneThreshold::new(30, "Disciplina", "Un mes completo"),
    MilestoneThreshold::new(50, "Dedicación", "Cincuenta periodos seguidos"),
    MilestoneThreshold::new(100, "Maestría", "Cien periodos seguidos"),
    MilestoneThreshold::new(365, "Leyenda", "Un año entero"),
];

/// Where a streak sits on the ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneState {
    pub streak: u32,
    /// Highest threshold reached, if any
    pub current: Option<MilestoneThreshold>,
    /// Lowest threshold not yet reached, if any
    pub next: Option<MilestoneThreshold>,
    /// Fraction of the way from `current` (or zero) to `next` (0.0 to 1.0)
    pub progress: f64,
}

/// Reads streak lengths against a ladder.
#[derive(Debug, Clone, Copy)]
pub struct MilestoneTracker {
    ladder: &'static [MilestoneThreshold],
}

impl Default for MilestoneTracker {
    fn default() -> Self {
        Self {
            ladder: &MILESTONES,
        }
    }
}

impl MilestoneTracker {
    /// Tracker over a custom ladder.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnorderedLadder`] unless thresholds are
    /// strictly ascending.
    pub fn new(ladder: &'static [MilestoneThreshold]) -> Result<Self, ValidationError> {
        if let Some(index) = ladder
            .windows(2)
            .position(|pair| pair[0].value >= pair[1].value)
        {
            return Err(ValidationError::UnorderedLadder { index: index + 1 });
        }
        Ok(Self { ladder })
    }

    pub fn ladder(&self) -> &'static [MilestoneThreshold] {
        self.ladder
    }

    /// Last threshold at or below `streak`.
    pub fn current_milestone(&self, streak: u32) -> Option<MilestoneThreshold> {
        self.ladder.iter().rev().find(|m| m.value <= streak).copied()
    }

    /// First threshold above `streak`.
    pub fn next_milestone(&self, streak: u32) -> Option<MilestoneThreshold> {
        self.ladder.iter().find(|m| m.value > streak).copied()
    }

    /// Progress from the previous threshold (or zero) to the next one.
    /// Returns 1.0 once the ladder is exhausted.
    pub fn progress(&self, streak: u32) -> f64 {
        let Some(next) = self.next_milestone(streak) else {
            return 1.0;
        };
        let floor = self.current_milestone(streak).map_or(0, |m| m.value);
        let span = f64::from(next.value - floor);
        (f64::from(streak - floor) / span).clamp(0.0, 1.0)
    }

    /// Thresholds crossed going from `old_streak` to `new_streak`
    /// (`old < value <= new`). Empty when the streak did not grow.
    pub fn newly_unlocked(&self, old_streak: u32, new_streak: u32) -> Vec<MilestoneThreshold> {
        self.ladder
            .iter()
            .filter(|m| old_streak < m.value && m.value <= new_streak)
            .copied()
            .collect()
    }

    pub fn state(&self, streak: u32) -> MilestoneState {
        MilestoneState {
            streak,
            current: self.current_milestone(streak),
            next: self.next_milestone(streak),
            progress: self.progress(streak),
        }
    }

    /// State for a snapshot's current streak.
    pub fn state_for(&self, snapshot: &StreakSnapshot) -> MilestoneState {
        self.state(snapshot.current_streak)
    }
}
