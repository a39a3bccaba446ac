//! Streak engine: current and best runs, risk, and the snapshot value type.

mod engine;
mod snapshot;

pub use engine::{at_risk, best_streak, current_streak, streak_start_date, StreakEngine};
pub use snapshot::StreakSnapshot;
