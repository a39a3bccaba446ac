//! # Habitstreak Core Library
//!
//! This library provides the streak/continuity engine for the Habitstreak
//! habit tracker. It follows a CLI-first philosophy: the engine is a plain
//! library, and the CLI binary and any GUI are thin layers over it.
//!
//! ## Architecture
//!
//! - **Clock**: injectable source of "now" and the local calendar, so
//!   results are reproducible and time travel is just another clock
//! - **Periods**: cadence strategies and the indexer that collapses raw
//!   completion records into canonical day or ISO-week buckets
//! - **Streaks**: pure functions for the current run, best run, risk flag and
//!   start date, plus [`StreakEngine`] which assembles a [`StreakSnapshot`]
//! - **Milestones**: the achievement ladder and progress toward the next rung
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: Snapshot computation bound to a [`Clock`]
//! - [`PeriodKeyStrategy`]: Trait for adding cadences
//! - [`MilestoneTracker`]: Ladder lookup and unlock detection
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod config;
pub mod error;
pub mod milestone;
pub mod period;
pub mod records;
pub mod streak;

pub use clock::{Calendar, Clock, FixedClock, SystemClock, TimeTravelClock};
pub use config::Config;
pub use error::{ConfigError, CoreError, RecordsError, ValidationError};
pub use milestone::{MilestoneState, MilestoneThreshold, MilestoneTracker, MILESTONES};
pub use period::{
    index, index_for_cadence, Cadence, CompletionRecord, DailyStrategy, Period, PeriodKey,
    PeriodKeyStrategy, WeeklyStrategy,
};
pub use streak::{StreakEngine, StreakSnapshot};
