use chrono::{DateTime, Utc};
use clap::Args;
use habitstreak_core::records::load_for_habit;
use habitstreak_core::{
    Cadence, Clock, Config, FixedClock, MilestoneState, MilestoneThreshold, MilestoneTracker,
    StreakEngine, StreakSnapshot, SystemClock, TimeTravelClock,
};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Args)]
pub struct StreakArgs {
    /// JSON file holding an array of completion records
    #[arg(long)]
    records: PathBuf,
    /// Habit to compute the streak for
    #[arg(long)]
    habit: Uuid,
    /// Habit cadence (daily, weekly); defaults to engine.default_cadence
    #[arg(long)]
    cadence: Option<Cadence>,
    /// Evaluate at this instant (RFC 3339) instead of the system clock
    #[arg(long)]
    now: Option<DateTime<Utc>>,
    /// Shift "now" by this many days; defaults to demo.time_travel_days
    #[arg(long, allow_hyphen_values = true)]
    offset_days: Option<i64>,
    /// Streak before the latest change, to report newly unlocked milestones
    #[arg(long)]
    previous_streak: Option<u32>,
}

#[derive(Serialize)]
struct StreakReport {
    habit_id: Uuid,
    snapshot: StreakSnapshot,
    completion_rate: f64,
    milestones: MilestoneState,
    #[serde(skip_serializing_if = "Option::is_none")]
    newly_unlocked: Option<Vec<MilestoneThreshold>>,
}

pub fn run(args: StreakArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let calendar = config.calendar()?;
    let cadence = args.cadence.unwrap_or(config.engine.default_cadence);
    let offset_days = args.offset_days.unwrap_or(config.demo.time_travel_days);

    let base: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(FixedClock::with_calendar(now, calendar)),
        None => Box::new(SystemClock::new(calendar)),
    };
    if offset_days != 0 {
        tracing::info!("Time travel active: shifting now by {} days", offset_days);
    }
    let clock = TimeTravelClock::new(base, offset_days);

    let records = load_for_habit(&args.records, args.habit)?;
    tracing::debug!(
        "Loaded {} records for habit {} from {}",
        records.len(),
        args.habit,
        args.records.display()
    );

    let engine = StreakEngine::new(clock);
    let snapshot = engine.snapshot(&records, cadence);
    tracing::debug!(
        "Computed {} streak at {}: current={} best={} at_risk={}",
        cadence,
        snapshot.computed_at,
        snapshot.current_streak,
        snapshot.best_streak,
        snapshot.at_risk
    );

    let tracker = MilestoneTracker::default();
    let newly_unlocked = args.previous_streak.map(|previous| {
        let unlocked = tracker.newly_unlocked(previous, snapshot.current_streak);
        for milestone in &unlocked {
            tracing::info!("Milestone unlocked: {} ({})", milestone.label, milestone.value);
        }
        unlocked
    });

    let report = StreakReport {
        habit_id: args.habit,
        completion_rate: snapshot.completion_rate(),
        milestones: tracker.state_for(&snapshot),
        snapshot,
        newly_unlocked,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
