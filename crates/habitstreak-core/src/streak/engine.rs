//! Streak computation over indexed periods.
//!
//! Every function here is pure: the same periods, strategy and "today" always
//! give the same answer. Inputs may arrive in any order; each function sorts
//! what it needs.

use chrono::{DateTime, NaiveDate, Utc};

use super::snapshot::StreakSnapshot;
use crate::clock::Clock;
use crate::period::{index, Cadence, CompletionRecord, Period, PeriodKeyStrategy};

/// Start of the bucket one unit before `start`. A failed step leaves `start`
/// unchanged, so the caller sees the next older period as a gap.
fn previous_start(strategy: &dyn PeriodKeyStrategy, start: NaiveDate) -> NaiveDate {
    strategy
        .step_back(start)
        .map(|prev| strategy.start_of_period(prev))
        .unwrap_or(start)
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Length of the unbroken run of completed periods ending at `today`.
///
/// The current period gets a grace window: while it is absent or not yet
/// completed it neither counts nor breaks the run, and the walk starts from
/// the previous period instead. An explicit incomplete record for the
/// current period is treated the same as no record. Any elapsed period that
/// is incomplete or missing ends the run.
pub fn current_streak(
    periods: &[Period],
    strategy: &dyn PeriodKeyStrategy,
    today: NaiveDate,
) -> u32 {
    let current_key = strategy.period_key(today);
    let current_start = strategy.start_of_period(today);

    let mut recent_first: Vec<&Period> = periods.iter().collect();
    recent_first.sort_by(|a, b| b.start.cmp(&a.start));

    let current_done = recent_first
        .iter()
        .any(|p| p.key == current_key && p.completed);

    let mut expected = if current_done {
        current_start
    } else {
        previous_start(strategy, current_start)
    };
    let mut expected_key = strategy.period_key(expected);
    let mut streak: u32 = 0;

    for period in recent_first {
        if period.start > expected {
            // Future records, or the current period skipped by the grace window.
            continue;
        }

        if period.key != expected_key {
            // Older than expected: at least one period is missing.
            break;
        }

        if !period.completed {
            break;
        }

        streak = streak.saturating_add(1);
        expected = previous_start(strategy, expected);
        expected_key = strategy.period_key(expected);
    }

    streak
}

/// Longest run of consecutive completed periods anywhere in the history.
pub fn best_streak(periods: &[Period], strategy: &dyn PeriodKeyStrategy) -> u32 {
    let mut ordered: Vec<&Period> = periods.iter().collect();
    ordered.sort_by_key(|p| p.start);

    let mut best: u32 = 0;
    let mut running: u32 = 0;
    let mut previous: Option<&Period> = None;

    for period in ordered {
        running = if !period.completed {
            0
        } else {
            match previous {
                Some(prev) if prev.completed && strategy.is_adjacent(prev.start, period.start) => {
                    running.saturating_add(1)
                }
                _ => 1,
            }
        };
        best = best.max(running);
        previous = Some(period);
    }

    best
}

/// True when the period containing `today` is missing or not completed.
pub fn at_risk(periods: &[Period], strategy: &dyn PeriodKeyStrategy, today: NaiveDate) -> bool {
    let current_key = strategy.period_key(today);
    !periods.iter().any(|p| p.key == current_key && p.completed)
}

/// Anchor of the oldest period inside a run of `current_streak` periods.
///
/// Expects `periods` not to contain anything after the current period.
pub fn streak_start_date(periods: &[Period], current_streak: u32) -> Option<DateTime<Utc>> {
    let depth = usize::try_from(current_streak).ok()?.checked_sub(1)?;

    let mut completed: Vec<&Period> = periods.iter().filter(|p| p.completed).collect();
    completed.sort_by(|a, b| b.start.cmp(&a.start));
    completed.get(depth).map(|p| p.anchor)
}

/// Stateless streak calculator bound to a clock.
#[derive(Debug, Clone)]
pub struct StreakEngine<C> {
    clock: C,
}

impl<C: Clock> StreakEngine<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Index `records` and compute a snapshot.
    ///
    /// `records` must already be filtered to a single habit with this
    /// cadence; the engine does not check `habit_id`.
    pub fn snapshot(&self, records: &[CompletionRecord], cadence: Cadence) -> StreakSnapshot {
        let periods = index(records, cadence.strategy(), self.clock.calendar());
        self.snapshot_from_periods(&periods, cadence)
    }

    /// Compute a snapshot from periods indexed with `cadence`'s strategy.
    ///
    /// Periods that start after the current one are ignored.
    pub fn snapshot_from_periods(&self, periods: &[Period], cadence: Cadence) -> StreakSnapshot {
        let now = self.clock.now();
        let today = self.clock.calendar().local_date(now);
        let strategy = cadence.strategy();
        let current_start = strategy.start_of_period(today);

        let elapsed: Vec<Period> = periods
            .iter()
            .filter(|p| p.start <= current_start)
            .cloned()
            .collect();

        if elapsed.is_empty() {
            return StreakSnapshot::empty(cadence, now);
        }

        let current = current_streak(&elapsed, strategy, today);
        let best = best_streak(&elapsed, strategy).max(current);

        StreakSnapshot {
            current_streak: current,
            best_streak: best,
            streak_start_date: streak_start_date(&elapsed, current),
            total_completed_periods: count(elapsed.iter().filter(|p| p.completed).count()),
            total_periods: count(elapsed.len()),
            at_risk: at_risk(&elapsed, strategy, today),
            cadence,
            computed_at: now,
        }
    }
}
