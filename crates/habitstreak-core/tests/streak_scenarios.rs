//! Integration tests for the streak engine and milestone ladder.
//!
//! Each test builds a habit history relative to a fixed "now" and checks the
//! snapshot the engine produces.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};
use habitstreak_core::streak::{best_streak, current_streak};
use habitstreak_core::{
    index, Cadence, Calendar, CompletionRecord, FixedClock, MilestoneTracker, PeriodKey,
    PeriodKeyStrategy, StreakEngine, TimeTravelClock,
};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 18, 10, 30, 0).unwrap()
}

fn day(offset: i64) -> DateTime<Utc> {
    now() + Duration::days(offset)
}

fn records(habit: Uuid, marks: &[(i64, bool)]) -> Vec<CompletionRecord> {
    marks
        .iter()
        .map(|&(offset, done)| CompletionRecord::new(habit, day(offset), done))
        .collect()
}

fn engine() -> StreakEngine<FixedClock> {
    StreakEngine::new(FixedClock::new(now()))
}

#[test]
fn test_four_day_run_including_today() {
    let habit = Uuid::new_v4();
    let history = records(habit, &[(-3, true), (-2, true), (-1, true), (0, true)]);

    let snapshot = engine().snapshot(&history, Cadence::Daily);

    assert_eq!(snapshot.current_streak, 4);
    assert_eq!(snapshot.best_streak, 4);
    assert!(!snapshot.at_risk);
    assert_eq!(snapshot.streak_start_date, Some(day(-3)));
    assert_eq!(snapshot.total_periods, 4);
    assert_eq!(snapshot.total_completed_periods, 4);
}

#[test]
fn test_nothing_recorded_today_keeps_streak() {
    let habit = Uuid::new_v4();
    let history = records(habit, &[(-2, true), (-1, true)]);

    let snapshot = engine().snapshot(&history, Cadence::Daily);

    assert_eq!(snapshot.current_streak, 2);
    assert!(snapshot.at_risk);
    assert_eq!(snapshot.streak_start_date, Some(day(-2)));
}

#[test]
fn test_explicit_incomplete_today_is_treated_as_open() {
    let habit = Uuid::new_v4();
    let history = records(habit, &[(-1, true), (0, false)]);

    let snapshot = engine().snapshot(&history, Cadence::Daily);

    assert_eq!(snapshot.current_streak, 1);
    assert!(snapshot.at_risk);
    assert_eq!(snapshot.streak_start_date, Some(day(-1)));
}

#[test]
fn test_gap_between_isolated_days() {
    let habit = Uuid::new_v4();
    let history = records(habit, &[(-5, true), (-1, true)]);

    let snapshot = engine().snapshot(&history, Cadence::Daily);

    assert_eq!(snapshot.current_streak, 1);
    assert_eq!(snapshot.best_streak, 1);
    assert!(snapshot.at_risk);
}

#[test]
fn test_weekly_run_with_open_current_week() {
    let habit = Uuid::new_v4();
    // ISO weeks 1-3 of 2024 start on Jan 1, 8 and 15.
    let history: Vec<_> = [(1, 2), (1, 10), (1, 17)]
        .iter()
        .map(|&(m, d)| {
            CompletionRecord::new(habit, Utc.with_ymd_and_hms(2024, m, d, 19, 0, 0).unwrap(), true)
        })
        .collect();
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 24, 9, 0, 0).unwrap());

    let snapshot = StreakEngine::new(clock).snapshot(&history, Cadence::Weekly);

    assert_eq!(snapshot.current_streak, 3);
    assert!(snapshot.at_risk);
    assert_eq!(snapshot.cadence, Cadence::Weekly);
}

fn weekly_records(habit: Uuid, marks: &[(u32, u32, bool)]) -> Vec<CompletionRecord> {
    marks
        .iter()
        .map(|&(m, d, done)| {
            CompletionRecord::new(habit, Utc.with_ymd_and_hms(2024, m, d, 9, 0, 0).unwrap(), done)
        })
        .collect()
}

#[test]
fn test_weekly_missing_week_breaks_run() {
    let habit = Uuid::new_v4();
    // Weeks 1, 2 and 4 of 2024; week 3 has no record.
    let history = weekly_records(habit, &[(1, 2, true), (1, 9, true), (1, 23, true)]);
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap());

    let snapshot = StreakEngine::new(clock).snapshot(&history, Cadence::Weekly);

    assert_eq!(snapshot.current_streak, 1);
    assert_eq!(snapshot.best_streak, 2);
    assert!(snapshot.at_risk);
    assert_eq!(
        snapshot.streak_start_date,
        Some(Utc.with_ymd_and_hms(2024, 1, 23, 9, 0, 0).unwrap())
    );
}

#[test]
fn test_weekly_elapsed_incomplete_week_breaks_run() {
    let habit = Uuid::new_v4();
    // Week 3 explicitly incomplete, weeks 4 and 5 done, now in week 6.
    let history = weekly_records(habit, &[(1, 17, false), (1, 23, true), (1, 30, true)]);
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 7, 9, 0, 0).unwrap());

    let snapshot = StreakEngine::new(clock).snapshot(&history, Cadence::Weekly);

    assert_eq!(snapshot.current_streak, 2);
    assert_eq!(snapshot.best_streak, 2);
    assert_eq!(snapshot.total_periods, 3);
    assert_eq!(snapshot.total_completed_periods, 2);
    assert_eq!(
        snapshot.streak_start_date,
        Some(Utc.with_ymd_and_hms(2024, 1, 23, 9, 0, 0).unwrap())
    );
}

#[test]
fn test_records_at_chrono_range_edges() {
    let habit = Uuid::new_v4();
    let history = vec![
        CompletionRecord::new(habit, DateTime::<Utc>::MAX_UTC, true),
        CompletionRecord::new(habit, DateTime::<Utc>::MIN_UTC, true),
    ];

    // Time travel past either edge is ignored, so "now" stays on the edge.
    let edges = [
        (DateTime::<Utc>::MAX_UTC, 14 * 60, 3),
        (DateTime::<Utc>::MIN_UTC, -14 * 60, -3),
    ];
    for (now, minutes, days) in edges {
        let calendar = Calendar::from_offset_minutes(minutes).unwrap();
        let clock = TimeTravelClock::new(FixedClock::with_calendar(now, calendar), days);

        for cadence in [Cadence::Daily, Cadence::Weekly] {
            let snapshot = StreakEngine::new(clock.clone()).snapshot(&history, cadence);
            assert_eq!(snapshot.current_streak, 1, "{cadence} at {now}");
            assert_eq!(snapshot.computed_at, now);
        }
    }
}

#[test]
fn test_milestone_at_seven_days() {
    let habit = Uuid::new_v4();
    let marks: Vec<_> = (-6..=0).map(|d| (d, true)).collect();
    let snapshot = engine().snapshot(&records(habit, &marks), Cadence::Daily);
    assert_eq!(snapshot.current_streak, 7);

    let tracker = MilestoneTracker::default();
    let state = tracker.state_for(&snapshot);

    assert_eq!(state.current.map(|m| m.label), Some("Crecimiento"));
    assert_eq!(state.next.map(|m| m.value), Some(14));
    assert_eq!(state.progress, 0.0);

    let nearly = tracker.state(13);
    assert!(nearly.progress > 0.8 && nearly.progress < 1.0);
}

#[test]
fn test_completing_today_unlocks_milestone() {
    let habit = Uuid::new_v4();
    let mut history = records(habit, &[(-2, true), (-1, true)]);
    let tracker = MilestoneTracker::default();

    let before = engine().snapshot(&history, Cadence::Daily);
    history.push(CompletionRecord::new(habit, day(0), true));
    let after = engine().snapshot(&history, Cadence::Daily);

    let unlocked = tracker.newly_unlocked(before.current_streak, after.current_streak);
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].value, 3);
    assert!(!after.at_risk);
}

#[test]
fn test_duplicate_records_merge() {
    let habit = Uuid::new_v4();
    let history = records(habit, &[(-1, false), (-1, true), (-1, false), (0, true)]);

    let snapshot = engine().snapshot(&history, Cadence::Daily);

    assert_eq!(snapshot.total_periods, 2);
    assert_eq!(snapshot.current_streak, 2);
}

#[test]
fn test_elapsed_incomplete_day_breaks_streak() {
    let habit = Uuid::new_v4();
    let history = records(habit, &[(-4, true), (-3, true), (-2, false), (-1, true)]);

    let snapshot = engine().snapshot(&history, Cadence::Daily);

    assert_eq!(snapshot.current_streak, 1);
    assert_eq!(snapshot.best_streak, 2);
}

#[test]
fn test_time_travel_changes_now() {
    let habit = Uuid::new_v4();
    let history = records(habit, &[(-3, true), (-2, true), (-1, true), (0, true)]);

    // Two days back in time the last two records lie in the future.
    let clock = TimeTravelClock::new(FixedClock::new(now()), -2);
    let snapshot = StreakEngine::new(clock).snapshot(&history, Cadence::Daily);

    assert_eq!(snapshot.current_streak, 2);
    assert_eq!(snapshot.total_periods, 2);
    assert_eq!(snapshot.computed_at, day(-2));
    assert!(!snapshot.at_risk);
}

#[test]
fn test_calendar_offset_controls_day_boundary() {
    let habit = Uuid::new_v4();
    // 23:30 UTC is already the next day at UTC+2.
    let late = Utc.with_ymd_and_hms(2024, 9, 17, 23, 30, 0).unwrap();
    let history = vec![CompletionRecord::new(habit, late, true)];
    let clock_now = Utc.with_ymd_and_hms(2024, 9, 18, 12, 0, 0).unwrap();

    let utc = StreakEngine::new(FixedClock::new(clock_now)).snapshot(&history, Cadence::Daily);
    assert_eq!(utc.current_streak, 1);
    assert!(utc.at_risk);

    let plus_two = Calendar::from_offset_minutes(120).unwrap();
    let local = StreakEngine::new(FixedClock::with_calendar(clock_now, plus_two))
        .snapshot(&history, Cadence::Daily);
    assert_eq!(local.current_streak, 1);
    assert!(!local.at_risk);
}

/// A cadence the library does not ship, plugged in through the trait.
struct MonthlyStrategy;

impl PeriodKeyStrategy for MonthlyStrategy {
    fn period_key(&self, date: NaiveDate) -> PeriodKey {
        PeriodKey::new(format!("{}-M{}", date.year(), date.month()))
    }

    fn start_of_period(&self, date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    fn step_back(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_sub_months(Months::new(1))
    }
}

#[test]
fn test_custom_monthly_strategy() {
    let habit = Uuid::new_v4();
    let history: Vec<_> = [(2024, 5, 31), (2024, 6, 2), (2024, 7, 15), (2024, 3, 3)]
        .iter()
        .map(|&(y, m, d)| {
            CompletionRecord::new(habit, Utc.with_ymd_and_hms(y, m, d, 8, 0, 0).unwrap(), true)
        })
        .collect();

    let periods = index(&history, &MonthlyStrategy, Calendar::utc());
    assert_eq!(periods.len(), 4);

    let today = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap();
    assert_eq!(current_streak(&periods, &MonthlyStrategy, today), 3);
    assert_eq!(best_streak(&periods, &MonthlyStrategy), 3);
}
