//! Period key strategies.
//!
//! A strategy decides which calendar bucket a local date falls into. The
//! streak engine only talks to [`PeriodKeyStrategy`], so adding a cadence
//! means adding an impl here, not touching the engine.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier of one period bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps local dates onto period buckets.
pub trait PeriodKeyStrategy: Send + Sync {
    /// Key of the bucket containing `date`.
    fn period_key(&self, date: NaiveDate) -> PeriodKey;

    /// First local day of the bucket containing `date`.
    fn start_of_period(&self, date: NaiveDate) -> NaiveDate;

    /// A date one unit earlier than `date`, or `None` when the calendar
    /// cannot represent it.
    fn step_back(&self, date: NaiveDate) -> Option<NaiveDate>;

    /// Whether the bucket of `later` immediately follows the bucket of
    /// `earlier`. Same-bucket dates also count as adjacent.
    fn is_adjacent(&self, earlier: NaiveDate, later: NaiveDate) -> bool {
        let earlier = self.start_of_period(earlier);
        let later = self.start_of_period(later);
        if earlier == later {
            return true;
        }
        self.step_back(later)
            .map(|prev| self.start_of_period(prev) == earlier)
            .unwrap_or(false)
    }
}

/// One bucket per calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyStrategy;

impl PeriodKeyStrategy for DailyStrategy {
    fn period_key(&self, date: NaiveDate) -> PeriodKey {
        PeriodKey(format!("{}-{}-{}", date.year(), date.month(), date.day()))
    }

    fn start_of_period(&self, date: NaiveDate) -> NaiveDate {
        date
    }

    fn step_back(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_sub_days(Days::new(1))
    }
}

/// One bucket per ISO 8601 week (Monday start).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklyStrategy;

impl PeriodKeyStrategy for WeeklyStrategy {
    fn period_key(&self, date: NaiveDate) -> PeriodKey {
        let week = date.iso_week();
        PeriodKey(format!("{}-W{}", week.year(), week.week()))
    }

    fn start_of_period(&self, date: NaiveDate) -> NaiveDate {
        let into_week = u64::from(date.weekday().num_days_from_monday());
        // Only the first days of the calendar can fail here; stay put.
        date.checked_sub_days(Days::new(into_week)).unwrap_or(date)
    }

    fn step_back(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_sub_days(Days::new(7))
    }
}

static DAILY: DailyStrategy = DailyStrategy;
static WEEKLY: WeeklyStrategy = WeeklyStrategy;

/// Habit repetition unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    #[default]
    Daily,
    Weekly,
}

impl Cadence {
    /// Strategy that buckets dates for this cadence.
    pub fn strategy(&self) -> &'static dyn PeriodKeyStrategy {
        match self {
            Cadence::Daily => &DAILY,
            Cadence::Weekly => &WEEKLY,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
        }
    }
}

impl std::str::FromStr for Cadence {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(format!("Unknown cadence: {}", s)),
        }
    }
}
