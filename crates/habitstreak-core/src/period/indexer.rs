//! Collapses raw completion records into canonical periods.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::strategy::{Cadence, PeriodKey, PeriodKeyStrategy};
use crate::clock::Calendar;

/// One raw, dated completion mark for a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub habit_id: Uuid,
    pub date: DateTime<Utc>,
    pub completed: bool,
}

impl CompletionRecord {
    pub fn new(habit_id: Uuid, date: DateTime<Utc>, completed: bool) -> Self {
        Self {
            habit_id,
            date,
            completed,
        }
    }
}

/// A canonical time bucket with every record that fell into it merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub key: PeriodKey,
    /// Earliest record instant seen for this bucket.
    pub anchor: DateTime<Utc>,
    /// First local day of the bucket.
    pub start: NaiveDate,
    pub completed: bool,
}

/// Index records into periods, ascending by start.
///
/// Records sharing a bucket merge: the period is completed if any record is,
/// and its anchor is the earliest record instant. The result does not depend
/// on input order.
pub fn index(
    records: &[CompletionRecord],
    strategy: &dyn PeriodKeyStrategy,
    calendar: Calendar,
) -> Vec<Period> {
    let mut buckets: BTreeMap<NaiveDate, Period> = BTreeMap::new();

    for record in records {
        let local = calendar.local_date(record.date);
        let start = strategy.start_of_period(local);

        buckets
            .entry(start)
            .and_modify(|period| {
                period.completed |= record.completed;
                if record.date < period.anchor {
                    period.anchor = record.date;
                }
            })
            .or_insert_with(|| Period {
                key: strategy.period_key(local),
                anchor: record.date,
                start,
                completed: record.completed,
            });
    }

    buckets.into_values().collect()
}

/// [`index`] using the strategy of a cadence.
pub fn index_for_cadence(
    records: &[CompletionRecord],
    cadence: Cadence,
    calendar: Calendar,
) -> Vec<Period> {
    index(records, cadence.strategy(), calendar)
}
