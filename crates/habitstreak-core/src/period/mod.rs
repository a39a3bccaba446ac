//! Period bucketing: cadence strategies and the record indexer.

mod indexer;
mod strategy;

pub use indexer::{index, index_for_cadence, CompletionRecord, Period};
pub use strategy::{Cadence, DailyStrategy, PeriodKey, PeriodKeyStrategy, WeeklyStrategy};
