//! Injectable time source.
//!
//! The engine never reads the wall clock directly. Callers hand it a
//! [`Clock`], which supplies "now" together with the [`Calendar`] used to turn
//! instants into local dates. Tests use [`FixedClock`]; the demo time-travel
//! feature is just a [`TimeTravelClock`] wrapped around another clock.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};

/// Local calendar used to map instants onto days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    /// Calendar in UTC.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar at a UTC offset given in minutes. Returns `None` when the
    /// offset is out of range (beyond +/- 24h).
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The local calendar date of an instant.
    ///
    /// Instants whose local time falls outside chrono's range (the first and
    /// last hours of `DateTime<Utc>`) map to their UTC date.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant
            .naive_utc()
            .checked_add_offset(self.offset)
            .map(|local| local.date())
            .unwrap_or_else(|| instant.date_naive())
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

/// Source of "now" and the calendar it should be read in.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn calendar(&self) -> Calendar;

    /// Local date of [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.calendar().local_date(self.now())
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    calendar: Calendar,
}

impl SystemClock {
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn calendar(&self) -> Calendar {
        self.calendar
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    calendar: Calendar,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            calendar: Calendar::utc(),
        }
    }

    pub fn with_calendar(now: DateTime<Utc>, calendar: Calendar) -> Self {
        Self { now, calendar }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn calendar(&self) -> Calendar {
        self.calendar
    }
}

/// Shifts another clock by a whole number of days.
///
/// A shift that would leave chrono's representable range is ignored and the
/// inner clock's instant is returned unchanged.
#[derive(Debug, Clone)]
pub struct TimeTravelClock<C> {
    inner: C,
    offset_days: i64,
}

impl<C: Clock> TimeTravelClock<C> {
    pub fn new(inner: C, offset_days: i64) -> Self {
        Self { inner, offset_days }
    }

    pub fn offset_days(&self) -> i64 {
        self.offset_days
    }
}

impl<C: Clock> Clock for TimeTravelClock<C> {
    fn now(&self) -> DateTime<Utc> {
        let now = self.inner.now();
        Duration::try_days(self.offset_days)
            .and_then(|shift| now.checked_add_signed(shift))
            .unwrap_or(now)
    }

    fn calendar(&self) -> Calendar {
        self.inner.calendar()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn calendar(&self) -> Calendar {
        (**self).calendar()
    }
}
