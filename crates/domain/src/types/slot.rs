//! Time ranges, slots and local calendar days

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::utils::local_time::local_midnight;

/// Half-open UTC interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// `[a,b)` and `[c,d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Grows the range by `by` on both sides.
    pub fn expand(&self, by: Duration) -> Self {
        Self { start: self.start - by, end: self.end + by }
    }
}

/// A bookable interval derived from policy and current events. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
}

impl Slot {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_utc, self.end_utc)
    }
}

impl From<TimeRange> for Slot {
    fn from(range: TimeRange) -> Self {
        Self { start_utc: range.start, end_utc: range.end }
    }
}

/// A calendar date interpreted in a specific timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalDay {
    pub date: NaiveDate,
    pub timezone: Tz,
}

impl LocalDay {
    pub fn new(date: NaiveDate, timezone: Tz) -> Self {
        Self { date, timezone }
    }

    /// The local day that contains `instant`.
    pub fn containing(instant: DateTime<Utc>, timezone: Tz) -> Self {
        Self { date: instant.with_timezone(&timezone).date_naive(), timezone }
    }

    /// UTC range from local midnight to the next local midnight. Days that
    /// cross a DST transition are 23 or 25 hours long.
    pub fn utc_range(&self) -> Option<TimeRange> {
        let start = local_midnight(self.timezone, self.date)?;
        let end = local_midnight(self.timezone, self.date.succ_opt()?)?;
        Some(TimeRange::new(start, end))
    }
}
