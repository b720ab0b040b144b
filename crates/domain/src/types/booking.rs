//! Booking request and atomic insert types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::Event;
use super::policy::DailyCap;
use super::slot::{LocalDay, TimeRange};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub email: String,
    pub name: String,
}

/// A visitor's request to book one slot on an owner's calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub owner_id: String,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub attendee: Attendee,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub event_type_id: Option<String>,
}

impl BookingRequest {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.slot_start, self.slot_end)
    }
}

/// Everything storage needs to decide and apply an insert in one step.
///
/// The overlap rule and the daily cap are evaluated against the rows that
/// exist at insert time, not against any earlier read.
#[derive(Debug, Clone)]
pub struct BookingCandidate {
    pub event: Event,
    pub buffer_minutes: u32,
    pub daily_cap: DailyCap,
    /// Local day of `event.start_utc` in the owner's timezone.
    pub day: LocalDay,
}

impl BookingCandidate {
    /// Range that must not intersect any confirmed event of the owner.
    pub fn guarded_range(&self) -> TimeRange {
        self.event.busy_range(chrono::Duration::minutes(i64::from(self.buffer_minutes)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    Overlap,
    DailyCapReached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(Event),
    Conflict(ConflictReason),
}
