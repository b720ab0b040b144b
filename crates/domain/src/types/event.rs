//! Committed events, the source of truth for busy time

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::booking::BookingRequest;
use super::slot::TimeRange;
use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Cancelled,
}

impl_domain_status_conversions!(EventStatus {
    Confirmed => "confirmed",
    Cancelled => "cancelled",
});

/// A booked event on an owner's calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type_id: Option<String>,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub status: EventStatus,
    pub attendee_email: String,
    pub attendee_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Builds the confirmed event a booking request would create.
    pub fn confirmed_from(request: &BookingRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner_id: request.owner_id.clone(),
            event_type_id: request.event_type_id.clone(),
            start_utc: request.slot_start,
            end_utc: request.slot_end,
            status: EventStatus::Confirmed,
            attendee_email: request.attendee.email.clone(),
            attendee_name: request.attendee.name.clone(),
            notes: request.notes.clone(),
            created_at,
        }
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_utc, self.end_utc)
    }

    /// Interval this event blocks once the owner's buffer is applied.
    pub fn busy_range(&self, buffer: Duration) -> TimeRange {
        self.range().expand(buffer)
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == EventStatus::Confirmed
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::booking::Attendee;

    #[test]
    fn confirmed_from_copies_request_fields() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        let request = BookingRequest {
            owner_id: "ada".into(),
            slot_start: start,
            slot_end: start + Duration::minutes(30),
            attendee: Attendee { email: "grace@example.com".into(), name: "Grace".into() },
            notes: Some("agenda attached".into()),
            event_type_id: Some("intro".into()),
        };

        let event = Event::confirmed_from(&request, start - Duration::days(1));
        assert!(event.is_confirmed());
        assert_eq!(event.owner_id, "ada");
        assert_eq!(event.range(), TimeRange::new(start, start + Duration::minutes(30)));
        assert_eq!(event.attendee_email, "grace@example.com");
        assert_eq!(event.id.get_version_num(), 7);
    }

    #[test]
    fn status_round_trips_through_text() {
        assert_eq!(EventStatus::Cancelled.to_string(), "cancelled");
        assert_eq!("Confirmed".parse::<EventStatus>().unwrap(), EventStatus::Confirmed);
    }
}
