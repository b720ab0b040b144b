//! Fixture builders shared by the slot and booking tests

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use slotwise_core::{BookingCoordinator, FixedClock, SlotGenerator};
use slotwise_domain::{
    Attendee, AvailabilityPolicy, BookingRequest, DailyCap, Event, EventStatus, EventType,
    WeeklyHours,
};
use uuid::Uuid;

use super::repositories::{MockEventRepository, MockEventTypeRegistry, MockPolicyStore};

pub const OWNER: &str = "ada";

/// Monday 2025-06-02.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// UTC instant on `monday()`.
pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
}

/// Weekdays 09:00-17:00 UTC with the given buffer and cap.
pub fn policy(buffer_minutes: u32, cap: DailyCap) -> AvailabilityPolicy {
    AvailabilityPolicy {
        working_hours: WeeklyHours::weekdays(hm(9, 0), hm(17, 0)),
        timezone: "UTC".into(),
        buffer_minutes,
        max_events_per_day: cap,
    }
}

pub fn event_type(id: &str, duration_minutes: u32) -> EventType {
    EventType {
        id: id.into(),
        owner_id: OWNER.into(),
        name: format!("{duration_minutes} minute meeting"),
        duration_minutes,
        active: true,
    }
}

pub fn confirmed_event(start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
    Event {
        id: Uuid::now_v7(),
        owner_id: OWNER.into(),
        event_type_id: None,
        start_utc: start,
        end_utc: end,
        status: EventStatus::Confirmed,
        attendee_email: "existing@example.com".into(),
        attendee_name: "Existing".into(),
        notes: None,
        created_at: start - Duration::days(7),
    }
}

pub fn request(start: DateTime<Utc>, minutes: i64, email: &str) -> BookingRequest {
    BookingRequest {
        owner_id: OWNER.into(),
        slot_start: start,
        slot_end: start + Duration::minutes(minutes),
        attendee: Attendee { email: email.into(), name: email.into() },
        notes: None,
        event_type_id: None,
    }
}

/// Ports and clock behind one owner, with "now" fixed to Sunday 2025-06-01.
pub struct Harness {
    pub policies: MockPolicyStore,
    pub event_types: MockEventTypeRegistry,
    pub events: MockEventRepository,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new(policy: AvailabilityPolicy) -> Self {
        Self {
            policies: MockPolicyStore::default().with_policy(OWNER, policy),
            event_types: MockEventTypeRegistry::default()
                .with_event_type(event_type("intro", 30))
                .with_event_type(event_type("deep-dive", 60)),
            events: MockEventRepository::default(),
            clock: Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())),
        }
    }

    pub fn generator(&self) -> SlotGenerator {
        SlotGenerator::new(
            Arc::new(self.policies.clone()),
            Arc::new(self.event_types.clone()),
            Arc::new(self.events.clone()),
        )
    }

    pub fn coordinator(&self) -> BookingCoordinator {
        BookingCoordinator::new(
            Arc::new(self.policies.clone()),
            Arc::new(self.event_types.clone()),
            Arc::new(self.events.clone()),
            self.clock.clone(),
        )
    }
}
