//! JSON shape of the types exchanged with callers

use chrono::{NaiveTime, Weekday};
use slotwise_domain::{AvailabilityPolicy, DailyCap, DayHours, EventType, WeeklyHours};

#[test]
fn policy_round_trips_through_json_document() {
    let json = r#"{
        "working_hours": {
            "monday":    {"enabled": true,  "start": "09:00:00", "end": "17:00:00"},
            "tuesday":   {"enabled": true,  "start": "09:00:00", "end": "12:30:00"},
            "wednesday": {"enabled": false, "start": "00:00:00", "end": "00:00:00"},
            "thursday":  {"enabled": true,  "start": "13:00:00", "end": "18:00:00"},
            "friday":    {"enabled": true,  "start": "09:00:00", "end": "17:00:00"},
            "saturday":  {"enabled": false, "start": "00:00:00", "end": "00:00:00"},
            "sunday":    {"enabled": false, "start": "00:00:00", "end": "00:00:00"}
        },
        "timezone": "Europe/Lisbon",
        "buffer_minutes": 10,
        "max_events_per_day": 4
    }"#;

    let policy: AvailabilityPolicy = serde_json::from_str(json).unwrap();
    assert!(policy.validate().is_ok());
    assert_eq!(policy.max_events_per_day, DailyCap::Max(4));
    assert_eq!(
        *policy.working_hours.day(Weekday::Tue),
        DayHours::open(
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(12, 30, 0).unwrap()
        )
    );
    assert_eq!(policy.tz().unwrap(), chrono_tz::Europe::Lisbon);

    let back: AvailabilityPolicy =
        serde_json::from_value(serde_json::to_value(&policy).unwrap()).unwrap();
    assert_eq!(back, policy);
}

#[test]
fn unlimited_cap_is_null() {
    let policy = AvailabilityPolicy {
        working_hours: WeeklyHours::closed(),
        ..AvailabilityPolicy::default()
    };
    let value = serde_json::to_value(&policy).unwrap();
    assert!(value["max_events_per_day"].is_null());
}

#[test]
fn event_type_uses_snake_case_fields() {
    let event_type: EventType = serde_json::from_str(
        r#"{"id": "deep-dive", "owner_id": "ada", "name": "Deep dive", "duration_minutes": 90, "active": false}"#,
    )
    .unwrap();
    assert_eq!(event_type.duration_minutes, 90);
    assert!(!event_type.active);
}
