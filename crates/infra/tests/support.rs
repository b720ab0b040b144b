//! Shared helpers for infra integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use slotwise_domain::{
    AvailabilityPolicy, BookingCandidate, DailyCap, Event, EventStatus, LocalDay, WeeklyHours,
};
use slotwise_infra::database::DbManager;
use tempfile::TempDir;
use uuid::Uuid;

pub const OWNER: &str = "ada";

/// Temporary migrated database that lives as long as the value.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let path = temp_dir.path().join("slotwise-test.db");

        let manager = Self::open(&path);
        manager.run_migrations().expect("migrations should apply");

        Self { manager, path, _temp_dir: temp_dir }
    }

    /// A separate pool on the same file, standing in for another process.
    pub fn second_manager(&self) -> Arc<DbManager> {
        Self::open(&self.path)
    }

    fn open(path: &PathBuf) -> Arc<DbManager> {
        Arc::new(
            DbManager::new(path, 4, StdDuration::from_secs(5)).expect("db manager should be created"),
        )
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).single().expect("valid instant")
}

pub fn policy(buffer_minutes: u32, cap: DailyCap) -> AvailabilityPolicy {
    AvailabilityPolicy {
        working_hours: WeeklyHours::weekdays(hm(9, 0), hm(17, 0)),
        timezone: "UTC".into(),
        buffer_minutes,
        max_events_per_day: cap,
    }
}

pub fn event_at(start: DateTime<Utc>, minutes: i64, email: &str) -> Event {
    Event {
        id: Uuid::now_v7(),
        owner_id: OWNER.into(),
        event_type_id: Some("intro".into()),
        start_utc: start,
        end_utc: start + Duration::minutes(minutes),
        status: EventStatus::Confirmed,
        attendee_email: email.into(),
        attendee_name: "Guest".into(),
        notes: None,
        created_at: at(0, 0),
    }
}

pub fn candidate(event: Event, buffer_minutes: u32, daily_cap: DailyCap) -> BookingCandidate {
    let day = LocalDay::containing(event.start_utc, chrono_tz::UTC);
    BookingCandidate { event, buffer_minutes, daily_cap, day }
}
