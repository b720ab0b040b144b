//! Router harness for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use slotwise_api::{router, AppContext};
use slotwise_core::FixedClock;
use slotwise_domain::{Config, StorageBackend};
use tempfile::TempDir;
use tower::ServiceExt;

pub const OWNER: &str = "ada";

/// UTC instant on Monday 2025-06-02.
pub fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub ctx: Arc<AppContext>,
    pub clock: Arc<FixedClock>,
    _temp_dir: TempDir,
}

impl TestApp {
    /// SQLite-backed app whose clock reads Sunday 2025-06-01 noon.
    pub fn sqlite() -> Self {
        Self::with_backend(StorageBackend::Sqlite)
    }

    pub fn memory() -> Self {
        Self::with_backend(StorageBackend::Memory)
    }

    fn with_backend(backend: StorageBackend) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.database.backend = backend;
        config.database.path = temp_dir.path().join("slotwise.db").to_string_lossy().to_string();

        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()));
        let ctx = Arc::new(AppContext::new_with_clock(config, clock.clone()).unwrap());

        Self { router: router(Arc::clone(&ctx)), ctx, clock, _temp_dir: temp_dir }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }

    /// Weekdays 09:00-17:00 UTC plus a 30-minute `intro` event type.
    pub async fn seed_owner(&self, buffer_minutes: u32, cap: Option<u32>) {
        let (status, _) = self
            .send(Method::PUT, &format!("/owners/{OWNER}/policy"), Some(policy_json(buffer_minutes, cap)))
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = self
            .send(
                Method::PUT,
                &format!("/owners/{OWNER}/event-types/intro"),
                Some(json!({"name": "Intro call", "duration_minutes": 30})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

pub fn policy_json(buffer_minutes: u32, cap: Option<u32>) -> Value {
    let open = json!({"enabled": true, "start": "09:00:00", "end": "17:00:00"});
    let closed = json!({"enabled": false, "start": "00:00:00", "end": "00:00:00"});
    json!({
        "working_hours": {
            "monday": open, "tuesday": open, "wednesday": open, "thursday": open, "friday": open,
            "saturday": closed, "sunday": closed
        },
        "timezone": "UTC",
        "buffer_minutes": buffer_minutes,
        "max_events_per_day": cap
    })
}

pub fn booking_json(start: DateTime<Utc>, minutes: i64, email: &str) -> Value {
    json!({
        "slot_start": start,
        "slot_end": start + chrono::Duration::minutes(minutes),
        "attendee_email": email,
        "attendee_name": "Grace Hopper",
        "event_type_id": "intro"
    })
}

pub fn slot_starts(body: &Value) -> Vec<String> {
    body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|slot| {
            let start: DateTime<Utc> = serde_json::from_value(slot["start_utc"].clone()).unwrap();
            start.format("%H:%M").to_string()
        })
        .collect()
}
