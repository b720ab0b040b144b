//! Mock port implementations for testing
//!
//! Every mock keeps its state behind `Arc<Mutex<..>>` so clones share data
//! and tests can inspect what the services wrote.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use slotwise_core::{EventRepository, EventTypeRegistry, NotificationHook, PolicyStore};
use slotwise_domain::{
    AvailabilityPolicy, BookingCandidate, ConflictReason, Event, EventStatus, EventType,
    InsertOutcome, LocalDay, PolicyError, Result as DomainResult, SlotwiseError, TimeRange,
};
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct MockPolicyStore {
    policies: Arc<Mutex<HashMap<String, AvailabilityPolicy>>>,
}

impl MockPolicyStore {
    pub fn with_policy(self, owner_id: &str, policy: AvailabilityPolicy) -> Self {
        self.policies.lock().insert(owner_id.to_string(), policy);
        self
    }
}

#[async_trait]
impl PolicyStore for MockPolicyStore {
    async fn get(&self, owner_id: &str) -> DomainResult<Option<AvailabilityPolicy>> {
        Ok(self.policies.lock().get(owner_id).cloned())
    }

    async fn put(
        &self,
        owner_id: &str,
        policy: AvailabilityPolicy,
    ) -> std::result::Result<(), PolicyError> {
        policy.validate()?;
        self.policies.lock().insert(owner_id.to_string(), policy);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct MockEventTypeRegistry {
    event_types: Arc<Mutex<Vec<EventType>>>,
}

impl MockEventTypeRegistry {
    pub fn with_event_type(self, event_type: EventType) -> Self {
        self.event_types.lock().push(event_type);
        self
    }
}

#[async_trait]
impl EventTypeRegistry for MockEventTypeRegistry {
    async fn get(&self, owner_id: &str, event_type_id: &str) -> DomainResult<Option<EventType>> {
        Ok(self
            .event_types
            .lock()
            .iter()
            .find(|et| et.owner_id == owner_id && et.id == event_type_id)
            .cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> DomainResult<Vec<EventType>> {
        Ok(self.event_types.lock().iter().filter(|et| et.owner_id == owner_id).cloned().collect())
    }

    async fn put(&self, event_type: EventType) -> DomainResult<()> {
        let mut event_types = self.event_types.lock();
        event_types.retain(|et| !(et.owner_id == event_type.owner_id && et.id == event_type.id));
        event_types.push(event_type);
        Ok(())
    }
}

/// Event store whose conditional insert runs under one mutex.
#[derive(Default, Clone)]
pub struct MockEventRepository {
    events: Arc<Mutex<Vec<Event>>>,
    fail_inserts: Arc<AtomicBool>,
}

impl MockEventRepository {
    pub fn with_event(self, event: Event) -> Self {
        self.events.lock().push(event);
        self
    }

    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn confirmed(&self) -> Vec<Event> {
        self.events.lock().iter().filter(|e| e.is_confirmed()).cloned().collect()
    }
}

fn starts_within(event: &Event, day: &LocalDay) -> bool {
    day.utc_range().is_some_and(|range| range.start <= event.start_utc && event.start_utc < range.end)
}

#[async_trait]
impl EventRepository for MockEventRepository {
    async fn list_confirmed(&self, owner_id: &str, range: TimeRange) -> DomainResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events
            .lock()
            .iter()
            .filter(|e| e.owner_id == owner_id && e.is_confirmed() && e.range().overlaps(&range))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_utc);
        Ok(events)
    }

    async fn count_confirmed_on_date(&self, owner_id: &str, day: &LocalDay) -> DomainResult<u32> {
        let count = self
            .events
            .lock()
            .iter()
            .filter(|e| e.owner_id == owner_id && e.is_confirmed() && starts_within(e, day))
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn insert_if_no_overlap(&self, candidate: BookingCandidate) -> DomainResult<InsertOutcome> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(SlotwiseError::Database("disk I/O error".into()));
        }

        let mut events = self.events.lock();
        let guarded = candidate.guarded_range();
        let confirmed: Vec<&Event> = events
            .iter()
            .filter(|e| e.owner_id == candidate.event.owner_id && e.is_confirmed())
            .collect();

        if confirmed.iter().any(|e| e.range().overlaps(&guarded)) {
            return Ok(InsertOutcome::Conflict(ConflictReason::Overlap));
        }
        let on_day = confirmed.iter().filter(|e| starts_within(e, &candidate.day)).count();
        if candidate.daily_cap.is_reached(u32::try_from(on_day).unwrap_or(u32::MAX)) {
            return Ok(InsertOutcome::Conflict(ConflictReason::DailyCapReached));
        }

        events.push(candidate.event.clone());
        Ok(InsertOutcome::Inserted(candidate.event))
    }

    async fn get(&self, owner_id: &str, event_id: Uuid) -> DomainResult<Option<Event>> {
        Ok(self.events.lock().iter().find(|e| e.owner_id == owner_id && e.id == event_id).cloned())
    }

    async fn cancel(&self, owner_id: &str, event_id: Uuid) -> DomainResult<Option<Event>> {
        let mut events = self.events.lock();
        Ok(events.iter_mut().find(|e| e.owner_id == owner_id && e.id == event_id).map(|e| {
            e.status = EventStatus::Cancelled;
            e.clone()
        }))
    }
}

/// Records every notification it receives.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    pub confirmed: Arc<Mutex<Vec<Event>>>,
    pub cancelled: Arc<Mutex<Vec<Event>>>,
}

#[async_trait]
impl NotificationHook for RecordingNotifier {
    async fn on_booking_confirmed(&self, event: &Event) -> DomainResult<()> {
        self.confirmed.lock().push(event.clone());
        Ok(())
    }

    async fn on_booking_cancelled(&self, event: &Event) -> DomainResult<()> {
        self.cancelled.lock().push(event.clone());
        Ok(())
    }
}

/// Always fails, to prove hook errors never reach the booker.
#[derive(Default, Clone)]
pub struct FailingNotifier;

#[async_trait]
impl NotificationHook for FailingNotifier {
    async fn on_booking_confirmed(&self, _event: &Event) -> DomainResult<()> {
        Err(SlotwiseError::Network("smtp relay unreachable".into()))
    }
}
