use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use slotwise_core::EventRepository;
use slotwise_domain::{
    BookingCandidate, ConflictReason, Event, EventStatus, InsertOutcome, LocalDay, Result,
    TimeRange,
};
use tracing::debug;
use uuid::Uuid;

/// Events grouped per owner, each list kept ascending by start.
///
/// One mutex covers every check and write of `insert_if_no_overlap`, which
/// makes the conditional insert atomic within this process. It offers no
/// guarantee across processes.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: Mutex<HashMap<String, Vec<Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn starts_on(event: &Event, day: Option<TimeRange>) -> bool {
    day.is_some_and(|range| range.start <= event.start_utc && event.start_utc < range.end)
}

fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list_confirmed(&self, owner_id: &str, range: TimeRange) -> Result<Vec<Event>> {
        let events = self.events.lock();
        Ok(events
            .get(owner_id)
            .map(|owned| {
                owned
                    .iter()
                    .filter(|event| event.is_confirmed() && event.range().overlaps(&range))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count_confirmed_on_date(&self, owner_id: &str, day: &LocalDay) -> Result<u32> {
        let range = day.utc_range();
        let events = self.events.lock();
        let count = events.get(owner_id).map_or(0, |owned| {
            owned.iter().filter(|event| event.is_confirmed() && starts_on(event, range)).count()
        });
        Ok(saturating_count(count))
    }

    async fn insert_if_no_overlap(&self, candidate: BookingCandidate) -> Result<InsertOutcome> {
        let guarded = candidate.guarded_range();
        let day = candidate.day.utc_range();

        let mut events = self.events.lock();
        let owned = events.entry(candidate.event.owner_id.clone()).or_default();

        if owned.iter().any(|event| event.is_confirmed() && event.range().overlaps(&guarded)) {
            debug!(owner_id = %candidate.event.owner_id, "overlapping confirmed event");
            return Ok(InsertOutcome::Conflict(ConflictReason::Overlap));
        }

        let on_day = owned.iter().filter(|event| event.is_confirmed() && starts_on(event, day)).count();
        if candidate.daily_cap.is_reached(saturating_count(on_day)) {
            debug!(owner_id = %candidate.event.owner_id, on_day, "daily cap reached");
            return Ok(InsertOutcome::Conflict(ConflictReason::DailyCapReached));
        }

        let position = owned.partition_point(|event| event.start_utc <= candidate.event.start_utc);
        owned.insert(position, candidate.event.clone());
        Ok(InsertOutcome::Inserted(candidate.event))
    }

    async fn get(&self, owner_id: &str, event_id: Uuid) -> Result<Option<Event>> {
        let events = self.events.lock();
        Ok(events
            .get(owner_id)
            .and_then(|owned| owned.iter().find(|event| event.id == event_id))
            .cloned())
    }

    async fn cancel(&self, owner_id: &str, event_id: Uuid) -> Result<Option<Event>> {
        let mut events = self.events.lock();
        Ok(events
            .get_mut(owner_id)
            .and_then(|owned| owned.iter_mut().find(|event| event.id == event_id))
            .map(|event| {
                event.status = EventStatus::Cancelled;
                event.clone()
            }))
    }
}
