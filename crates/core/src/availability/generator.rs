//! Slot generation
//!
//! [`compute_slots`] is the pure part: window, step and busy intervals in,
//! ordered slots out. [`SlotGenerator`] gathers those inputs from the ports.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use slotwise_domain::{EventType, LocalDay, Slot, SlotError, TimeRange};
use tracing::{debug, instrument};

use super::ports::{EventTypeRegistry, PolicyStore};
use super::window::working_window;
use crate::booking::ports::EventRepository;

/// Steps through `window` in increments of `duration` and keeps every
/// candidate that fits inside the window and misses all `busy` intervals.
///
/// `busy` must already include buffer expansion. Output is ascending.
pub fn compute_slots(window: TimeRange, duration: Duration, busy: &[TimeRange]) -> Vec<Slot> {
    if duration <= Duration::zero() || window.is_empty() {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut start = window.start;
    while start + duration <= window.end {
        let candidate = TimeRange::new(start, start + duration);
        if !busy.iter().any(|interval| candidate.overlaps(interval)) {
            slots.push(Slot::from(candidate));
        }
        start += duration;
    }
    slots
}

/// Read-only slot queries over the policy, event type and event ports
#[derive(Clone)]
pub struct SlotGenerator {
    policies: Arc<dyn PolicyStore>,
    event_types: Arc<dyn EventTypeRegistry>,
    events: Arc<dyn EventRepository>,
}

impl SlotGenerator {
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        event_types: Arc<dyn EventTypeRegistry>,
        events: Arc<dyn EventRepository>,
    ) -> Self {
        Self { policies, event_types, events }
    }

    /// Slots of `duration_minutes` on `date` (a date in the owner's
    /// timezone). The duration must belong to one of the owner's active
    /// event types.
    #[instrument(skip(self))]
    pub async fn generate_slots(
        &self,
        owner_id: &str,
        date: NaiveDate,
        duration_minutes: u32,
    ) -> Result<Vec<Slot>, SlotError> {
        let offered = self
            .event_types
            .list_for_owner(owner_id)
            .await?
            .into_iter()
            .any(|event_type| event_type.active && event_type.duration_minutes == duration_minutes);

        if !offered {
            return Err(SlotError::InvalidEventType(format!(
                "no active {duration_minutes}-minute event type for {owner_id}"
            )));
        }

        self.slots_for_duration(owner_id, date, duration_minutes).await
    }

    /// Slots for a specific event type, using its duration.
    #[instrument(skip(self))]
    pub async fn generate_slots_for_event_type(
        &self,
        owner_id: &str,
        date: NaiveDate,
        event_type_id: &str,
    ) -> Result<Vec<Slot>, SlotError> {
        let event_type = self.active_event_type(owner_id, event_type_id).await?;
        self.slots_for_duration(owner_id, date, event_type.duration_minutes).await
    }

    async fn active_event_type(
        &self,
        owner_id: &str,
        event_type_id: &str,
    ) -> Result<EventType, SlotError> {
        match self.event_types.get(owner_id, event_type_id).await? {
            Some(event_type) if event_type.active => Ok(event_type),
            Some(_) => Err(SlotError::InvalidEventType(format!("{event_type_id} is inactive"))),
            None => Err(SlotError::InvalidEventType(format!("{event_type_id} does not exist"))),
        }
    }

    async fn slots_for_duration(
        &self,
        owner_id: &str,
        date: NaiveDate,
        duration_minutes: u32,
    ) -> Result<Vec<Slot>, SlotError> {
        let policy = self
            .policies
            .get(owner_id)
            .await?
            .ok_or_else(|| SlotError::PolicyNotFound(owner_id.to_string()))?;
        let tz = policy.tz()?;

        let Some(window) = working_window(&policy, tz, date) else {
            debug!(owner_id, %date, "no working window");
            return Ok(Vec::new());
        };

        let day = LocalDay::new(date, tz);
        if policy.max_events_per_day.is_reached(self.events.count_confirmed_on_date(owner_id, &day).await?)
        {
            debug!(owner_id, %date, "daily cap reached");
            return Ok(Vec::new());
        }

        let buffer = policy.buffer();
        let busy: Vec<TimeRange> = self
            .events
            .list_confirmed(owner_id, window.expand(buffer))
            .await?
            .iter()
            .filter(|event| event.is_confirmed())
            .map(|event| event.busy_range(buffer))
            .collect();

        let slots =
            compute_slots(window, Duration::minutes(i64::from(duration_minutes)), &busy);
        debug!(owner_id, %date, busy = busy.len(), slots = slots.len(), "generated slots");
        Ok(slots)
    }
}
