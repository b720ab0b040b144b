//! Booking coordinator - the concurrency-critical write path
//!
//! Cheap input checks run first. The authoritative overlap and daily-cap
//! checks happen inside [`EventRepository::insert_if_no_overlap`], against
//! the rows present at insert time. The optional per-owner lock only
//! queues same-owner commits in this process before they reach storage.

use std::sync::Arc;

use slotwise_domain::{
    AvailabilityPolicy, BookingCandidate, BookingError, BookingRequest, Event, InsertOutcome,
    LocalDay,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::locks::OwnerLocks;
use super::notify::NotificationDispatcher;
use super::ports::{EventRepository, NotificationHook};
use crate::availability::ports::{EventTypeRegistry, PolicyStore};
use crate::availability::window::working_window;
use crate::clock::Clock;

pub struct BookingCoordinator {
    policies: Arc<dyn PolicyStore>,
    event_types: Arc<dyn EventTypeRegistry>,
    events: Arc<dyn EventRepository>,
    clock: Arc<dyn Clock>,
    locks: Option<Arc<OwnerLocks>>,
    notifier: NotificationDispatcher,
}

impl BookingCoordinator {
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        event_types: Arc<dyn EventTypeRegistry>,
        events: Arc<dyn EventRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policies,
            event_types,
            events,
            clock,
            locks: None,
            notifier: NotificationDispatcher::disabled(),
        }
    }

    /// Serialize same-owner commits through `locks` before storage.
    pub fn with_owner_locks(mut self, locks: Arc<OwnerLocks>) -> Self {
        self.locks = Some(locks);
        self
    }

    pub fn with_notifier(mut self, hook: Arc<dyn NotificationHook>) -> Self {
        self.notifier = NotificationDispatcher::new(hook);
        self
    }

    /// Commits `request` as a confirmed event.
    ///
    /// `SlotNoLongerAvailable` means a concurrent booking or a policy change
    /// won; the caller should re-fetch slots instead of retrying the same
    /// one. Nothing is written on any error.
    #[instrument(
        skip(self, request),
        fields(owner_id = %request.owner_id, slot_start = %request.slot_start)
    )]
    pub async fn commit_booking(&self, request: BookingRequest) -> Result<Event, BookingError> {
        let range = request.range();
        if range.is_empty() {
            return Err(BookingError::InvalidSlot("slot end must be after slot start".into()));
        }

        let now = self.clock.now();
        if request.slot_start <= now {
            return Err(BookingError::PastSlot);
        }

        let policy = self
            .policies
            .get(&request.owner_id)
            .await?
            .ok_or_else(|| BookingError::PolicyNotFound(request.owner_id.clone()))?;

        if let Some(event_type_id) = &request.event_type_id {
            self.check_event_type(&request.owner_id, event_type_id, range.duration()).await?;
        }

        let candidate = self.candidate(&request, &policy, now)?;

        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(&request.owner_id).await),
            None => None,
        };

        let outcome = self.events.insert_if_no_overlap(candidate).await.map_err(|err| {
            warn!(error = %err, "booking insert failed");
            BookingError::from(err)
        })?;

        match outcome {
            InsertOutcome::Inserted(event) => {
                info!(event_id = %event.id, "booking confirmed");
                self.notifier.booking_confirmed(event.clone());
                Ok(event)
            }
            InsertOutcome::Conflict(reason) => {
                info!(?reason, "booking lost to current state");
                Err(BookingError::SlotNoLongerAvailable)
            }
        }
    }

    /// Cancels a confirmed event; cancelled events stop blocking time.
    #[instrument(skip(self))]
    pub async fn cancel_booking(&self, owner_id: &str, event_id: Uuid) -> Result<Event, BookingError> {
        let event = self
            .events
            .cancel(owner_id, event_id)
            .await?
            .ok_or(BookingError::EventNotFound(event_id))?;

        info!("booking cancelled");
        self.notifier.booking_cancelled(event.clone());
        Ok(event)
    }

    async fn check_event_type(
        &self,
        owner_id: &str,
        event_type_id: &str,
        length: chrono::Duration,
    ) -> Result<(), BookingError> {
        let event_type = self
            .event_types
            .get(owner_id, event_type_id)
            .await?
            .filter(|event_type| event_type.active)
            .ok_or_else(|| BookingError::InvalidEventType(event_type_id.to_string()))?;

        if event_type.duration() != length {
            return Err(BookingError::InvalidSlot(format!(
                "{event_type_id} slots are {} minutes long",
                event_type.duration_minutes
            )));
        }
        Ok(())
    }

    /// Builds the insert candidate, rejecting slots outside the owner's
    /// current working window for that day.
    fn candidate(
        &self,
        request: &BookingRequest,
        policy: &AvailabilityPolicy,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<BookingCandidate, BookingError> {
        let tz = policy
            .tz()
            .map_err(|err| BookingError::StorageFailure(format!("stored policy is invalid: {err}")))?;
        let day = LocalDay::containing(request.slot_start, tz);

        let inside_window = working_window(policy, tz, day.date)
            .is_some_and(|window| window.contains(&request.range()));
        if !inside_window {
            info!(date = %day.date, "slot is outside the current working window");
            return Err(BookingError::SlotNoLongerAvailable);
        }

        Ok(BookingCandidate {
            event: Event::confirmed_from(request, now),
            buffer_minutes: policy.buffer_minutes,
            daily_cap: policy.max_events_per_day,
            day,
        })
    }
}
