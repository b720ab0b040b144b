//! Booking port interfaces

use async_trait::async_trait;
use slotwise_domain::{BookingCandidate, Event, InsertOutcome, LocalDay, Result, TimeRange};
use uuid::Uuid;

/// Committed events of every owner
///
/// The event table is the only mutable shared state of the engine.
/// `insert_if_no_overlap` is the authoritative guard against double booking
/// and must be one indivisible storage operation: no other insert for the
/// same owner may land between its checks and its write, in this process or
/// any other sharing the storage.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Confirmed events of `owner_id` overlapping `range`, ascending by start.
    async fn list_confirmed(&self, owner_id: &str, range: TimeRange) -> Result<Vec<Event>>;

    /// Confirmed events of `owner_id` starting within the local day.
    async fn count_confirmed_on_date(&self, owner_id: &str, day: &LocalDay) -> Result<u32>;

    /// Inserts `candidate.event` unless its buffer-expanded range overlaps a
    /// confirmed event of the same owner, or the candidate's day already
    /// holds `candidate.daily_cap` confirmed events.
    async fn insert_if_no_overlap(&self, candidate: BookingCandidate) -> Result<InsertOutcome>;

    async fn get(&self, owner_id: &str, event_id: Uuid) -> Result<Option<Event>>;

    /// Marks the event cancelled and returns it. Cancelling twice is a no-op;
    /// `None` when the owner has no such event.
    async fn cancel(&self, owner_id: &str, event_id: Uuid) -> Result<Option<Event>>;
}

/// Side effects after a booking changes (email, calendar push, meeting
/// links). Errors are logged by the dispatcher and never reach the booker.
#[async_trait]
pub trait NotificationHook: Send + Sync {
    async fn on_booking_confirmed(&self, event: &Event) -> Result<()>;

    async fn on_booking_cancelled(&self, _event: &Event) -> Result<()> {
        Ok(())
    }
}
