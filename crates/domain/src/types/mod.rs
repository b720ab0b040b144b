//! Domain types and models

pub mod booking;
pub mod event;
pub mod event_type;
pub mod policy;
pub mod slot;

pub use booking::{Attendee, BookingCandidate, BookingRequest, ConflictReason, InsertOutcome};
pub use event::{Event, EventStatus};
pub use event_type::EventType;
pub use policy::{AvailabilityPolicy, DailyCap, DayHours, WeeklyHours};
pub use slot::{LocalDay, Slot, TimeRange};
