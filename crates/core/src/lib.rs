//! # Slotwise Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for policies, event types, events and notifications
//! - Slot generation (working windows, buffer and daily cap rules)
//! - The booking coordinator and its per-owner serialization
//!
//! ## Architecture Principles
//! - Only depends on `slotwise-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod availability;
pub mod booking;
pub mod clock;

pub use availability::ports::{EventTypeRegistry, PolicyStore};
pub use availability::{compute_slots, working_window, AvailabilityService, SlotGenerator};
pub use booking::ports::{EventRepository, NotificationHook};
pub use booking::{BookingCoordinator, NotificationDispatcher, OwnerLocks};
pub use clock::{Clock, FixedClock, SystemClock};
