//! Commands: the application operations behind every route
//!
//! Each command times itself, logs its outcome and returns a
//! [`CommandError`] carrying the text shown to the person booking.

pub mod bookings;
pub mod error;
pub mod event_types;
pub mod health;
pub mod policy;
pub mod slots;

pub use bookings::{cancel_booking, create_booking, CreateBookingRequest};
pub use error::CommandError;
pub use event_types::{list_event_types, put_event_type, EventTypeRequest};
pub use health::get_app_health;
pub use policy::{get_policy, update_policy};
pub use slots::{get_available_slots, SlotQuery, SlotsResponse};
