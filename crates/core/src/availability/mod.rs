//! Availability: policies, event types and slot generation

pub mod generator;
pub mod ports;
pub mod service;
pub mod window;

pub use generator::{compute_slots, SlotGenerator};
pub use ports::{EventTypeRegistry, PolicyStore};
pub use service::AvailabilityService;
pub use window::working_window;
