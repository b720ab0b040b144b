//! Booking: the single write path for events

pub mod coordinator;
pub mod locks;
pub mod notify;
pub mod ports;

pub use coordinator::BookingCoordinator;
pub use locks::OwnerLocks;
pub use notify::NotificationDispatcher;
pub use ports::{EventRepository, NotificationHook};
