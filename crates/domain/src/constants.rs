//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Policy limits
pub const MAX_BUFFER_MINUTES: u32 = 24 * 60;
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_WORKDAY_START_HOUR: u32 = 9;
pub const DEFAULT_WORKDAY_END_HOUR: u32 = 17;

// Gap resolution walks forward at most this far looking for a valid local time
pub const MAX_DST_GAP_MINUTES: i64 = 48 * 60;

// Storage defaults
pub const DEFAULT_DB_PATH: &str = "slotwise.db";
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// Server defaults
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

// Notification defaults
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_WEBHOOK_MAX_ATTEMPTS: u32 = 3;
pub const EVENT_BOOKING_CONFIRMED: &str = "booking.confirmed";
pub const EVENT_BOOKING_CANCELLED: &str = "booking.cancelled";

// User-facing messages
pub const MSG_SLOT_TAKEN: &str = "This time was just taken. Please pick another time.";
pub const MSG_INVALID_EVENT_TYPE: &str = "This event type is invalid.";
pub const MSG_PAST_SLOT: &str = "This time is in the past. Please pick another time.";
