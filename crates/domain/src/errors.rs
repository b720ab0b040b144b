//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// General error type returned by storage ports and adapters
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlotwiseError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Slotwise operations
pub type Result<T> = std::result::Result<T, SlotwiseError>;

/// Coarse classification used by callers to decide how to react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller mistake; report immediately, never retry.
    Input,
    /// Lost a race; re-fetch slots and let the user choose again.
    Contention,
    /// Storage or runtime failure; nothing was written, the whole operation
    /// may be retried.
    Infrastructure,
}

/// Rejection raised when an availability policy is written
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum PolicyError {
    #[error("Invalid working window on {day}: start {start} must be before end {end}")]
    InvalidWindow { day: String, start: String, end: String },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Buffer of {minutes} minutes exceeds the maximum of {max}")]
    BufferTooLarge { minutes: u32, max: u32 },

    #[error("Policy storage failure: {0}")]
    StorageFailure(String),
}

impl PolicyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StorageFailure(_) => ErrorKind::Infrastructure,
            _ => ErrorKind::Input,
        }
    }
}

impl From<SlotwiseError> for PolicyError {
    fn from(err: SlotwiseError) -> Self {
        Self::StorageFailure(err.to_string())
    }
}

/// Failure of a slot generation query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("No availability policy for owner {0}")]
    PolicyNotFound(String),

    #[error("Stored policy is invalid: {0}")]
    InvalidPolicy(#[from] PolicyError),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl SlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StorageFailure(_) | Self::InvalidPolicy(_) => ErrorKind::Infrastructure,
            Self::InvalidEventType(_) | Self::PolicyNotFound(_) => ErrorKind::Input,
        }
    }
}

impl From<SlotwiseError> for SlotError {
    fn from(err: SlotwiseError) -> Self {
        Self::StorageFailure(err.to_string())
    }
}

/// Failure of a booking commit or cancellation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    #[error("Slot starts in the past")]
    PastSlot,

    #[error("Slot is no longer available")]
    SlotNoLongerAvailable,

    #[error("No availability policy for owner {0}")]
    PolicyNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SlotNoLongerAvailable => ErrorKind::Contention,
            Self::StorageFailure(_) => ErrorKind::Infrastructure,
            Self::InvalidEventType(_)
            | Self::InvalidSlot(_)
            | Self::PastSlot
            | Self::PolicyNotFound(_)
            | Self::EventNotFound(_) => ErrorKind::Input,
        }
    }
}

impl From<SlotwiseError> for BookingError {
    fn from(err: SlotwiseError) -> Self {
        Self::StorageFailure(err.to_string())
    }
}
