use serde::Serialize;
use slotwise_domain::constants::{MSG_INVALID_EVENT_TYPE, MSG_PAST_SLOT, MSG_SLOT_TAKEN};
use slotwise_domain::{BookingError, ErrorKind, PolicyError, SlotError, SlotwiseError};
use thiserror::Error;

const MSG_UNAVAILABLE: &str = "Something went wrong on our side. Please try again.";
const MSG_OWNER_NOT_FOUND: &str = "This calendar is not accepting bookings.";
const MSG_BOOKING_NOT_FOUND: &str = "This booking could not be found.";
const MSG_INVALID_SLOT: &str = "This time does not match the selected meeting.";

/// Failure as reported to API callers
///
/// `code` is stable and machine readable; `message` is the user-facing text.
/// Internal details stay in the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{code}: {message}")]
pub struct CommandError {
    #[serde(skip)]
    pub kind: ErrorKind,
    #[serde(rename = "error")]
    pub code: &'static str,
    pub message: String,
}

impl CommandError {
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self { kind, code, message: message.into() }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Input, "invalid_input", message)
    }

    fn unavailable() -> Self {
        Self::new(ErrorKind::Infrastructure, "storage_unavailable", MSG_UNAVAILABLE)
    }

    pub fn is_not_found(&self) -> bool {
        self.code.ends_with("not_found")
    }
}

impl From<BookingError> for CommandError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::SlotNoLongerAvailable => {
                Self::new(ErrorKind::Contention, "slot_taken", MSG_SLOT_TAKEN)
            }
            BookingError::PastSlot => Self::new(ErrorKind::Input, "past_slot", MSG_PAST_SLOT),
            BookingError::InvalidEventType(_) => {
                Self::new(ErrorKind::Input, "invalid_event_type", MSG_INVALID_EVENT_TYPE)
            }
            BookingError::InvalidSlot(_) => {
                Self::new(ErrorKind::Input, "invalid_slot", MSG_INVALID_SLOT)
            }
            BookingError::PolicyNotFound(_) => {
                Self::new(ErrorKind::Input, "owner_not_found", MSG_OWNER_NOT_FOUND)
            }
            BookingError::EventNotFound(_) => {
                Self::new(ErrorKind::Input, "booking_not_found", MSG_BOOKING_NOT_FOUND)
            }
            BookingError::StorageFailure(_) => Self::unavailable(),
        }
    }
}

impl From<SlotError> for CommandError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::InvalidEventType(_) => {
                Self::new(ErrorKind::Input, "invalid_event_type", MSG_INVALID_EVENT_TYPE)
            }
            SlotError::PolicyNotFound(_) => {
                Self::new(ErrorKind::Input, "owner_not_found", MSG_OWNER_NOT_FOUND)
            }
            SlotError::InvalidPolicy(_) | SlotError::StorageFailure(_) => Self::unavailable(),
        }
    }
}

impl From<PolicyError> for CommandError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::StorageFailure(_) => Self::unavailable(),
            invalid => Self::new(ErrorKind::Input, "invalid_policy", invalid.to_string()),
        }
    }
}

impl From<SlotwiseError> for CommandError {
    fn from(err: SlotwiseError) -> Self {
        match err {
            SlotwiseError::NotFound(what) => {
                Self::new(ErrorKind::Input, "not_found", format!("Not found: {what}"))
            }
            SlotwiseError::InvalidInput(message) => Self::invalid_input(message),
            _ => Self::unavailable(),
        }
    }
}
