//! Booking commit and cancellation

use chrono::{DateTime, Utc};
use serde::Deserialize;
use slotwise_domain::{Attendee, BookingRequest, Event};
use tracing::info;
use uuid::Uuid;

use super::CommandError;
use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Body of `POST /owners/{owner_id}/bookings`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub attendee_email: String,
    pub attendee_name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub event_type_id: Option<String>,
}

impl CreateBookingRequest {
    fn into_booking(self, owner_id: &str) -> Result<BookingRequest, CommandError> {
        let email = self.attendee_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(CommandError::invalid_input("attendee_email must be an email address"));
        }
        let name = self.attendee_name.trim();
        if name.is_empty() {
            return Err(CommandError::invalid_input("attendee_name must not be empty"));
        }

        Ok(BookingRequest {
            owner_id: owner_id.to_string(),
            slot_start: self.slot_start,
            slot_end: self.slot_end,
            attendee: Attendee { email: email.to_string(), name: name.to_string() },
            notes: self.notes.filter(|notes| !notes.trim().is_empty()),
            event_type_id: self.event_type_id,
        })
    }
}

pub async fn create_booking(
    ctx: &AppContext,
    owner_id: &str,
    request: CreateBookingRequest,
) -> Result<Event, CommandError> {
    execute_command("bookings::commit", || async {
        let booking = request.into_booking(owner_id)?;
        let event = ctx.bookings.commit_booking(booking).await?;
        info!(owner_id, event_id = %event.id, slot_start = %event.start_utc, "booking confirmed");
        Ok(event)
    })
    .await
}

pub async fn cancel_booking(
    ctx: &AppContext,
    owner_id: &str,
    event_id: &str,
) -> Result<Event, CommandError> {
    execute_command("bookings::cancel", || async {
        let event_id = Uuid::parse_str(event_id)
            .map_err(|e| CommandError::invalid_input(format!("invalid booking id: {e}")))?;
        let event = ctx.bookings.cancel_booking(owner_id, event_id).await?;
        info!(owner_id, event_id = %event.id, "booking cancelled");
        Ok(event)
    })
    .await
}
