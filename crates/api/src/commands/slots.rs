//! Slot listing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slotwise_domain::Slot;
use tracing::debug;

use super::CommandError;
use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

/// Query string of `GET /owners/{owner_id}/slots`
///
/// One of `event_type_id` or `duration_minutes` selects the meeting length.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SlotQuery {
    /// Local date in the owner's timezone, `YYYY-MM-DD`.
    pub date: String,
    pub event_type_id: Option<String>,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotsResponse {
    pub owner_id: String,
    pub date: NaiveDate,
    pub slots: Vec<Slot>,
}

pub async fn get_available_slots(
    ctx: &AppContext,
    owner_id: &str,
    query: SlotQuery,
) -> Result<SlotsResponse, CommandError> {
    execute_command("slots::list", || async {
        let date = NaiveDate::parse_from_str(query.date.trim(), "%Y-%m-%d").map_err(|e| {
            CommandError::invalid_input(format!(
                "invalid date '{}': {e}. Expected YYYY-MM-DD",
                query.date
            ))
        })?;

        let slots = match (&query.event_type_id, query.duration_minutes) {
            (Some(event_type_id), _) => {
                ctx.slots.generate_slots_for_event_type(owner_id, date, event_type_id).await?
            }
            (None, Some(duration_minutes)) => {
                ctx.slots.generate_slots(owner_id, date, duration_minutes).await?
            }
            (None, None) => {
                return Err(CommandError::invalid_input(
                    "event_type_id or duration_minutes is required",
                ))
            }
        };

        debug!(owner_id, %date, count = slots.len(), "slots listed");
        Ok(SlotsResponse { owner_id: owner_id.to_string(), date, slots })
    })
    .await
}
