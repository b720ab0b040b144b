//! Event type management

use serde::Deserialize;
use slotwise_domain::EventType;

use super::CommandError;
use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

fn default_active() -> bool {
    true
}

/// Body of `PUT /owners/{owner_id}/event-types/{event_type_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct EventTypeRequest {
    pub name: String,
    pub duration_minutes: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

pub async fn put_event_type(
    ctx: &AppContext,
    owner_id: &str,
    event_type_id: &str,
    request: EventTypeRequest,
) -> Result<EventType, CommandError> {
    execute_command("event_types::put", || async {
        let event_type = EventType {
            id: event_type_id.to_string(),
            owner_id: owner_id.to_string(),
            name: request.name,
            duration_minutes: request.duration_minutes,
            active: request.active,
        };
        ctx.availability.save_event_type(event_type.clone()).await?;
        Ok(event_type)
    })
    .await
}

pub async fn list_event_types(
    ctx: &AppContext,
    owner_id: &str,
) -> Result<Vec<EventType>, CommandError> {
    execute_command("event_types::list", || async {
        Ok(ctx.availability.event_types(owner_id).await?)
    })
    .await
}
