use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use slotwise_domain::EventType;

use super::{json_body, SharedContext};
use crate::commands::{list_event_types, put_event_type, CommandError, EventTypeRequest};

pub fn router() -> Router<SharedContext> {
    Router::new()
        .route("/owners/{owner_id}/event-types", get(list))
        .route("/owners/{owner_id}/event-types/{event_type_id}", put(upsert))
}

/// GET /owners/{owner_id}/event-types
async fn list(
    State(ctx): State<SharedContext>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<EventType>>, CommandError> {
    list_event_types(&ctx, &owner_id).await.map(Json)
}

/// PUT /owners/{owner_id}/event-types/{event_type_id}
async fn upsert(
    State(ctx): State<SharedContext>,
    Path((owner_id, event_type_id)): Path<(String, String)>,
    body: Result<Json<EventTypeRequest>, JsonRejection>,
) -> Result<Json<EventType>, CommandError> {
    let request = json_body(body)?;
    put_event_type(&ctx, &owner_id, &event_type_id, request).await.map(Json)
}
