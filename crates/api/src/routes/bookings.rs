use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, post};
use axum::{Json, Router};
use slotwise_domain::Event;

use super::{json_body, SharedContext};
use crate::commands::{cancel_booking, create_booking, CommandError, CreateBookingRequest};

pub fn router() -> Router<SharedContext> {
    Router::new()
        .route("/owners/{owner_id}/bookings", post(create))
        .route("/owners/{owner_id}/bookings/{event_id}", delete(cancel))
}

/// POST /owners/{owner_id}/bookings
async fn create(
    State(ctx): State<SharedContext>,
    Path(owner_id): Path<String>,
    body: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), CommandError> {
    let request = json_body(body)?;
    let event = create_booking(&ctx, &owner_id, request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// DELETE /owners/{owner_id}/bookings/{event_id}
async fn cancel(
    State(ctx): State<SharedContext>,
    Path((owner_id, event_id)): Path<(String, String)>,
) -> Result<Json<Event>, CommandError> {
    cancel_booking(&ctx, &owner_id, &event_id).await.map(Json)
}
