use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use slotwise_domain::AvailabilityPolicy;

use super::{json_body, SharedContext};
use crate::commands::{get_policy, update_policy, CommandError};

pub fn router() -> Router<SharedContext> {
    Router::new().route("/owners/{owner_id}/policy", get(read).put(replace))
}

/// GET /owners/{owner_id}/policy
async fn read(
    State(ctx): State<SharedContext>,
    Path(owner_id): Path<String>,
) -> Result<Json<AvailabilityPolicy>, CommandError> {
    get_policy(&ctx, &owner_id).await.map(Json)
}

/// PUT /owners/{owner_id}/policy
async fn replace(
    State(ctx): State<SharedContext>,
    Path(owner_id): Path<String>,
    body: Result<Json<AvailabilityPolicy>, JsonRejection>,
) -> Result<Json<AvailabilityPolicy>, CommandError> {
    let policy = json_body(body)?;
    update_policy(&ctx, &owner_id, policy).await.map(Json)
}
