use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};

use super::SharedContext;
use crate::commands::{get_available_slots, CommandError, SlotQuery, SlotsResponse};

pub fn router() -> Router<SharedContext> {
    Router::new().route("/owners/{owner_id}/slots", get(list_slots))
}

/// GET /owners/{owner_id}/slots?date=YYYY-MM-DD&event_type_id=...
async fn list_slots(
    State(ctx): State<SharedContext>,
    Path(owner_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotsResponse>, CommandError> {
    get_available_slots(&ctx, &owner_id, query).await.map(Json)
}
