use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::SharedContext;
use crate::commands::get_app_health;
use crate::utils::health::HealthStatus;

pub fn router() -> Router<SharedContext> {
    Router::new().route("/health", get(health))
}

/// GET /health
async fn health(State(ctx): State<SharedContext>) -> (StatusCode, Json<HealthStatus>) {
    let status = get_app_health(&ctx).await;
    let code = if status.is_healthy() { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status))
}
