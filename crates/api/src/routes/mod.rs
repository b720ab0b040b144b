//! HTTP surface
//!
//! Handlers stay thin: extract, call the command, render. Every failure is
//! rendered as `{"error": code, "message": text}`.

pub mod bookings;
pub mod event_types;
pub mod health;
pub mod policy;
pub mod slots;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use slotwise_domain::ErrorKind;

use crate::commands::CommandError;
use crate::context::AppContext;

pub type SharedContext = Arc<AppContext>;

/// All routes, bound to one application context.
pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .merge(health::router())
        .merge(slots::router())
        .merge(bookings::router())
        .merge(policy::router())
        .merge(event_types::router())
        .with_state(ctx)
}

impl CommandError {
    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::Contention => StatusCode::CONFLICT,
            ErrorKind::Infrastructure => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Input if self.is_not_found() => StatusCode::NOT_FOUND,
            ErrorKind::Input if self.code == "invalid_input" => StatusCode::BAD_REQUEST,
            ErrorKind::Input => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<JsonRejection> for CommandError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_input(rejection.body_text())
    }
}

/// Unwraps a JSON body, turning extractor rejections into `invalid_input`.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, CommandError> {
    body.map(|Json(value)| value).map_err(CommandError::from)
}
