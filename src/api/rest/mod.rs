use axum::{http::StatusCode, Json, Router};

use crate::{api::rest::elves::router as elves_router, services::errors::ServiceError};

pub mod elves;
pub mod health;

pub fn router() -> Router {
    Router::new().merge(elves_router())
}

pub(crate) fn to_response(err: ServiceError) -> (StatusCode, Json<serde_json::Value>) {
    (
        err.status_code(),
        Json(serde_json::json!({ "error": err.to_string() })),
    )
}
