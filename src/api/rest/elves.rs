use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::{
    api::rest::to_response,
    domain::models::{ElfProfileWithStats, ElfSummary},
    infrastructure::state::AppState,
    services::elves::{CreateElfRequest, ElfService, UpdateElfRequest},
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<serde_json::Value>)>;

pub fn router() -> Router {
    Router::new()
        .route("/elves", get(list_elves))
        .route("/elf", post(create_elf))
        .route("/elf/:name", get(get_elf).put(update_elf))
}

async fn list_elves(Extension(state): Extension<Arc<AppState>>) -> ApiResult<Vec<ElfSummary>> {
    let service = ElfService::new(state);
    let elves = service.list_elves().await.map_err(to_response)?;
    Ok(Json(elves))
}

async fn get_elf(
    Extension(state): Extension<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<ElfProfileWithStats> {
    let service = ElfService::new(state);
    let profile = service.get_elf(&name).await.map_err(to_response)?;
    Ok(Json(profile))
}

async fn create_elf(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateElfRequest>,
) -> ApiResult<ElfProfileWithStats> {
    let service = ElfService::new(state);
    let profile = service.create_elf(payload).await.map_err(to_response)?;
    Ok(Json(profile))
}

async fn update_elf(
    Extension(state): Extension<Arc<AppState>>,
    Path(name): Path<String>,
    Json(payload): Json<UpdateElfRequest>,
) -> ApiResult<ElfProfileWithStats> {
    let service = ElfService::new(state);
    let profile = service
        .update_elf(&name, payload)
        .await
        .map_err(to_response)?;
    Ok(Json(profile))
}
