use axum::Json;
use serde_json::{Value, json};
use utoipa::OpenApi;

use crate::api::rest::routes::ApiDoc;

/// Liveness probe
#[utoipa::path(get, path = "/health", tag = "system", responses((status = 200)))]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
