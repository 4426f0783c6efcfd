use std::sync::Arc;

use axum::{Extension, Json};

use crate::api::rest::dto::DifficultyDto;
use crate::api::rest::error::ApiResult;
use crate::domain::service::AppServices;

#[utoipa::path(
    get,
    path = "/difficulties",
    tag = "difficulties",
    responses((status = 200, body = [DifficultyDto]))
)]
pub async fn list_difficulties(
    Extension(svc): Extension<Arc<AppServices>>,
) -> ApiResult<Json<Vec<DifficultyDto>>> {
    let difficulties = svc.difficulties.list_difficulties().await?;
    Ok(Json(
        difficulties.into_iter().map(DifficultyDto::from).collect(),
    ))
}
