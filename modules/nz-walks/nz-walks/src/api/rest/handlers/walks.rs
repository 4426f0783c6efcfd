use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query};
use axum::response::Response;
use axum::{Extension, Json};
use nz_walks_sdk::WalkQuery;
use tracing::info;
use uuid::Uuid;

use super::{child_location, created_json};
use crate::api::rest::dto::{AddWalkReq, UpdateWalkReq, WalkDto, WalkListParams};
use crate::api::rest::error::ApiResult;
use crate::api::rest::problem::Problem;
use crate::domain::service::AppServices;

/// Filter, sort and page walks
#[utoipa::path(
    get,
    path = "/walks",
    tag = "walks",
    params(WalkListParams),
    responses(
        (status = 200, body = [WalkDto]),
        (status = 400, description = "Page number or size below 1", body = Problem)
    )
)]
pub async fn list_walks(
    Extension(svc): Extension<Arc<AppServices>>,
    params: Result<Query<WalkListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<WalkDto>>> {
    let Query(params) = params?;
    let walks = svc.walks.list_walks(&WalkQuery::from(params)).await?;
    Ok(Json(walks.into_iter().map(WalkDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/walks/{id}",
    tag = "walks",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, body = WalkDto),
        (status = 404, body = Problem)
    )
)]
pub async fn get_walk(
    Extension(svc): Extension<Arc<AppServices>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<WalkDto>> {
    let Path(id) = path?;
    Ok(Json(svc.walks.get_walk(id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/walks",
    tag = "walks",
    request_body = AddWalkReq,
    responses(
        (status = 201, body = WalkDto),
        (status = 400, body = Problem),
        (status = 409, description = "Region or difficulty does not exist", body = Problem)
    )
)]
pub async fn create_walk(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<AppServices>>,
    body: Result<Json<AddWalkReq>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body?;
    info!(name = %req.name, region_id = %req.region_id, "Creating walk");

    let walk = svc.walks.create_walk(req.into()).await?;
    let location = child_location(uri.path(), walk.id);
    Ok(created_json(&location, WalkDto::from(walk)))
}

#[utoipa::path(
    put,
    path = "/walks/{id}",
    tag = "walks",
    params(("id" = Uuid, Path)),
    request_body = UpdateWalkReq,
    responses(
        (status = 200, body = WalkDto),
        (status = 400, body = Problem),
        (status = 404, body = Problem),
        (status = 409, body = Problem)
    )
)]
pub async fn update_walk(
    Extension(svc): Extension<Arc<AppServices>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateWalkReq>, JsonRejection>,
) -> ApiResult<Json<WalkDto>> {
    let Path(id) = path?;
    let Json(req) = body?;
    Ok(Json(svc.walks.update_walk(id, req.into()).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/walks/{id}",
    tag = "walks",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "The removed walk", body = WalkDto),
        (status = 404, body = Problem)
    )
)]
pub async fn delete_walk(
    Extension(svc): Extension<Arc<AppServices>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<WalkDto>> {
    let Path(id) = path?;
    Ok(Json(svc.walks.delete_walk(id).await?.into()))
}
