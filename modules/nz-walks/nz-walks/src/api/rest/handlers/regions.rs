use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{OriginalUri, Path};
use axum::response::Response;
use axum::{Extension, Json};
use tracing::info;
use uuid::Uuid;

use super::{child_location, created_json};
use crate::api::rest::dto::{AddRegionReq, RegionDto, UpdateRegionReq};
use crate::api::rest::error::ApiResult;
use crate::api::rest::problem::Problem;
use crate::domain::service::AppServices;

#[utoipa::path(
    get,
    path = "/regions",
    tag = "regions",
    responses(
        (status = 200, body = [RegionDto]),
        (status = 401, body = Problem),
        (status = 403, body = Problem)
    )
)]
pub async fn list_regions(
    Extension(svc): Extension<Arc<AppServices>>,
) -> ApiResult<Json<Vec<RegionDto>>> {
    let regions = svc.regions.list_regions().await?;
    Ok(Json(regions.into_iter().map(RegionDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/regions/{id}",
    tag = "regions",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, body = RegionDto),
        (status = 404, body = Problem)
    )
)]
pub async fn get_region(
    Extension(svc): Extension<Arc<AppServices>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<RegionDto>> {
    let Path(id) = path?;
    Ok(Json(svc.regions.get_region(id).await?.into()))
}

#[utoipa::path(
    post,
    path = "/regions",
    tag = "regions",
    request_body = AddRegionReq,
    responses(
        (status = 201, body = RegionDto),
        (status = 400, body = Problem),
        (status = 409, body = Problem)
    )
)]
pub async fn create_region(
    OriginalUri(uri): OriginalUri,
    Extension(svc): Extension<Arc<AppServices>>,
    body: Result<Json<AddRegionReq>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body?;
    info!(code = %req.code, "Creating region");

    let region = svc.regions.create_region(req.into()).await?;
    let location = child_location(uri.path(), region.id);
    Ok(created_json(&location, RegionDto::from(region)))
}

#[utoipa::path(
    put,
    path = "/regions/{id}",
    tag = "regions",
    params(("id" = Uuid, Path)),
    request_body = UpdateRegionReq,
    responses(
        (status = 200, body = RegionDto),
        (status = 400, body = Problem),
        (status = 404, body = Problem)
    )
)]
pub async fn update_region(
    Extension(svc): Extension<Arc<AppServices>>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateRegionReq>, JsonRejection>,
) -> ApiResult<Json<RegionDto>> {
    let Path(id) = path?;
    let Json(req) = body?;
    Ok(Json(svc.regions.update_region(id, req.into()).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/regions/{id}",
    tag = "regions",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "The removed region", body = RegionDto),
        (status = 404, body = Problem),
        (status = 409, description = "Walks still reference the region", body = Problem)
    )
)]
pub async fn delete_region(
    Extension(svc): Extension<Arc<AppServices>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<RegionDto>> {
    let Path(id) = path?;
    Ok(Json(svc.regions.delete_region(id).await?.into()))
}
