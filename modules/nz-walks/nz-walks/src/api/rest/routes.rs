use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::{Extension, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;
use utoipa::OpenApi;

use super::auth::{AuthState, require_role};
use super::boundary::{FaultBody, fault_boundary, panic_to_fault};
use super::dto::{
    AddRegionReq, AddWalkReq, DifficultyDto, ImageDto, ImageUploadForm, RegionDto,
    UpdateRegionReq, UpdateWalkReq, WalkDto,
};
use super::handlers::{difficulties, images, regions, system, walks};
use super::problem::{Problem, ValidationViolation};
use crate::domain::service::AppServices;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// How the service is addressed from outside; used to build image URLs.
#[derive(Debug, Clone)]
pub struct PublicUrl {
    /// Prefix every route is mounted under, e.g. `/api`. Empty for root.
    pub base_path: String,
    /// Used when the request has no `X-Forwarded-Proto`.
    pub default_scheme: String,
    /// Used when the request has no `Host` header.
    pub default_host: String,
}

/// Transport settings for the router.
#[derive(Debug, Clone)]
pub struct RestOptions {
    pub public_url: PublicUrl,
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for RestOptions {
    fn default() -> Self {
        Self {
            public_url: PublicUrl {
                base_path: String::new(),
                default_scheme: "http".to_owned(),
                default_host: "localhost".to_owned(),
            },
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 16 * 1024 * 1024,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "NZ Walks API", description = "Regions, walks and image uploads"),
    paths(
        regions::list_regions,
        regions::get_region,
        regions::create_region,
        regions::update_region,
        regions::delete_region,
        walks::list_walks,
        walks::get_walk,
        walks::create_walk,
        walks::update_walk,
        walks::delete_walk,
        difficulties::list_difficulties,
        images::upload_image,
        system::health,
    ),
    components(schemas(
        RegionDto,
        AddRegionReq,
        UpdateRegionReq,
        WalkDto,
        AddWalkReq,
        UpdateWalkReq,
        DifficultyDto,
        ImageDto,
        ImageUploadForm,
        Problem,
        ValidationViolation,
        FaultBody,
    ))
)]
pub struct ApiDoc;

fn api_routes(auth: Arc<AuthState>, images_dir: &Path) -> Router {
    let region_routes = Router::new()
        .route(
            "/regions",
            get(regions::list_regions).post(regions::create_region),
        )
        .route(
            "/regions/{id}",
            get(regions::get_region)
                .put(regions::update_region)
                .delete(regions::delete_region),
        )
        .route_layer(from_fn_with_state(auth, require_role));

    Router::new()
        .merge(region_routes)
        .route("/walks", get(walks::list_walks).post(walks::create_walk))
        .route(
            "/walks/{id}",
            get(walks::get_walk)
                .put(walks::update_walk)
                .delete(walks::delete_walk),
        )
        .route("/difficulties", get(difficulties::list_difficulties))
        .route("/images/upload", post(images::upload_image))
        .nest_service("/images", ServeDir::new(images_dir))
        .route("/health", get(system::health))
        .route("/openapi.json", get(system::openapi_json))
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");

                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    module = "nz_walks",
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    )
}

/// `""`, `"/"` → `""`; `"api/"` → `"/api"`.
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Build the complete HTTP router.
///
/// Runtime order (outermost first): `SetRequestId` → `PropagateRequestId` →
/// Trace → Timeout → `BodyLimit` → fault boundary → panic catcher → auth
/// (regions only) → handler.
pub fn build_router(
    services: Arc<AppServices>,
    auth: Arc<AuthState>,
    images_dir: &Path,
    options: &RestOptions,
) -> Router {
    let base_path = normalize_base_path(&options.public_url.base_path);
    let api = api_routes(auth, images_dir)
        .layer(Extension(services))
        .layer(Extension(Arc::new(PublicUrl {
            base_path: base_path.clone(),
            ..options.public_url.clone()
        })));

    let mut router = if base_path.is_empty() {
        api
    } else {
        Router::new().nest(&base_path, api)
    };

    router = router.layer(CatchPanicLayer::custom(panic_to_fault));
    router = router.layer(from_fn(fault_boundary));

    router = router.layer(RequestBodyLimitLayer::new(options.body_limit_bytes));
    router = router.layer(DefaultBodyLimit::max(options.body_limit_bytes));

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        options.request_timeout,
    ));

    router = apply_trace_layer(router);

    let x_request_id = axum::http::HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}
