//! The single place where faults become HTTP responses.
//!
//! Handlers and the panic catcher only tag responses: a [`Problem`] extension
//! for expected outcomes, an [`UnexpectedFault`] extension for everything
//! else. [`fault_boundary`] stamps request context onto problems and replaces
//! unexpected faults with an opaque body carrying a fresh correlation id. The
//! fault detail goes to the log under that id and nowhere else.

use std::any::Any;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::problem::Problem;

pub const FAULT_MESSAGE: &str = "Something went wrong!";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Marker for a response that must be converted by the boundary.
#[derive(Debug, Clone)]
pub struct UnexpectedFault {
    detail: Arc<str>,
}

impl UnexpectedFault {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Arc::from(detail.into()),
        }
    }

    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Bare 500 with the marker attached; the body is filled in by the boundary.
impl IntoResponse for UnexpectedFault {
    fn into_response(self) -> Response {
        let mut resp = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        resp.extensions_mut().insert(self);
        resp
    }
}

/// Body returned for every unexpected fault.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaultBody {
    /// Correlation id; search the server log for it.
    pub id: Uuid,
    pub error_message: String,
}

pub async fn fault_boundary(req: Request, next: Next) -> Response {
    let instance = req.uri().path().to_owned();
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);

    let mut response = next.run(req).await;

    if let Some(fault) = response.extensions_mut().remove::<UnexpectedFault>() {
        return fault_response(&instance, request_id.as_deref(), fault.detail());
    }
    if response.status() == StatusCode::INTERNAL_SERVER_ERROR
        && response.extensions().get::<Problem>().is_none()
    {
        return fault_response(&instance, request_id.as_deref(), "untagged internal error");
    }

    if let Some(problem) = response.extensions_mut().remove::<Problem>() {
        let mut problem = problem.with_instance(instance);
        if let Some(rid) = request_id {
            problem = problem.with_trace_id(rid);
        }
        return problem.into_response();
    }

    response
}

fn fault_response(instance: &str, request_id: Option<&str>, detail: &str) -> Response {
    let id = Uuid::new_v4();
    tracing::error!(
        correlation_id = %id,
        request_id = request_id.unwrap_or("n/a"),
        path = instance,
        detail,
        "Unhandled fault"
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(FaultBody {
            id,
            error_message: FAULT_MESSAGE.to_owned(),
        }),
    )
        .into_response()
}

/// `CatchPanicLayer` hook: turn the panic payload into a tagged fault.
pub fn panic_to_fault(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    UnexpectedFault::new(format!("panic: {detail}")).into_response()
}
