use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::error::ApiError;

pub mod difficulties;
pub mod images;
pub mod regions;
pub mod system;
pub mod walks;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("query", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("id", rejection.body_text())
    }
}

/// `201 Created` with a `Location` header and a JSON body.
pub(crate) fn created_json<T: Serialize>(location: &str, body: T) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, location.to_owned())],
        Json(body),
    )
        .into_response()
}

/// Location of a newly created child of the collection at `collection_path`.
pub(crate) fn child_location(collection_path: &str, id: impl std::fmt::Display) -> String {
    format!("{}/{id}", collection_path.trim_end_matches('/'))
}
