use std::sync::Arc;

use axum::Extension;
use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::http::{HeaderMap, header};
use axum::response::Response;
use bytes::{Bytes, BytesMut};
use tracing::info;

use super::created_json;
use crate::api::rest::dto::{ImageDto, ImageUploadForm};
use crate::api::rest::error::{ApiError, ApiResult};
use crate::api::rest::problem::Problem;
use crate::api::rest::routes::PublicUrl;
use crate::domain::error::DomainError;
use crate::domain::service::{AppServices, ImageUpload};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Upload an image and record its metadata
#[utoipa::path(
    post,
    path = "/images/upload",
    tag = "images",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, body = ImageDto),
        (status = 400, description = "Missing part, unsupported extension or file too large", body = Problem)
    )
)]
pub async fn upload_image(
    Extension(svc): Extension<Arc<AppServices>>,
    Extension(public_url): Extension<Arc<PublicUrl>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Response> {
    let mut multipart = multipart.map_err(|e| ApiError::bad_request("body", e.body_text()))?;
    let max = svc.images.max_file_size_bytes();

    let mut file: Option<(String, Bytes)> = None;
    let mut file_name = None;
    let mut file_description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request("body", e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                let original = field.file_name().unwrap_or_default().to_owned();
                // Refuse disallowed types before buffering the body.
                svc.images.check_extension(&original)?;
                let content = read_capped(field, max).await?;
                file = Some((original, content));
            }
            "fileName" => file_name = Some(read_text(field, "fileName").await?),
            "fileDescription" => {
                file_description = Some(read_text(field, "fileDescription").await?);
            }
            _ => {}
        }
    }

    let (original_file_name, content) =
        file.ok_or_else(|| ApiError::bad_request("file", "is required"))?;
    let file_name = file_name.ok_or_else(|| ApiError::bad_request("fileName", "is required"))?;

    info!(file_name = %file_name, bytes = content.len(), "Uploading image");

    let upload = ImageUpload {
        original_file_name,
        file_name,
        file_description: file_description.filter(|d| !d.trim().is_empty()),
        content,
    };
    let image = svc
        .images
        .upload_image(upload, &public_url.base_for(&headers))
        .await?;

    let location = image.file_path.clone();
    Ok(created_json(&location, ImageDto::from(image)))
}

/// Buffer a file part, failing as soon as it exceeds `max` bytes.
async fn read_capped(mut field: Field<'_>, max: u64) -> Result<Bytes, ApiError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::bad_request("file", e.body_text()))?
    {
        if (buf.len() + chunk.len()) as u64 > max {
            return Err(DomainError::invalid_argument(
                "file",
                format!("File size more than {max} bytes, please upload a smaller file"),
            )
            .into());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(name, e.body_text()))
}

impl PublicUrl {
    /// `{scheme}://{host}{base_path}` as seen by the client.
    #[must_use]
    pub fn base_for(&self, headers: &HeaderMap) -> String {
        let scheme = headers
            .get(FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.default_scheme);
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(&self.default_host);
        format!("{scheme}://{host}{}", self.base_path)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn public_url() -> PublicUrl {
        PublicUrl {
            base_path: "/api".to_owned(),
            default_scheme: "http".to_owned(),
            default_host: "localhost:8087".to_owned(),
        }
    }

    #[test]
    fn base_uses_request_host_and_default_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("walks.nz"));
        assert_eq!(public_url().base_for(&headers), "http://walks.nz/api");
    }

    #[test]
    fn forwarded_proto_wins_over_default_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("walks.nz"));
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("https, http"));
        assert_eq!(public_url().base_for(&headers), "https://walks.nz/api");
    }

    #[test]
    fn missing_host_falls_back_to_configured_host() {
        assert_eq!(
            public_url().base_for(&HeaderMap::new()),
            "http://localhost:8087/api"
        );
    }
}
