use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use nz_walks_sdk::Image;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::ImagesConfig;
use crate::domain::error::DomainError;
use crate::domain::repos::{ImageStore, ImagesRepository};

const MAX_FILE_NAME_LEN: usize = 100;

/// A multipart upload after transport decoding.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Name the client sent with the file part; only its extension is used.
    pub original_file_name: String,
    /// Target name without extension.
    pub file_name: String,
    pub file_description: Option<String>,
    pub content: Bytes,
}

pub struct ImagesService {
    repo: Arc<dyn ImagesRepository>,
    store: Arc<dyn ImageStore>,
    config: ImagesConfig,
}

impl ImagesService {
    pub fn new(
        repo: Arc<dyn ImagesRepository>,
        store: Arc<dyn ImageStore>,
        config: ImagesConfig,
    ) -> Self {
        Self {
            repo,
            store,
            config,
        }
    }

    #[must_use]
    pub fn max_file_size_bytes(&self) -> u64 {
        self.config.max_file_size_bytes
    }

    /// Validate, persist the bytes, then record metadata.
    ///
    /// `public_base` is `{scheme}://{host}{base_path}` of the current request;
    /// the stored file is addressed as `{public_base}/images/{name}{ext}`.
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.content.len()))]
    pub async fn upload_image(
        &self,
        upload: ImageUpload,
        public_base: &str,
    ) -> Result<Image, DomainError> {
        info!("Uploading image");

        let extension = self.validate(&upload)?;
        let stored_name = format!("{}{extension}", upload.file_name);

        let stored = self.store.save(&stored_name, upload.content).await?;

        let image = Image {
            id: Uuid::now_v7(),
            file_name: upload.file_name,
            file_description: upload.file_description,
            content_type: content_type_for(&extension).to_owned(),
            file_extension: extension,
            file_size_in_bytes: stored.size_in_bytes,
            file_path: format!(
                "{}/images/{}",
                public_base.trim_end_matches('/'),
                stored.stored_name
            ),
        };
        let image = self.repo.insert(image).await?;

        info!("Successfully uploaded image with id={}", image.id);
        Ok(image)
    }

    /// Resolve the lower-cased extension (with its leading dot) of the
    /// client's original file name and check it against the allow-list.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidArgument` on `file` when the extension is
    /// missing or not allowed.
    pub fn check_extension(&self, original_file_name: &str) -> Result<String, DomainError> {
        let extension = Path::new(original_file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if self
            .config
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            Ok(extension)
        } else {
            Err(DomainError::invalid_argument(
                "file",
                format!(
                    "Unsupported file extension '{extension}'; allowed: {}",
                    self.config.allowed_extensions.join(", ")
                ),
            ))
        }
    }

    /// Every check that must pass before any I/O.
    fn validate(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        let extension = self.check_extension(&upload.original_file_name)?;

        if upload.content.len() as u64 > self.config.max_file_size_bytes {
            return Err(DomainError::invalid_argument(
                "file",
                format!(
                    "File size more than {} bytes, please upload a smaller file",
                    self.config.max_file_size_bytes
                ),
            ));
        }

        validate_file_name(&upload.file_name)?;
        Ok(extension)
    }
}

/// The name becomes both a path component and a URL segment, so it is kept
/// to unreserved URL characters. A leading dot is refused: dot segments and
/// hidden files (including in-flight temp files) are never addressable.
fn validate_file_name(name: &str) -> Result<(), DomainError> {
    let invalid = name.is_empty()
        || name.len() > MAX_FILE_NAME_LEN
        || name.starts_with('.')
        || !name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'));
    if invalid {
        return Err(DomainError::invalid_argument(
            "fileName",
            format!(
                "must be 1..={MAX_FILE_NAME_LEN} characters of A-Z, a-z, 0-9, '-', '_', '.', '~' and not start with '.'"
            ),
        ));
    }
    Ok(())
}

fn content_type_for(extension: &str) -> &'static str {
    match extension {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        _ => "application/octet-stream",
    }
}
