use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::error::DomainError;

/// Outcome of persisting an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Final name inside the image directory, extension included.
    pub stored_name: String,
    pub size_in_bytes: u64,
}

/// Port for the binary side of image ingestion.
///
/// Implementations must make the file fully visible under `stored_name` only
/// once every byte is written.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, stored_name: &str, content: Bytes) -> Result<StoredFile, DomainError>;
}
