use async_trait::async_trait;
use nz_walks_sdk::Image;

use crate::domain::error::DomainError;

/// Persistence of image metadata rows.
#[async_trait]
pub trait ImagesRepository: Send + Sync {
    async fn insert(&self, image: Image) -> Result<Image, DomainError>;
}
