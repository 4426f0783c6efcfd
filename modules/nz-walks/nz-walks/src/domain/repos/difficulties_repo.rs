use async_trait::async_trait;
use nz_walks_sdk::Difficulty;

use crate::domain::error::DomainError;

/// Read-only access to the difficulty lookup table.
#[async_trait]
pub trait DifficultiesRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Difficulty>, DomainError>;
}
