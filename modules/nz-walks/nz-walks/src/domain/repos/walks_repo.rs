use async_trait::async_trait;
use nz_walks_sdk::Walk;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Repository trait for Walk persistence operations.
///
/// Writes check that the referenced region and difficulty exist in the same
/// transaction as the write, so a dangling reference never reaches storage.
#[async_trait]
pub trait WalksRepository: Send + Sync {
    /// All walks in storage order. Filtering, sorting and paging happen
    /// afterwards in the query engine.
    async fn list(&self) -> Result<Vec<Walk>, DomainError>;

    async fn get(&self, id: Uuid) -> Result<Option<Walk>, DomainError>;

    /// Insert a walk. Fails with `ConstraintViolation` when the region or
    /// difficulty is missing or the identifier is already taken.
    async fn insert(&self, walk: Walk) -> Result<Walk, DomainError>;

    async fn update(&self, walk: Walk) -> Result<Option<Walk>, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<Option<Walk>, DomainError>;
}
