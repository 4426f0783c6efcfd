use async_trait::async_trait;
use nz_walks_sdk::Region;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Repository trait for Region persistence operations.
///
/// Lookups that miss return `Ok(None)`; the service layer decides whether
/// that is a `NotFound`.
#[async_trait]
pub trait RegionsRepository: Send + Sync {
    /// All regions in storage order.
    async fn list(&self) -> Result<Vec<Region>, DomainError>;

    async fn get(&self, id: Uuid) -> Result<Option<Region>, DomainError>;

    /// Insert a fully-formed region. Fails with `ConstraintViolation` when the
    /// identifier is already taken.
    async fn insert(&self, region: Region) -> Result<Region, DomainError>;

    /// Replace every mutable column of an existing row.
    async fn update(&self, region: Region) -> Result<Option<Region>, DomainError>;

    /// Remove a region and return the snapshot that was deleted.
    async fn delete(&self, id: Uuid) -> Result<Option<Region>, DomainError>;
}
