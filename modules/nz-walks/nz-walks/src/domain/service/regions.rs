use std::sync::Arc;

use nz_walks_sdk::{NewRegion, Region, RegionUpdate};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::validate_text;
use crate::domain::error::DomainError;
use crate::domain::repos::RegionsRepository;

const REGION_CODE_LEN: usize = 3;
const MAX_REGION_NAME_LEN: usize = 100;

pub struct RegionsService {
    repo: Arc<dyn RegionsRepository>,
}

impl RegionsService {
    pub fn new(repo: Arc<dyn RegionsRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn list_regions(&self) -> Result<Vec<Region>, DomainError> {
        debug!("Listing regions");
        let regions = self.repo.list().await?;
        debug!("Listed {} regions", regions.len());
        Ok(regions)
    }

    #[instrument(skip(self), fields(region_id = %id))]
    pub async fn get_region(&self, id: Uuid) -> Result<Region, DomainError> {
        debug!("Getting region by id");
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Region", id))
    }

    #[instrument(skip(self, new_region), fields(code = %new_region.code))]
    pub async fn create_region(&self, new_region: NewRegion) -> Result<Region, DomainError> {
        info!("Creating new region");
        validate_region(&new_region.code, &new_region.name)?;

        let region = Region {
            id: new_region.id.unwrap_or_else(Uuid::now_v7),
            code: new_region.code,
            name: new_region.name,
            region_image_url: new_region.region_image_url,
        };
        let created = self.repo.insert(region).await?;

        info!("Successfully created region with id={}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, update), fields(region_id = %id))]
    pub async fn update_region(
        &self,
        id: Uuid,
        update: RegionUpdate,
    ) -> Result<Region, DomainError> {
        info!("Updating region");
        validate_region(&update.code, &update.name)?;

        let current = self.get_region(id).await?;
        let updated = self
            .repo
            .update(current.replaced_with(update))
            .await?
            .ok_or_else(|| DomainError::not_found("Region", id))?;

        info!("Successfully updated region");
        Ok(updated)
    }

    #[instrument(skip(self), fields(region_id = %id))]
    pub async fn delete_region(&self, id: Uuid) -> Result<Region, DomainError> {
        info!("Deleting region");
        let removed = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Region", id))?;
        info!("Successfully deleted region");
        Ok(removed)
    }
}

fn validate_region(code: &str, name: &str) -> Result<(), DomainError> {
    if code.chars().count() != REGION_CODE_LEN {
        return Err(DomainError::invalid_argument(
            "code",
            format!("must be exactly {REGION_CODE_LEN} characters"),
        ));
    }
    validate_text("name", name, MAX_REGION_NAME_LEN)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::service::test_support::MemStore;

    fn service(store: &Arc<MemStore>) -> RegionsService {
        RegionsService::new(store.clone())
    }

    fn new_region(code: &str, name: &str) -> NewRegion {
        NewRegion {
            id: None,
            code: code.to_owned(),
            name: name.to_owned(),
            region_image_url: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_an_identifier_when_absent() {
        let store = MemStore::new();
        let svc = service(&store);

        let created = svc.create_region(new_region("AKL", "Auckland")).await.unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(svc.get_region(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_keeps_a_supplied_identifier() {
        let store = MemStore::new();
        let id = Uuid::new_v4();
        let created = service(&store)
            .create_region(NewRegion {
                id: Some(id),
                ..new_region("NSN", "Nelson")
            })
            .await
            .unwrap();
        assert_eq!(created.id, id);
    }

    #[tokio::test]
    async fn create_rejects_bad_code_and_writes_nothing() {
        let store = MemStore::new();
        let err = service(&store)
            .create_region(new_region("AUCK", "Auckland"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument { ref field, .. } if field == "code"));
        assert!(store.regions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let store = MemStore::new();
        let err = service(&store)
            .create_region(new_region("AKL", "  "))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { ref field, .. } if field == "name"));
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let store = MemStore::new();
        let svc = service(&store);
        let created = svc.create_region(new_region("AKL", "Auckland")).await.unwrap();

        let updated = svc
            .update_region(
                created.id,
                RegionUpdate {
                    code: "WGN".to_owned(),
                    name: "Wellington".to_owned(),
                    region_image_url: Some("https://img/wgn.png".to_owned()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.code, "WGN");
        assert_eq!(svc.get_region(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found_and_does_not_upsert() {
        let store = MemStore::new();
        let svc = service(&store);
        let missing = Uuid::new_v4();

        let err = svc
            .update_region(
                missing,
                RegionUpdate {
                    code: "WGN".to_owned(),
                    name: "Wellington".to_owned(),
                    region_image_url: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { id, .. } if id == missing));
        assert!(store.regions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_returns_snapshot_then_not_found() {
        let store = MemStore::new();
        let svc = service(&store);
        let created = svc.create_region(new_region("AKL", "Auckland")).await.unwrap();

        let removed = svc.delete_region(created.id).await.unwrap();
        assert_eq!(removed, created);

        let err = svc.delete_region(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(svc.list_regions().await.unwrap().is_empty());
    }
}
