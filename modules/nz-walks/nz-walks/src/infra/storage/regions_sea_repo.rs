use async_trait::async_trait;
use nz_walks_sdk::Region;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::RegionsRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::region::{
    ActiveModel as RegionAM, Column as RegionColumn, Entity as RegionEntity,
};

/// ORM-based implementation of the `RegionsRepository` trait.
#[derive(Clone)]
pub struct OrmRegionsRepository {
    db: DatabaseConnection,
}

impl OrmRegionsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegionsRepository for OrmRegionsRepository {
    async fn list(&self) -> Result<Vec<Region>, DomainError> {
        let rows = RegionEntity::find()
            .order_by_asc(RegionColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Region>, DomainError> {
        let found = RegionEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, region: Region) -> Result<Region, DomainError> {
        let model = RegionAM::from(region)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.into())
    }

    async fn update(&self, region: Region) -> Result<Option<Region>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        if RegionEntity::find_by_id(region.id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Ok(None);
        }

        let model = RegionAM::from(region)
            .update(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Region>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(found) = RegionEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        found.clone().delete(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(Some(found.into()))
    }
}
