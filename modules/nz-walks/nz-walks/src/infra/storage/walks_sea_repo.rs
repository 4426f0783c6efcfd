use async_trait::async_trait;
use nz_walks_sdk::Walk;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::WalksRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::{difficulty, region};
use crate::infra::storage::entity::walk::{
    ActiveModel as WalkAM, Column as WalkColumn, Entity as WalkEntity,
};

/// ORM-based implementation of the `WalksRepository` trait.
#[derive(Clone)]
pub struct OrmWalksRepository {
    db: DatabaseConnection,
}

impl OrmWalksRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Both referenced rows must exist inside the caller's transaction.
async fn ensure_references<C: ConnectionTrait>(conn: &C, walk: &Walk) -> Result<(), DomainError> {
    if region::Entity::find_by_id(walk.region_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .is_none()
    {
        return Err(DomainError::constraint_violation(format!(
            "region {} does not exist",
            walk.region_id
        )));
    }
    if difficulty::Entity::find_by_id(walk.difficulty_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .is_none()
    {
        return Err(DomainError::constraint_violation(format!(
            "difficulty {} does not exist",
            walk.difficulty_id
        )));
    }
    Ok(())
}

#[async_trait]
impl WalksRepository for OrmWalksRepository {
    async fn list(&self) -> Result<Vec<Walk>, DomainError> {
        let rows = WalkEntity::find()
            .order_by_asc(WalkColumn::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Walk>, DomainError> {
        let found = WalkEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, walk: Walk) -> Result<Walk, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        ensure_references(&txn, &walk).await?;

        let model = WalkAM::from(walk).insert(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(model.into())
    }

    async fn update(&self, walk: Walk) -> Result<Option<Walk>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        if WalkEntity::find_by_id(walk.id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Ok(None);
        }
        ensure_references(&txn, &walk).await?;

        let model = WalkAM::from(walk)
            .update(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Walk>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(found) = WalkEntity::find_by_id(id)
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
