use async_trait::async_trait;
use nz_walks_sdk::Difficulty;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::error::DomainError;
use crate::domain::repos::DifficultiesRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::difficulty::{Column, Entity as DifficultyEntity};

#[derive(Clone)]
pub struct OrmDifficultiesRepository {
    db: DatabaseConnection,
}

impl OrmDifficultiesRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DifficultiesRepository for OrmDifficultiesRepository {
    async fn list(&self) -> Result<Vec<Difficulty>, DomainError> {
        let rows = DifficultyEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
