use async_trait::async_trait;
use nz_walks_sdk::Image;
use sea_orm::{ActiveModelTrait, DatabaseConnection};

use crate::domain::error::DomainError;
use crate::domain::repos::ImagesRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::image::ActiveModel as ImageAM;

#[derive(Clone)]
pub struct OrmImagesRepository {
    db: DatabaseConnection,
}

impl OrmImagesRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ImagesRepository for OrmImagesRepository {
    async fn insert(&self, image: Image) -> Result<Image, DomainError> {
        let model = ImageAM::from(image)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.into())
    }
}
