use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// Metadata only; the bytes live in the image directory.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub file_name: String,
    #[sea_orm(nullable)]
    pub file_description: Option<String>,
    pub file_extension: String,
    pub file_size_in_bytes: i64,
    pub file_path: String,
    pub content_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
