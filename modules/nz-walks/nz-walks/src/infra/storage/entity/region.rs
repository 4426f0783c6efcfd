use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "regions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    #[sea_orm(nullable)]
    pub region_image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::walk::Entity")]
    Walks,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::walk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Walks.def()
    }
}
