//! Startup schema bootstrap.
//!
//! Tables are derived from the entity definitions and created only when
//! missing. There is no migration history; changing a column means changing
//! the entity and recreating the database.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    Schema,
};
use tracing::info;
use uuid::Uuid;

use crate::infra::storage::entity::{difficulty, image, region, walk};

/// Seeded difficulty rows. Identifiers are fixed so clients can hard-code them.
pub const SEED_DIFFICULTIES: [(Uuid, &str); 3] = [
    (Uuid::from_u128(0x5446_6f17_02af_48e7_8ed3_5a4a_8bfa_cf6f), "Easy"),
    (Uuid::from_u128(0xea29_4873_7a8c_4c0f_bfa7_a2eb_492c_bf8c), "Medium"),
    (Uuid::from_u128(0xf808_ddcd_b5e5_4d80_b732_1ca5_23e4_8434), "Hard"),
];

/// Create missing tables (parents first) and seed the difficulty lookup.
///
/// # Errors
/// Returns the driver error when DDL or the seed insert fails.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statements = [
        schema.create_table_from_entity(region::Entity),
        schema.create_table_from_entity(difficulty::Entity),
        schema.create_table_from_entity(walk::Entity),
        schema.create_table_from_entity(image::Entity),
    ];
    for stmt in &mut statements {
        stmt.if_not_exists();
        db.execute(backend.build(&*stmt)).await?;
    }

    if difficulty::Entity::find().count(db).await? == 0 {
        for (id, name) in SEED_DIFFICULTIES {
            difficulty::ActiveModel {
                id: sea_orm::ActiveValue::Set(id),
                name: sea_orm::ActiveValue::Set(name.to_owned()),
            }
            .insert(db)
            .await?;
        }
        info!("Seeded {} difficulties", SEED_DIFFICULTIES.len());
    }

    Ok(())
}
