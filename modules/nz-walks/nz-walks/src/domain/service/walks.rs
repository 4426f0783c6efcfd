use std::sync::Arc;

use nz_walks_sdk::{NewWalk, Walk, WalkQuery, WalkUpdate};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::validate_text;
use crate::domain::error::DomainError;
use crate::domain::query::WalkQueryEngine;
use crate::domain::repos::WalksRepository;

const MAX_WALK_NAME_LEN: usize = 100;
const MAX_WALK_DESCRIPTION_LEN: usize = 1000;
const MAX_WALK_LENGTH_KM: f64 = 50.0;

pub struct WalksService {
    repo: Arc<dyn WalksRepository>,
    engine: WalkQueryEngine,
}

impl WalksService {
    pub fn new(repo: Arc<dyn WalksRepository>, engine: WalkQueryEngine) -> Self {
        Self { repo, engine }
    }

    /// Retrieve every walk, then filter, sort and page in memory.
    ///
    /// The plan is resolved before storage is touched so bad paging fails
    /// without a round trip.
    #[instrument(skip(self, query))]
    pub async fn list_walks(&self, query: &WalkQuery) -> Result<Vec<Walk>, DomainError> {
        debug!(?query, "Listing walks");
        let plan = self.engine.plan(query)?;
        let walks = plan.apply(self.repo.list().await?);
        debug!("Returning {} walks", walks.len());
        Ok(walks)
    }

    #[instrument(skip(self), fields(walk_id = %id))]
    pub async fn get_walk(&self, id: Uuid) -> Result<Walk, DomainError> {
        debug!("Getting walk by id");
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Walk", id))
    }

    #[instrument(skip(self, new_walk), fields(name = %new_walk.name, region_id = %new_walk.region_id))]
    pub async fn create_walk(&self, new_walk: NewWalk) -> Result<Walk, DomainError> {
        info!("Creating new walk");
        validate_walk(&new_walk.name, &new_walk.description, new_walk.length_in_km)?;

        let walk = Walk {
            id: new_walk.id.unwrap_or_else(Uuid::now_v7),
            name: new_walk.name,
            description: new_walk.description,
            length_in_km: new_walk.length_in_km,
            walk_image_url: new_walk.walk_image_url,
            region_id: new_walk.region_id,
            difficulty_id: new_walk.difficulty_id,
        };
        let created = self.repo.insert(walk).await?;

        info!("Successfully created walk with id={}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, update), fields(walk_id = %id))]
    pub async fn update_walk(&self, id: Uuid, update: WalkUpdate) -> Result<Walk, DomainError> {
        info!("Updating walk");
        validate_walk(&update.name, &update.description, update.length_in_km)?;

        let current = self.get_walk(id).await?;
        let updated = self
            .repo
            .update(current.replaced_with(update))
            .await?
            .ok_or_else(|| DomainError::not_found("Walk", id))?;

        info!("Successfully updated walk");
        Ok(updated)
    }

    #[instrument(skip(self), fields(walk_id = %id))]
    pub async fn delete_walk(&self, id: Uuid) -> Result<Walk, DomainError> {
        info!("Deleting walk");
        let removed = self
            .repo
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Walk", id))?;
        info!("Successfully deleted walk");
        Ok(removed)
    }
}

fn validate_walk(name: &str, description: &str, length_in_km: f64) -> Result<(), DomainError> {
    validate_text("name", name, MAX_WALK_NAME_LEN)?;
    validate_text("description", description, MAX_WALK_DESCRIPTION_LEN)?;
    if !length_in_km.is_finite() || !(0.0..=MAX_WALK_LENGTH_KM).contains(&length_in_km) {
        return Err(DomainError::invalid_argument(
            "lengthInKm",
            format!("must be between 0 and {MAX_WALK_LENGTH_KM}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::service::test_support::MemStore;

    struct Fixture {
        store: Arc<MemStore>,
        svc: WalksService,
        region_a: Uuid,
        region_b: Uuid,
        easy: Uuid,
    }

    fn fixture() -> Fixture {
        let store = MemStore::new();
        let region_a = store.with_region("AKL");
        let region_b = store.with_region("WGN");
        let easy = store.with_difficulty("Easy");
        let svc = WalksService::new(store.clone(), WalkQueryEngine::default());
        Fixture {
            store,
            svc,
            region_a,
            region_b,
            easy,
        }
    }

    fn new_walk(name: &str, km: f64, region_id: Uuid, difficulty_id: Uuid) -> NewWalk {
        NewWalk {
            id: None,
            name: name.to_owned(),
            description: format!("{name} description"),
            length_in_km: km,
            walk_image_url: None,
            region_id,
            difficulty_id,
        }
    }

    #[tokio::test]
    async fn create_with_missing_region_is_a_constraint_violation_and_writes_nothing() {
        let f = fixture();
        let err = f
            .svc
            .create_walk(new_walk("Ghost Track", 3.0, Uuid::new_v4(), f.easy))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::ConstraintViolation { .. }));
        assert!(f.store.walks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_length() {
        let f = fixture();
        for km in [-1.0, 50.5, f64::NAN, f64::INFINITY] {
            let err = f
                .svc
                .create_walk(new_walk("Track", km, f.region_a, f.easy))
                .await
                .unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidArgument { ref field, .. } if field == "lengthInKm"),
                "{km} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn list_applies_the_query_engine_after_retrieval() {
        let f = fixture();
        for (name, km, region) in [
            ("Bay Track", 5.0, f.region_a),
            ("Hill Track", 12.0, f.region_b),
            ("Bay Loop", 5.0, f.region_a),
        ] {
            f.svc
                .create_walk(new_walk(name, km, region, f.easy))
                .await
                .unwrap();
        }

        let out = f
            .svc
            .list_walks(&WalkQuery {
                filter_on: Some("Name".to_owned()),
                filter_query: Some("Bay".to_owned()),
                sort_by: Some("Length".to_owned()),
                is_ascending: Some(false),
                page_number: Some(1),
                page_size: Some(10),
            })
            .await
            .unwrap();

        let names: Vec<_> = out.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, ["Bay Track", "Bay Loop"]);
    }

    #[tokio::test]
    async fn list_rejects_zero_page_size() {
        let f = fixture();
        let err = f
            .svc
            .list_walks(&WalkQuery {
                page_size: Some(0),
                ..WalkQuery::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn update_moves_walk_between_regions() {
        let f = fixture();
        let created = f
            .svc
            .create_walk(new_walk("Track", 4.0, f.region_a, f.easy))
            .await
            .unwrap();

        let updated = f
            .svc
            .update_walk(
                created.id,
                WalkUpdate {
                    name: "Track".to_owned(),
                    description: "Moved".to_owned(),
                    length_in_km: 4.5,
                    walk_image_url: None,
                    region_id: f.region_b,
                    difficulty_id: f.easy,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.region_id, f.region_b);
        assert_eq!(f.svc.get_walk(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_leave_store_unchanged() {
        let f = fixture();
        let kept = f
            .svc
            .create_walk(new_walk("Track", 4.0, f.region_a, f.easy))
            .await
            .unwrap();
        let missing = Uuid::new_v4();

        let err = f
            .svc
            .update_walk(
                missing,
                WalkUpdate {
                    name: "X".to_owned(),
                    description: "Y".to_owned(),
                    length_in_km: 1.0,
                    walk_image_url: None,
                    region_id: f.region_a,
                    difficulty_id: f.easy,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = f.svc.delete_walk(missing).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        assert_eq!(*f.store.walks.lock().unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn delete_returns_removed_snapshot() {
        let f = fixture();
        let created = f
            .svc
            .create_walk(new_walk("Track", 4.0, f.region_a, f.easy))
            .await
            .unwrap();

        assert_eq!(f.svc.delete_walk(created.id).await.unwrap(), created);
        assert!(f.svc.list_walks(&WalkQuery::default()).await.unwrap().is_empty());
    }
}
