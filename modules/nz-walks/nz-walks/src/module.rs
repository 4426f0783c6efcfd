use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::api::rest::auth::AuthState;
use crate::api::rest::{RestOptions, build_router};
use crate::config::NzWalksConfig;
use crate::domain::service::{AppServices, Repositories};
use crate::infra::files::LocalImageStore;
use crate::infra::storage::schema::ensure_schema;
use crate::infra::storage::{
    OrmDifficultiesRepository, OrmImagesRepository, OrmRegionsRepository, OrmWalksRepository,
};

/// Composition root: wires storage, services and the REST surface once at
/// startup. There is no global registry; everything hangs off this value.
pub struct NzWalks {
    services: Arc<AppServices>,
    auth: Arc<AuthState>,
    images_dir: PathBuf,
}

impl NzWalks {
    /// Bootstrap the schema, open the image directory and build services.
    ///
    /// # Errors
    /// Fails on schema bootstrap, image directory creation or invalid auth
    /// settings.
    pub async fn init(db: DatabaseConnection, config: &NzWalksConfig) -> anyhow::Result<Self> {
        ensure_schema(&db)
            .await
            .context("failed to bootstrap database schema")?;

        let image_store = LocalImageStore::open(&config.images.dir)
            .await
            .with_context(|| {
                format!(
                    "failed to create image directory {}",
                    config.images.dir.display()
                )
            })?;
        let images_dir = image_store.dir().to_path_buf();

        let repos = Repositories {
            regions: Arc::new(OrmRegionsRepository::new(db.clone())),
            walks: Arc::new(OrmWalksRepository::new(db.clone())),
            difficulties: Arc::new(OrmDifficultiesRepository::new(db.clone())),
            images: Arc::new(OrmImagesRepository::new(db)),
            image_store: Arc::new(image_store),
        };

        let auth = Arc::new(AuthState::from_config(&config.auth)?);
        let services = Arc::new(AppServices::new(repos, config));

        info!(
            images_dir = %images_dir.display(),
            auth_enabled = auth.is_enabled(),
            "nz_walks module initialized"
        );

        Ok(Self {
            services,
            auth,
            images_dir,
        })
    }

    /// Full router with the middleware stack applied.
    #[must_use]
    pub fn router(&self, options: &RestOptions) -> Router {
        build_router(
            Arc::clone(&self.services),
            Arc::clone(&self.auth),
            &self.images_dir,
            options,
        )
    }
}
