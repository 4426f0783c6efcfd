//! Domain service layer - business logic and rules.
//!
//! One service per resource:
//! - `regions` - Region CRUD and field validation
//! - `walks` - Walk CRUD plus listing through the query engine
//! - `difficulties` - read-only lookup listing
//! - `images` - upload validation, file persistence and metadata
//!
//! The domain layer never imports `api::*`; handlers depend on services, not
//! the other way round.

use std::sync::Arc;

use crate::config::NzWalksConfig;
use crate::domain::error::DomainError;
use crate::domain::query::WalkQueryEngine;
use crate::domain::repos::{
    DifficultiesRepository, ImageStore, ImagesRepository, RegionsRepository, WalksRepository,
};

mod difficulties;
mod images;
mod regions;
mod walks;

pub use difficulties::DifficultiesService;
pub use images::{ImageUpload, ImagesService};
pub use regions::RegionsService;
pub use walks::WalksService;

#[cfg(test)]
pub(crate) mod test_support;

/// Every storage port the services need.
#[derive(Clone)]
pub struct Repositories {
    pub regions: Arc<dyn RegionsRepository>,
    pub walks: Arc<dyn WalksRepository>,
    pub difficulties: Arc<dyn DifficultiesRepository>,
    pub images: Arc<dyn ImagesRepository>,
    pub image_store: Arc<dyn ImageStore>,
}

// DI container - wired once at startup, handed to the REST layer
#[derive(Clone)]
pub struct AppServices {
    pub regions: Arc<RegionsService>,
    pub walks: Arc<WalksService>,
    pub difficulties: Arc<DifficultiesService>,
    pub images: Arc<ImagesService>,
}

impl AppServices {
    #[must_use]
    pub fn new(repos: Repositories, config: &NzWalksConfig) -> Self {
        Self {
            regions: Arc::new(RegionsService::new(repos.regions)),
            walks: Arc::new(WalksService::new(
                repos.walks,
                WalkQueryEngine::new(config.walks.clone()),
            )),
            difficulties: Arc::new(DifficultiesService::new(repos.difficulties)),
            images: Arc::new(ImagesService::new(
                repos.images,
                repos.image_store,
                config.images.clone(),
            )),
        }
    }
}

/// Reject blank values and values longer than `max` characters.
pub(crate) fn validate_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_argument(field, "must not be empty"));
    }
    if value.chars().count() > max {
        return Err(DomainError::invalid_argument(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}
