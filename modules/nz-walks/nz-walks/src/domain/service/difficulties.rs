use std::sync::Arc;

use nz_walks_sdk::Difficulty;
use tracing::{debug, instrument};

use crate::domain::error::DomainError;
use crate::domain::repos::DifficultiesRepository;

pub struct DifficultiesService {
    repo: Arc<dyn DifficultiesRepository>,
}

impl DifficultiesService {
    pub fn new(repo: Arc<dyn DifficultiesRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn list_difficulties(&self) -> Result<Vec<Difficulty>, DomainError> {
        debug!("Listing difficulties");
        self.repo.list().await
    }
}
