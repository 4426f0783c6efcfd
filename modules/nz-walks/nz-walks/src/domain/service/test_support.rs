//! In-memory ports for service unit tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use nz_walks_sdk::{Difficulty, Image, Region, Walk};
use uuid::Uuid;

use super::Repositories;
use crate::domain::error::DomainError;
use crate::domain::repos::{
    DifficultiesRepository, ImageStore, ImagesRepository, RegionsRepository, StoredFile,
    WalksRepository,
};

/// Vec-backed store so listing keeps insertion order.
#[derive(Default)]
pub struct MemStore {
    pub regions: Mutex<Vec<Region>>,
    pub walks: Mutex<Vec<Walk>>,
    pub difficulties: Mutex<Vec<Difficulty>>,
    pub images: Mutex<Vec<Image>>,
    pub files: Mutex<BTreeMap<String, Bytes>>,
}

impl MemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_difficulty(self: &Arc<Self>, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.difficulties.lock().unwrap().push(Difficulty {
            id,
            name: name.to_owned(),
        });
        id
    }

    pub fn with_region(self: &Arc<Self>, code: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.regions.lock().unwrap().push(Region {
            id,
            code: code.to_owned(),
            name: format!("{code} region"),
            region_image_url: None,
        });
        id
    }

    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            regions: self.clone(),
            walks: self.clone(),
            difficulties: self.clone(),
            images: self.clone(),
            image_store: self.clone(),
        }
    }
}

#[async_trait]
impl RegionsRepository for MemStore {
    async fn list(&self) -> Result<Vec<Region>, DomainError> {
        Ok(self.regions.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Region>, DomainError> {
        Ok(self.regions.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, region: Region) -> Result<Region, DomainError> {
        let mut rows = self.regions.lock().unwrap();
        if rows.iter().any(|r| r.id == region.id) {
            return Err(DomainError::constraint_violation("duplicate region id"));
        }
        rows.push(region.clone());
        Ok(region)
    }

    async fn update(&self, region: Region) -> Result<Option<Region>, DomainError> {
        let mut rows = self.regions.lock().unwrap();
        Ok(rows.iter_mut().find(|r| r.id == region.id).map(|row| {
            *row = region.clone();
            region
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Region>, DomainError> {
        let mut rows = self.regions.lock().unwrap();
        Ok(rows
            .iter()
            .position(|r| r.id == id)
            .map(|idx| rows.remove(idx)))
    }
}

impl MemStore {
    fn check_walk_refs(&self, walk: &Walk) -> Result<(), DomainError> {
        if !self.regions.lock().unwrap().iter().any(|r| r.id == walk.region_id) {
            return Err(DomainError::constraint_violation("region does not exist"));
        }
        if !self
            .difficulties
            .lock()
            .unwrap()
            .iter()
            .any(|d| d.id == walk.difficulty_id)
        {
            return Err(DomainError::constraint_violation("difficulty does not exist"));
        }
        Ok(())
    }
}

#[async_trait]
impl WalksRepository for MemStore {
    async fn list(&self) -> Result<Vec<Walk>, DomainError> {
        Ok(self.walks.lock().unwrap().clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Walk>, DomainError> {
        Ok(self.walks.lock().unwrap().iter().find(|w| w.id == id).cloned())
    }

    async fn insert(&self, walk: Walk) -> Result<Walk, DomainError> {
        self.check_walk_refs(&walk)?;
        self.walks.lock().unwrap().push(walk.clone());
        Ok(walk)
    }

    async fn update(&self, walk: Walk) -> Result<Option<Walk>, DomainError> {
        let mut rows = self.walks.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|w| w.id == walk.id) else {
            return Ok(None);
        };
        self.check_walk_refs(&walk)?;
        *row = walk.clone();
        Ok(Some(walk))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Walk>, DomainError> {
        let mut rows = self.walks.lock().unwrap();
        Ok(rows
            .iter()
            .position(|w| w.id == id)
            .map(|idx| rows.remove(idx)))
    }
}

#[async_trait]
impl DifficultiesRepository for MemStore {
    async fn list(&self) -> Result<Vec<Difficulty>, DomainError> {
        Ok(self.difficulties.lock().unwrap().clone())
    }
}

#[async_trait]
impl ImagesRepository for MemStore {
    async fn insert(&self, image: Image) -> Result<Image, DomainError> {
        self.images.lock().unwrap().push(image.clone());
        Ok(image)
    }
}

#[async_trait]
impl ImageStore for MemStore {
    async fn save(&self, stored_name: &str, content: Bytes) -> Result<StoredFile, DomainError> {
        let size_in_bytes = content.len() as u64;
        self.files
            .lock()
            .unwrap()
            .insert(stored_name.to_owned(), content);
        Ok(StoredFile {
            stored_name: stored_name.to_owned(),
            size_in_bytes,
        })
    }
}
