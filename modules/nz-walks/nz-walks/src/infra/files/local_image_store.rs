use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::{ImageStore, StoredFile};

/// Stores uploads in a local directory.
///
/// Bytes go to a hidden temporary file first and are renamed into place after
/// `sync_all`, so a reader never observes a partial image. A request aborted
/// mid-write can leave a `.tmp` file behind.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    /// Create the directory if needed.
    ///
    /// # Errors
    /// Returns the I/O error when the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, stored_name: &str, content: Bytes) -> Result<StoredFile, DomainError> {
        let final_path = self.dir.join(stored_name);
        let tmp_path = self
            .dir
            .join(format!(".{stored_name}.{}.tmp", Uuid::new_v4().simple()));

        let written = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(&content).await?;
            file.sync_all().await?;
            tokio::fs::rename(&tmp_path, &final_path).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                warn!(path = %tmp_path.display(), error = %cleanup, "Failed to remove temporary upload");
            }
            return Err(e.into());
        }

        debug!(path = %final_path.display(), bytes = content.len(), "Stored image file");
        Ok(StoredFile {
            stored_name: stored_name.to_owned(),
            size_in_bytes: content.len() as u64,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_leaves_only_the_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::open(dir.path()).await.unwrap();

        let stored = store
            .save("river.png", Bytes::from_static(b"\x89PNG\r\n"))
            .await
            .unwrap();

        assert_eq!(stored.stored_name, "river.png");
        assert_eq!(stored.size_in_bytes, 6);
        assert_eq!(
            std::fs::read(dir.path().join("river.png")).unwrap(),
            b"\x89PNG\r\n"
        );
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["river.png"]);
    }

    #[tokio::test]
    async fn save_replaces_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::open(dir.path()).await.unwrap();

        store.save("a.jpg", Bytes::from_static(b"old")).await.unwrap();
        store.save("a.jpg", Bytes::from_static(b"new")).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.jpg")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn open_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = LocalImageStore::open(&nested).await.unwrap();
        assert!(store.dir().is_dir());
    }
}
