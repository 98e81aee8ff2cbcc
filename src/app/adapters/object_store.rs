//! Object storage boundary
//!
//! The source CSV arrives in, and the processed copy is archived to, an
//! object store owned by the surrounding platform. The pipeline only needs
//! two operations, expressed as a trait so deployments can plug in their
//! storage client; the filesystem implementation maps buckets to
//! directories and serves local runs and tests.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Object storage operations used by the data-update pipeline
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    /// Fetch the raw bytes of an object
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Copy an object between buckets
    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        destination_bucket: &str,
        destination_key: &str,
    ) -> Result<()>;
}

/// Filesystem-backed [`ObjectStore`]: each bucket is a directory under the
/// configured root, each key a relative file path inside it
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

impl ObjectStore for FsObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key);
        tokio::fs::read(&path)
            .await
            .map_err(|e| Error::object_store(bucket, key, e.to_string()))
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        destination_bucket: &str,
        destination_key: &str,
    ) -> Result<()> {
        let source = self.object_path(source_bucket, source_key);
        let destination = self.object_path(destination_bucket, destination_key);

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::object_store(destination_bucket, destination_key, e.to_string()))?;
        }

        tokio::fs::copy(&source, &destination)
            .await
            .map_err(|e| Error::object_store(destination_bucket, destination_key, e.to_string()))?;
        Ok(())
    }
}

/// Write an object below the store root, creating bucket directories as
/// needed. Used by local tooling to seed buckets.
pub async fn put_object(root: &Path, bucket: &str, key: &str, bytes: &[u8]) -> Result<()> {
    let path = root.join(bucket).join(key);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::object_store(bucket, key, e.to_string()))?;
    }
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| Error::object_store(bucket, key, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_object_reads_bucket_relative_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        put_object(dir.path(), "uploads", "RecallsFile.csv", b"some,data")
            .await
            .unwrap();

        let store = FsObjectStore::new(dir.path());
        let bytes = store.get_object("uploads", "RecallsFile.csv").await.unwrap();
        assert_eq!(bytes, b"some,data");
    }

    #[tokio::test]
    async fn test_get_object_missing_key_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FsObjectStore::new(dir.path());
        assert!(store.get_object("uploads", "nope.csv").await.is_err());
    }

    #[tokio::test]
    async fn test_copy_object_creates_destination_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        put_object(dir.path(), "uploads", "RecallsFile.csv", b"some,data")
            .await
            .unwrap();

        let store = FsObjectStore::new(dir.path());
        store
            .copy_object("uploads", "RecallsFile.csv", "assets", "documents/RecallsFile.csv")
            .await
            .unwrap();

        let copied = store
            .get_object("assets", "documents/RecallsFile.csv")
            .await
            .unwrap();
        assert_eq!(copied, b"some,data");
    }
}
