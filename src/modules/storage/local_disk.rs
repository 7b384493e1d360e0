//! Flat local-disk storage for uploaded files
//!
//! Every stored file lives directly under one root directory. There is no
//! index: a file exists when it is on disk.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File, OpenOptions};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct LocalDiskStorage {
    root: PathBuf,
}

impl LocalDiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory (and parents) if absent
    pub async fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Open a new file for writing.
    ///
    /// Fails with `ErrorKind::AlreadyExists` instead of truncating an
    /// existing file.
    pub async fn create_new(&self, file_name: &str) -> io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.path_for(file_name))
            .await
    }

    /// Best-effort removal of a partially written or rejected file
    pub async fn discard(&self, file_name: &str) {
        match fs::remove_file(self.path_for(file_name)).await {
            Ok(()) => debug!("Discarded stored file: {}", file_name),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to discard stored file {}: {}", file_name, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_ensure_root_creates_nested_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(temp_dir.path().join("a").join("files"));

        storage.ensure_root().await.unwrap();
        storage.ensure_root().await.unwrap();

        assert!(storage.root().is_dir());
    }

    #[tokio::test]
    async fn test_create_new_refuses_to_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(temp_dir.path());

        let mut file = storage.create_new("0011223344aabb.txt").await.unwrap();
        file.write_all(b"first").await.unwrap();
        file.flush().await.unwrap();
        drop(file);

        let err = storage.create_new("0011223344aabb.txt").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

        let content = fs::read(storage.path_for("0011223344aabb.txt")).await.unwrap();
        assert_eq!(content, b"first");
    }

    #[tokio::test]
    async fn test_discard_missing_file_is_quiet() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(temp_dir.path());

        storage.discard("does-not-exist.bin").await;

        storage.create_new("present.bin").await.unwrap();
        storage.discard("present.bin").await;
        assert!(!storage.path_for("present.bin").exists());
    }
}
