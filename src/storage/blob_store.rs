// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Blob store seam and its file-backed implementation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::{StoragePaths, StorageError, StorageResult};

/// Object storage read interface keyed by (bucket, object key).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the object at `(bucket, key)`.
    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Store `bytes` at `(bucket, key)`. Used by the compile publisher.
    async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> StorageResult<()>;
}

/// File-backed blob store. Objects live at `<root>/blobs/<bucket>/<key>`;
/// object keys may contain `/` and map to subdirectories.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    paths: StoragePaths,
}

impl FsBlobStore {
    /// Create the store, ensuring its directory exists.
    pub fn new(paths: StoragePaths) -> StorageResult<Self> {
        fs::create_dir_all(paths.blobs_dir())?;
        Ok(Self { paths })
    }

    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        validate_component(bucket)?;
        let key_path = Path::new(key);
        for component in key_path.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(StorageError::InvalidKey(key.to_string())),
            }
        }
        Ok(self.paths.bucket_dir(bucket).join(key_path))
    }
}

fn validate_component(bucket: &str) -> StorageResult<()> {
    if bucket.is_empty() || bucket.contains('/') || bucket.contains("..") {
        return Err(StorageError::InvalidKey(bucket.to_string()));
    }
    Ok(())
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(format!("{bucket}/{key}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> StorageResult<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;
        Ok(())
    }
}
