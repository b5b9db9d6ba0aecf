// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Secret store seam and its file-backed implementation.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StoragePaths, StorageResult};

/// Opaque key/value store for secret material.
///
/// `put` is a blind overwrite: the wallet handler replaces any prior value
/// at the handle without reading it first.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the secret at `handle`, or `None` if nothing is stored there.
    async fn get(&self, handle: &str) -> StorageResult<Option<String>>;

    /// Store `value` at `handle`, overwriting any prior value.
    async fn put(&self, handle: &str, value: &str, description: &str) -> StorageResult<()>;
}

/// On-disk representation of one secret.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSecret {
    value: String,
    description: String,
    updated_at: DateTime<Utc>,
}

/// File-backed secret store. One JSON file per handle under
/// `<root>/secrets/`.
#[derive(Debug, Clone)]
pub struct FsSecretStore {
    paths: StoragePaths,
}

impl FsSecretStore {
    /// Create the store, ensuring its directory exists.
    pub fn new(paths: StoragePaths) -> StorageResult<Self> {
        fs::create_dir_all(paths.secrets_dir())?;
        Ok(Self { paths })
    }
}

#[async_trait]
impl SecretStore for FsSecretStore {
    async fn get(&self, handle: &str) -> StorageResult<Option<String>> {
        let path = self.paths.secret(handle);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredSecret = serde_json::from_slice(&bytes)?;
        Ok(Some(stored.value))
    }

    async fn put(&self, handle: &str, value: &str, description: &str) -> StorageResult<()> {
        let path = self.paths.secret(handle);
        let stored = StoredSecret {
            value: value.to_string(),
            description: description.to_string(),
            updated_at: Utc::now(),
        };

        // Write to a temp file first, then rename for atomicity.
        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &stored)?;
            writer.flush()?;
        }
        fs::rename(&temp_path, &path)?;
        Ok(())
    }
}
