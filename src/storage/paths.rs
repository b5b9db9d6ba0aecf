// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Path layout for the file-backed stores.

use std::path::{Path, PathBuf};

use crate::config::DEFAULT_DATA_DIR;

/// Storage path utilities rooted at the data directory.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all store data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory containing all secrets.
    pub fn secrets_dir(&self) -> PathBuf {
        self.root.join("secrets")
    }

    /// Path to a specific secret file. Handles are opaque and may contain
    /// separator characters (ARN-style), so they are flattened to a safe
    /// file name.
    pub fn secret(&self, handle: &str) -> PathBuf {
        self.secrets_dir()
            .join(format!("{}.json", sanitize_handle(handle)))
    }

    /// Directory containing all blobs.
    pub fn blobs_dir(&self) -> PathBuf {
        self.root.join("blobs")
    }

    /// Directory for a specific bucket.
    pub fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.blobs_dir().join(bucket)
    }
}

/// Flatten an opaque handle into a single path component.
pub(crate) fn sanitize_handle(handle: &str) -> String {
    handle
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
