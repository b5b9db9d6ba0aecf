// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! # Store seams
//!
//! The handlers consume two externally-consistent key/value stores:
//!
//! - the **secret store** holds encrypted wallet keystores, keyed by an
//!   opaque caller-supplied handle;
//! - the **blob store** holds compiled contract artifacts, keyed by
//!   (bucket, object key).
//!
//! Both are trait seams so production deployments can back them with a
//! managed secrets service and object storage. The file-backed
//! implementations here keep everything under `DATA_DIR`:
//!
//! ```text
//! /data/
//!   secrets/{handle}.json     # keystore JSON + description + timestamp
//!   blobs/{bucket}/{key}      # artifact bytes
//! ```
//!
//! The handlers never perform read-modify-write against either store:
//! wallet generation is a blind overwrite, never a compare-and-swap.

pub mod blob_store;
pub mod paths;
pub mod secret_store;

pub use blob_store::{BlobStore, FsBlobStore};
pub use paths::StoragePaths;
pub use secret_store::{FsSecretStore, SecretStore};

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid store key: {0}")]
    InvalidKey(String),
}

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;
