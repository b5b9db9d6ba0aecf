// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

use std::sync::Arc;

use crate::storage::{BlobStore, SecretStore};

/// Shared application state handed to every lifecycle handler.
///
/// Each lifecycle invocation is stateless; the state only carries handles to
/// the externally-consistent stores and the HTTP client used for completion
/// callbacks.
#[derive(Clone)]
pub struct AppState {
    pub secrets: Arc<dyn SecretStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(secrets: Arc<dyn SecretStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            secrets,
            blobs,
            http: reqwest::Client::new(),
        }
    }
}
