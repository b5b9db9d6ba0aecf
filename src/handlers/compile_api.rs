// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Compile endpoint: build a Solidity entry file and publish the artifact.
//!
//! `POST /v1/compile` runs outside the lifecycle protocol; it is the
//! pipeline step that produces the artifacts the contract resource later
//! deploys. The selected contract is serialized as a [`CompiledContract`]
//! JSON document into the blob store at the requested (bucket, key).

use std::path::PathBuf;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::compile::{self, CompiledContract};
use crate::error::ProvisionError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    /// Path to the entry source file on the server's filesystem.
    pub entry_file: PathBuf,
    /// Contract to publish. May be omitted when the build produces exactly
    /// one contract.
    #[serde(default)]
    pub contract_name: Option<String>,
    pub bucket: String,
    pub object_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    pub source_file_name: String,
    pub contract_name: String,
    pub bucket: String,
    pub object_key: String,
}

/// Compile failure surfaced to the HTTP caller.
pub struct CompileFailure(ProvisionError);

impl IntoResponse for CompileFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ProvisionError::CompilationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.0.to_string()).into_response()
    }
}

impl From<ProvisionError> for CompileFailure {
    fn from(error: ProvisionError) -> Self {
        Self(error)
    }
}

pub async fn compile_and_publish(
    State(state): State<AppState>,
    Json(request): Json<CompileRequest>,
) -> Result<Json<CompileResponse>, CompileFailure> {
    let artifacts = compile::compile(&request.entry_file).await?;
    let artifact = select_contract(&artifacts, request.contract_name.as_deref())?;

    let bytes = serde_json::to_vec_pretty(artifact)
        .map_err(|e| ProvisionError::Other(format!("cannot serialize artifact: {e}")))?;
    state
        .blobs
        .put(&request.bucket, &request.object_key, &bytes)
        .await
        .map_err(ProvisionError::from)?;

    tracing::info!(
        contract = %artifact.contract_name,
        bucket = %request.bucket,
        object_key = %request.object_key,
        "published compiled artifact"
    );

    Ok(Json(CompileResponse {
        source_file_name: artifact.source_file_name.clone(),
        contract_name: artifact.contract_name.clone(),
        bucket: request.bucket,
        object_key: request.object_key,
    }))
}

fn select_contract<'a>(
    artifacts: &'a compile::CompiledArtifacts,
    name: Option<&str>,
) -> Result<&'a CompiledContract, ProvisionError> {
    match name {
        Some(name) => artifacts.find(name).ok_or_else(|| {
            ProvisionError::CompilationFailed(vec![format!(
                "the build produced no contract named '{name}'"
            )])
        }),
        None => artifacts.single().ok_or_else(|| {
            ProvisionError::CompilationFailed(vec![
                "the build produced zero or several contracts; supply 'contractName'"
                    .to_string(),
            ])
        }),
    }
}
