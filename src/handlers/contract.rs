// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Contract resource: deploy a compiled artifact to a chain.

use async_trait::async_trait;

use super::{Provisioned, ResourceHandler};
use crate::blockchain::deployer;
use crate::blockchain::keystore::{self, KEYSTORE_PASSPHRASE};
use crate::chain::ChainTarget;
use crate::compile::CompiledContract;
use crate::error::ProvisionError;
use crate::lifecycle::{LifecycleRequest, PropertyKey, PropertyValue};
use crate::state::AppState;

/// Provisions a deployed contract instance.
///
/// Create validates every property before touching the stores, fetches the
/// artifact and the deployer's keystore concurrently, then signs and submits
/// the creation transaction and waits for its receipt. Update and Delete are
/// no-ops that skip the fetches entirely: deployed bytecode is immutable and
/// cannot be removed from a chain.
pub struct ContractHandler;

#[async_trait]
impl ResourceHandler for ContractHandler {
    fn kind(&self) -> &'static str {
        "contract"
    }

    async fn create(
        &self,
        state: &AppState,
        request: &LifecycleRequest,
    ) -> Result<Provisioned, ProvisionError> {
        let bucket = request.get_string(PropertyKey::ContractBucketName)?;
        let object_key = request.get_string(PropertyKey::ContractObjectKey)?;
        let secret_handle = request.get_string(PropertyKey::WalletSecretArn)?;
        let target = ChainTarget::from_properties(
            request.get_string_opt(PropertyKey::RpcUrl)?,
            request.get_string_opt(PropertyKey::ChainName)?,
            request.get_number_opt(PropertyKey::ChainId)?.map(|n| n as u64),
        )?;
        let constructor_args = constructor_args(request)?;

        let (artifact_bytes, keystore_json) = tokio::try_join!(
            async {
                state
                    .blobs
                    .get(&bucket, &object_key)
                    .await
                    .map_err(ProvisionError::from)
            },
            async {
                state
                    .secrets
                    .get(&secret_handle)
                    .await?
                    .ok_or_else(|| ProvisionError::WalletNotFound(secret_handle.clone()))
            },
        )?;

        let artifact: CompiledContract = serde_json::from_slice(&artifact_bytes)
            .map_err(|e| ProvisionError::Other(format!("unreadable contract artifact: {e}")))?;
        let signer = keystore::decrypt(&keystore_json, KEYSTORE_PASSPHRASE)?;

        tracing::info!(
            contract = %artifact.contract_name,
            deployer = %signer.address(),
            target = ?target,
            "deploying contract"
        );
        let deployment =
            deployer::deploy_contract(&target, signer, &artifact, &constructor_args).await?;
        tracing::info!(
            address = %deployment.address,
            tx_hash = %deployment.tx_hash,
            "contract deployed"
        );

        let mut provisioned = Provisioned {
            physical_id: deployment.address.clone(),
            data: Default::default(),
        };
        provisioned
            .data
            .insert(PropertyKey::Address.to_string(), deployment.address);
        provisioned.data.insert(
            PropertyKey::ResolvedAddress.to_string(),
            deployment.resolved_address,
        );
        provisioned
            .data
            .insert(PropertyKey::Hash.to_string(), deployment.tx_hash);
        Ok(provisioned)
    }
}

/// Extract the constructor arguments as strings. An absent property means a
/// zero-argument constructor; a present non-array is rejected, as are nested
/// arrays.
fn constructor_args(request: &LifecycleRequest) -> Result<Vec<String>, ProvisionError> {
    let items = match request.get_array_opt(PropertyKey::ContractConstructorArguments) {
        Ok(Some(items)) => items,
        Ok(None) => return Ok(Vec::new()),
        Err(_) => return Err(ProvisionError::InvalidConstructorArguments),
    };

    items
        .into_iter()
        .map(|item| match item {
            PropertyValue::String(s) => Ok(s),
            PropertyValue::Number(n) => Ok(n.to_string()),
            PropertyValue::Array(_) => Err(ProvisionError::InvalidConstructorArguments),
        })
        .collect()
}
