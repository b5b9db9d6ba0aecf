// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Contract-creation transaction assembly and submission.

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::JsonAbi,
    network::TransactionBuilder,
    providers::Provider,
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};

use super::{provider, ChainError};
use crate::chain::ChainTarget;
use crate::compile::CompiledContract;

/// Outcome of a confirmed deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Checksummed contract address.
    pub address: String,
    /// Name-service-resolved address. None of the supported chains resolve
    /// contract names, so this is always the contract address itself.
    pub resolved_address: String,
    /// Hash of the creation transaction.
    pub tx_hash: String,
}

/// Sign and submit a contract-creation transaction, then await its receipt.
pub async fn deploy_contract(
    target: &ChainTarget,
    signer: PrivateKeySigner,
    artifact: &CompiledContract,
    constructor_args: &[String],
) -> Result<Deployment, ChainError> {
    let abi: JsonAbi = serde_json::from_value(artifact.abi.clone())
        .map_err(|e| ChainError::DeploymentFailed(format!("invalid ABI in artifact: {e}")))?;
    let code = deploy_code(&abi, &artifact.bytecode, constructor_args)?;

    let provider = provider::connect_with_signer(target, signer)?;
    let tx = TransactionRequest::default().with_deploy_code(code);

    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| ChainError::TransactionFailed(format!("failed to send: {e}")))?;
    let tx_hash = format!("{:?}", pending.tx_hash());

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| ChainError::TransactionFailed(format!("failed to confirm: {e}")))?;

    let address = receipt
        .contract_address
        .ok_or_else(|| {
            ChainError::DeploymentFailed("receipt carries no contract address".to_string())
        })?
        .to_checksum(None);

    Ok(Deployment {
        resolved_address: address.clone(),
        address,
        tx_hash,
    })
}

/// Assemble the transaction input: creation bytecode followed by the
/// ABI-encoded constructor arguments (coerced from their string forms).
pub(crate) fn deploy_code(
    abi: &JsonAbi,
    bytecode_hex: &str,
    args: &[String],
) -> Result<Vec<u8>, ChainError> {
    let mut code = alloy::hex::decode(bytecode_hex.trim_start_matches("0x"))
        .map_err(|e| ChainError::DeploymentFailed(format!("invalid bytecode hex: {e}")))?;

    match &abi.constructor {
        Some(constructor) if !constructor.inputs.is_empty() => {
            if args.len() != constructor.inputs.len() {
                return Err(ChainError::ConstructorArgs(format!(
                    "constructor expects {} argument(s), got {}",
                    constructor.inputs.len(),
                    args.len()
                )));
            }

            let mut values: Vec<DynSolValue> = Vec::with_capacity(args.len());
            for (param, raw) in constructor.inputs.iter().zip(args) {
                let ty = param.resolve().map_err(|e| {
                    ChainError::ConstructorArgs(format!(
                        "cannot resolve type of parameter '{}': {e}",
                        param.name
                    ))
                })?;
                let value = ty.coerce_str(raw).map_err(|e| {
                    ChainError::ConstructorArgs(format!(
                        "cannot coerce '{raw}' into parameter '{}': {e}",
                        param.name
                    ))
                })?;
                values.push(value);
            }

            let encoded = constructor
                .abi_encode_input(&values)
                .map_err(|e| ChainError::ConstructorArgs(e.to_string()))?;
            code.extend_from_slice(&encoded);
        }
        _ => {
            if !args.is_empty() {
                return Err(ChainError::ConstructorArgs(format!(
                    "constructor takes no arguments, got {}",
                    args.len()
                )));
            }
        }
    }

    Ok(code)
}
