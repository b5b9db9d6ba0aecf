// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! On-chain execution: key generation, keystores, deployment, transfers.

pub mod accounts;
pub mod deployer;
pub mod keystore;
pub mod provider;
pub mod transfer;

/// Errors that can occur during blockchain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("unknown chain '{name}' (id {chain_id}); supply an 'RpcUrl' for chains outside the known set")]
    UnknownChain { name: String, chain_id: u64 },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("keystore error: {0}")]
    Keystore(String),

    #[error("constructor argument error: {0}")]
    ConstructorArgs(String),

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("deployment failed: {0}")]
    DeploymentFailed(String),
}
