// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Native value transfers.

use std::str::FromStr;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};

use super::{provider, ChainError};
use crate::chain::ChainTarget;

/// Send `amount_wei` from `signer`'s account to `to`.
///
/// Gas, nonce, and chain id are supplied by the provider's fillers. Returns
/// the transaction hash once the transaction has been accepted by the node;
/// confirmation polling is left to the caller's chain tooling.
pub async fn send_value(
    target: &ChainTarget,
    signer: PrivateKeySigner,
    to: &str,
    amount_wei: U256,
) -> Result<String, ChainError> {
    let to_addr = Address::from_str(to)
        .map_err(|e| ChainError::InvalidAddress(format!("invalid to address: {e}")))?;

    let provider = provider::connect_with_signer(target, signer)?;
    let tx = TransactionRequest::default().to(to_addr).value(amount_wei);

    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| ChainError::TransactionFailed(format!("failed to send: {e}")))?;

    Ok(format!("{:?}", pending.tx_hash()))
}
