// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Network provider construction.

use alloy::{
    network::{Ethereum, EthereumWallet},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, ProviderBuilder, RootProvider,
    },
    signers::local::PrivateKeySigner,
};

use super::ChainError;
use crate::chain::ChainTarget;

/// Read-only HTTP provider (with the recommended fillers).
pub type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// HTTP provider that signs outgoing transactions with a local wallet.
pub type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Connect a read-only provider to the target chain.
pub fn connect(target: &ChainTarget) -> Result<HttpProvider, ChainError> {
    let url = target.rpc_url()?;
    Ok(ProviderBuilder::new().connect_http(url))
}

/// Connect a provider that signs with `signer`.
pub fn connect_with_signer(
    target: &ChainTarget,
    signer: PrivateKeySigner,
) -> Result<SigningProvider, ChainError> {
    let url = target.rpc_url()?;
    Ok(ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(url))
}
