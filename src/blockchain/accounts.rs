// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! The pre-funded test account pool.
//!
//! Local test chains are bootstrapped with a fixed set of ten wallets, each
//! holding an initial balance. The keys are deterministic so test networks
//! come up in a predictable state. They are only ever used to fund wallets
//! on such chains; nothing outside test-chain funding may touch them.

use alloy::signers::local::PrivateKeySigner;

use super::ChainError;
use crate::error::ProvisionError;

/// Private keys of the ten pre-funded test chain accounts.
pub const TEST_ACCOUNT_KEYS: [&str; 10] = [
    "b6b15c8cb491557369f3c7d2c287b053eb229daa9c22138887752191c9520659",
    "cb5790da63720727af975f42c79f69918580209889225fa7128c92402a6d3a65",
    "182fecf15bdf909556a0f617a63e05ab22f1493d25a9f1e27c228266c772a890",
    "ecdf21cb41c65afb51f91df408b7656e2c8739a5877f2814add0afd780cc210e",
    "90f899754eb42949567d3576224bf533a20857bf0a60318507b75fcb3edc6f5f",
    "dc04c5399f82306ec4b4d654a342f40e2e0620fe39950d967e1e574b32d4dd36",
    "b0c3d5fa3891e7029918fdf0ed5448e0d6b7642c4ee2c8fa921bc703b4bc7c9f",
    "19b611a70d1cbed3eb0678f3fc1fa78141d3a7c7b3a18242043d30c35e768b9d",
    "4b8c12d91a78348c9fb0b0bb505e41ba08efbb14a955dde43a2fabe0e3c2793e",
    "0677fe9134183007401d356e1ec970114afde6363895f493b4f8aec3bfe20d86",
];

/// Build a signer for the test account at `index`.
///
/// The index is bounds-checked against the pool; negative or past-the-end
/// values fail with `InvalidWalletIndex`.
pub fn test_account_signer(index: i64) -> Result<PrivateKeySigner, ProvisionError> {
    if index < 0 || index as usize >= TEST_ACCOUNT_KEYS.len() {
        return Err(ProvisionError::InvalidWalletIndex {
            index,
            pool_size: TEST_ACCOUNT_KEYS.len(),
        });
    }

    let key_bytes = alloy::hex::decode(TEST_ACCOUNT_KEYS[index as usize])
        .map_err(|e| ChainError::InvalidPrivateKey(e.to_string()))?;
    let signer = PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| ChainError::InvalidPrivateKey(e.to_string()))?;
    Ok(signer)
}
