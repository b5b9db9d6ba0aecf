// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! V3 keystore generation and decryption.
//!
//! The keystore passphrase is a fixed constant shared by the wallet handler
//! (writer) and the contract deploy handler (reader). It is a
//! serialization-format parameter, not a security boundary: confidentiality
//! comes from the secret store holding the keystore, which is the only
//! persisted wallet artifact.

use std::fs;

use alloy::signers::k256::elliptic_curve::sec1::ToEncodedPoint;
use alloy::signers::local::PrivateKeySigner;

use super::ChainError;

/// Fixed passphrase for keystore encryption and decryption.
pub const KEYSTORE_PASSPHRASE: &str = "password";

/// A freshly generated wallet with its derived public attributes and the
/// encrypted keystore destined for the secret store.
#[derive(Debug, Clone)]
pub struct GeneratedWallet {
    /// Lowercase 0x-prefixed account address.
    pub address: String,
    /// EIP-55 checksummed account address.
    pub checksum_address: String,
    /// Uncompressed public key, 0x-prefixed, without the SEC1 04 marker.
    pub public_key: String,
    /// V3 keystore JSON encrypting the private key.
    pub keystore_json: String,
}

/// Generate a new secp256k1 key from OS randomness and encrypt it as a V3
/// keystore.
///
/// The keystore codec is file-oriented, so the key takes a round trip
/// through a scratch directory that is removed on return.
pub fn generate(passphrase: &str) -> Result<GeneratedWallet, ChainError> {
    let scratch = tempfile::tempdir().map_err(|e| ChainError::Keystore(e.to_string()))?;
    let mut rng = rand::rngs::OsRng;

    let (signer, file_name) =
        PrivateKeySigner::new_keystore(scratch.path(), &mut rng, passphrase, None)
            .map_err(|e| ChainError::Keystore(e.to_string()))?;

    let keystore_json = fs::read_to_string(scratch.path().join(&file_name))
        .map_err(|e| ChainError::Keystore(e.to_string()))?;

    Ok(GeneratedWallet {
        address: address_hex(&signer),
        checksum_address: signer.address().to_checksum(None),
        public_key: public_key_hex(&signer),
        keystore_json,
    })
}

/// Decrypt a V3 keystore back into a signer.
pub fn decrypt(keystore_json: &str, passphrase: &str) -> Result<PrivateKeySigner, ChainError> {
    let scratch = tempfile::tempdir().map_err(|e| ChainError::Keystore(e.to_string()))?;
    let path = scratch.path().join("keystore.json");
    fs::write(&path, keystore_json).map_err(|e| ChainError::Keystore(e.to_string()))?;

    PrivateKeySigner::decrypt_keystore(&path, passphrase)
        .map_err(|e| ChainError::Keystore(e.to_string()))
}

/// Lowercase 0x-prefixed rendering of the signer's address.
pub fn address_hex(signer: &PrivateKeySigner) -> String {
    format!("0x{}", alloy::hex::encode(signer.address()))
}

/// Uncompressed public key without the leading SEC1 04 marker.
pub fn public_key_hex(signer: &PrivateKeySigner) -> String {
    let point = signer.credential().verifying_key().to_encoded_point(false);
    format!("0x{}", alloy::hex::encode(&point.as_bytes()[1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_wallet_exposes_well_formed_attributes() {
        let wallet = generate(KEYSTORE_PASSPHRASE).unwrap();

        assert_eq!(wallet.address.len(), 42);
        assert!(wallet.address.starts_with("0x"));
        assert_eq!(wallet.address, wallet.checksum_address.to_lowercase());

        // 64-byte uncompressed key.
        assert_eq!(wallet.public_key.len(), 2 + 128);
        assert!(wallet.keystore_json.contains("crypto"));
    }

    #[test]
    fn decrypting_the_keystore_recovers_the_same_address() {
        let wallet = generate(KEYSTORE_PASSPHRASE).unwrap();
        let signer = decrypt(&wallet.keystore_json, KEYSTORE_PASSPHRASE).unwrap();
        assert_eq!(address_hex(&signer), wallet.address);
        assert_eq!(public_key_hex(&signer), wallet.public_key);
    }

    #[test]
    fn wrong_passphrase_fails_to_decrypt() {
        let wallet = generate(KEYSTORE_PASSPHRASE).unwrap();
        assert!(matches!(
            decrypt(&wallet.keystore_json, "not-the-passphrase"),
            Err(ChainError::Keystore(_))
        ));
    }

    #[test]
    fn successive_generations_produce_distinct_keys() {
        let a = generate(KEYSTORE_PASSPHRASE).unwrap();
        let b = generate(KEYSTORE_PASSPHRASE).unwrap();
        assert_ne!(a.address, b.address);
    }
}
