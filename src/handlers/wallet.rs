// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Wallet resource: generate a key pair and persist its keystore.

use async_trait::async_trait;

use super::{Provisioned, ResourceHandler};
use crate::blockchain::keystore::{self, KEYSTORE_PASSPHRASE};
use crate::error::ProvisionError;
use crate::lifecycle::{LifecycleRequest, PropertyKey};
use crate::state::AppState;

/// Provisions an externally-owned account.
///
/// Create generates a fresh key pair, encrypts it as a V3 keystore, and
/// blindly overwrites the secret at the requested handle. The private key
/// never leaves this handler unencrypted; the callback carries only derived
/// public attributes. Update and Delete are no-ops: the stored keystore
/// outlives the resource so past signatures stay attributable.
pub struct WalletHandler;

#[async_trait]
impl ResourceHandler for WalletHandler {
    fn kind(&self) -> &'static str {
        "wallet"
    }

    async fn create(
        &self,
        state: &AppState,
        request: &LifecycleRequest,
    ) -> Result<Provisioned, ProvisionError> {
        let secret_handle = request.get_string(PropertyKey::WalletSecretArn)?;
        let wallet_name = request.get_string_opt(PropertyKey::WalletName)?;

        let wallet = keystore::generate(KEYSTORE_PASSPHRASE)?;
        tracing::info!(
            address = %wallet.checksum_address,
            secret_handle = %secret_handle,
            "generated wallet"
        );

        state
            .secrets
            .put(
                &secret_handle,
                &wallet.keystore_json,
                "Encrypted wallet keystore",
            )
            .await?;

        let mut provisioned = Provisioned {
            physical_id: secret_handle,
            data: Default::default(),
        };
        provisioned
            .data
            .insert(PropertyKey::Address.to_string(), wallet.address);
        provisioned.data.insert(
            PropertyKey::ChecksumAddress.to_string(),
            wallet.checksum_address,
        );
        provisioned
            .data
            .insert(PropertyKey::PublicKey.to_string(), wallet.public_key);
        if let Some(name) = wallet_name {
            provisioned
                .data
                .insert(PropertyKey::WalletName.to_string(), name);
        }
        Ok(provisioned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::keystore::decrypt;
    use crate::handlers::testutil::*;
    use crate::handlers::run_lifecycle;
    use crate::lifecycle::{PropertyValue, RequestType};
    use std::collections::HashMap;

    fn create_props(handle: &str) -> HashMap<String, PropertyValue> {
        let mut props = HashMap::new();
        props.insert(
            "WalletSecretArn".to_string(),
            PropertyValue::String(handle.to_string()),
        );
        props
    }

    #[tokio::test]
    async fn create_stores_a_keystore_and_reports_public_attributes() {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        let mut props = create_props("arn:secret:wallet");
        props.insert(
            "WalletName".to_string(),
            PropertyValue::String("primary".to_string()),
        );
        let request = lifecycle_request(RequestType::Create, "Custom::Wallet", url, props);

        run_lifecycle(&state, &WalletHandler, &request).await.unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["Status"], serde_json::json!("SUCCESS"));
        assert_eq!(
            body["PhysicalResourceId"],
            serde_json::json!("arn:secret:wallet")
        );
        assert_eq!(body["Data"]["WalletName"], serde_json::json!("primary"));

        // The reported address is derivable from the stored keystore.
        let keystore_json = state
            .secrets
            .get("arn:secret:wallet")
            .await
            .unwrap()
            .unwrap();
        let signer = decrypt(&keystore_json, KEYSTORE_PASSPHRASE).unwrap();
        assert_eq!(
            body["Data"]["Address"],
            serde_json::json!(crate::blockchain::keystore::address_hex(&signer))
        );
        assert_eq!(
            body["Data"]["ChecksumAddress"],
            serde_json::json!(signer.address().to_checksum(None))
        );

        // The private key never appears in the callback.
        assert!(body["Data"].get("PrivateKey").is_none());
        assert!(!body.to_string().contains(&keystore_json));
    }

    #[tokio::test]
    async fn create_without_a_secret_handle_fails() {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        let request =
            lifecycle_request(RequestType::Create, "Custom::Wallet", url, HashMap::new());
        run_lifecycle(&state, &WalletHandler, &request).await.unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["Status"], serde_json::json!("FAILED"));
        assert_eq!(body["PhysicalResourceId"], serde_json::json!("UNKNOWN"));
        assert_eq!(
            body["Reason"],
            serde_json::json!(
                "expected a string resource property, 'WalletSecretArn', but got 'undefined'"
            )
        );
    }

    #[tokio::test]
    async fn create_overwrites_an_existing_secret() {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        state
            .secrets
            .put("arn:secret:wallet", "stale", "old")
            .await
            .unwrap();

        let request = lifecycle_request(
            RequestType::Create,
            "Custom::Wallet",
            url,
            create_props("arn:secret:wallet"),
        );
        run_lifecycle(&state, &WalletHandler, &request).await.unwrap();
        rx.recv().await.unwrap();

        let stored = state
            .secrets
            .get("arn:secret:wallet")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored, "stale");
        assert!(stored.contains("crypto"));
    }

    #[tokio::test]
    async fn delete_leaves_the_keystore_in_place() {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        state
            .secrets
            .put("arn:secret:wallet", "{\"version\":3}", "keystore")
            .await
            .unwrap();

        let mut request = lifecycle_request(
            RequestType::Delete,
            "Custom::Wallet",
            url,
            HashMap::new(),
        );
        request.physical_resource_id = Some("arn:secret:wallet".to_string());
        run_lifecycle(&state, &WalletHandler, &request).await.unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["Status"], serde_json::json!("SUCCESS"));
        assert_eq!(
            body["PhysicalResourceId"],
            serde_json::json!("arn:secret:wallet")
        );
        assert_eq!(
            state.secrets.get("arn:secret:wallet").await.unwrap(),
            Some("{\"version\":3}".to_string())
        );
    }
}
