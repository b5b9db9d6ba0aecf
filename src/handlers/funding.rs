// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Funding resource: seed a wallet from the test account pool.

use alloy::primitives::U256;
use async_trait::async_trait;

use super::{Provisioned, ResourceHandler};
use crate::blockchain::{accounts, transfer};
use crate::chain::ChainTarget;
use crate::error::ProvisionError;
use crate::lifecycle::{LifecycleRequest, PropertyKey, PropertyValue};
use crate::state::AppState;

/// Provisions a one-shot native-token transfer to a wallet.
///
/// Create sends the requested amount from one of the pre-funded test pool
/// accounts, selected by index. The target chain is always an explicit RPC
/// endpoint: the pool keys only hold balances on locally bootstrapped test
/// chains. Update and Delete are no-ops; a transfer cannot be amended or
/// recalled.
pub struct FundingHandler;

#[async_trait]
impl ResourceHandler for FundingHandler {
    fn kind(&self) -> &'static str {
        "funding"
    }

    async fn create(
        &self,
        _state: &AppState,
        request: &LifecycleRequest,
    ) -> Result<Provisioned, ProvisionError> {
        let to = request.get_string(PropertyKey::ToWalletAddress)?;
        let amount_wei = amount_wei(request)?;
        let from_index = pool_index(request)?;
        let target = ChainTarget::Rpc(request.get_string(PropertyKey::RpcUrl)?);

        let signer = accounts::test_account_signer(from_index)?;
        tracing::info!(
            from = %signer.address(),
            to = %to,
            amount_wei = %amount_wei,
            "funding wallet"
        );

        let tx_hash = transfer::send_value(&target, signer, &to, amount_wei).await?;

        let mut provisioned = Provisioned {
            physical_id: tx_hash.clone(),
            data: Default::default(),
        };
        provisioned
            .data
            .insert(PropertyKey::Hash.to_string(), tx_hash);
        Ok(provisioned)
    }
}

/// Read the pool index as an integer. `as i64` saturates NaN to 0, which
/// would silently select pool account 0, so non-finite values are rejected
/// before the cast.
fn pool_index(request: &LifecycleRequest) -> Result<i64, ProvisionError> {
    let raw = request.get_number(PropertyKey::FromWalletId)?;
    if !raw.is_finite() {
        return Err(ProvisionError::missing_or_wrong_type(
            PropertyKey::FromWalletId.as_str(),
            "number",
            raw.to_string(),
        ));
    }
    Ok(raw as i64)
}

/// Read the transfer amount as an exact wei quantity.
///
/// JSON numbers lose precision past 2^53, so amounts are accepted as decimal
/// strings too; both forms must be non-negative integers.
fn amount_wei(request: &LifecycleRequest) -> Result<U256, ProvisionError> {
    let key = PropertyKey::ToWalletAmount;
    let wrong = |actual: String| ProvisionError::missing_or_wrong_type(key.as_str(), "number", actual);

    match request.resource_properties.get(key.as_str()) {
        Some(PropertyValue::String(s)) => {
            U256::from_str_radix(s.trim(), 10).map_err(|_| wrong(s.clone()))
        }
        Some(PropertyValue::Number(n)) => {
            if n.fract() == 0.0 && *n >= 0.0 {
                Ok(U256::from(*n as u128))
            } else {
                Err(wrong(n.to_string()))
            }
        }
        Some(other) => Err(wrong(other.describe())),
        None => Err(wrong("undefined".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::run_lifecycle;
    use crate::handlers::testutil::*;
    use crate::lifecycle::RequestType;
    use std::collections::HashMap;

    fn full_props() -> HashMap<String, PropertyValue> {
        let mut props = HashMap::new();
        props.insert(
            "ToWalletAddress".to_string(),
            PropertyValue::String("0x90F8bf6A479f320ead074411a4B0e7944Ea8c9C1".to_string()),
        );
        props.insert(
            "ToWalletAmount".to_string(),
            PropertyValue::String("1000000000000000000".to_string()),
        );
        props.insert("FromWalletId".to_string(), PropertyValue::Number(0.0));
        props.insert(
            "RpcUrl".to_string(),
            PropertyValue::String("http://127.0.0.1:8545".to_string()),
        );
        props
    }

    async fn expect_failure(props: HashMap<String, PropertyValue>) -> serde_json::Value {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;
        let request = lifecycle_request(RequestType::Create, "Custom::Funding", url, props);
        run_lifecycle(&state, &FundingHandler, &request)
            .await
            .unwrap();
        rx.recv().await.unwrap()
    }

    #[tokio::test]
    async fn out_of_range_pool_index_fails_before_any_network_call() {
        let mut props = full_props();
        props.insert("FromWalletId".to_string(), PropertyValue::Number(10.0));

        let body = expect_failure(props).await;
        assert_eq!(body["Status"], serde_json::json!("FAILED"));
        assert_eq!(
            body["Reason"],
            serde_json::json!("the property 'FromWalletId' must be between 0 and 10, got 10")
        );
    }

    #[tokio::test]
    async fn negative_pool_index_is_rejected() {
        let mut props = full_props();
        props.insert("FromWalletId".to_string(), PropertyValue::Number(-1.0));

        let body = expect_failure(props).await;
        assert_eq!(body["Status"], serde_json::json!("FAILED"));
        assert_eq!(
            body["Reason"],
            serde_json::json!("the property 'FromWalletId' must be between 0 and 10, got -1")
        );
    }

    #[tokio::test]
    async fn non_finite_pool_index_never_selects_account_zero() {
        let mut props = full_props();
        props.insert(
            "FromWalletId".to_string(),
            PropertyValue::String("NaN".to_string()),
        );

        let body = expect_failure(props).await;
        assert_eq!(body["Status"], serde_json::json!("FAILED"));
        assert_eq!(
            body["Reason"],
            serde_json::json!(
                "expected a number resource property, 'FromWalletId', but got 'NaN'"
            )
        );
    }

    #[tokio::test]
    async fn missing_recipient_fails_validation() {
        let mut props = full_props();
        props.remove("ToWalletAddress");

        let body = expect_failure(props).await;
        assert_eq!(
            body["Reason"],
            serde_json::json!(
                "expected a string resource property, 'ToWalletAddress', but got 'undefined'"
            )
        );
    }

    #[tokio::test]
    async fn delete_is_a_no_op_echoing_the_transaction_hash() {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        let mut request =
            lifecycle_request(RequestType::Delete, "Custom::Funding", url, HashMap::new());
        request.physical_resource_id = Some("0xtxhash".to_string());
        run_lifecycle(&state, &FundingHandler, &request)
            .await
            .unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["Status"], serde_json::json!("SUCCESS"));
        assert_eq!(body["PhysicalResourceId"], serde_json::json!("0xtxhash"));
    }

    #[test]
    fn amounts_beyond_f64_precision_survive_as_strings() {
        let mut props = HashMap::new();
        props.insert(
            "ToWalletAmount".to_string(),
            PropertyValue::String("123456789012345678901234567890".to_string()),
        );
        let request = lifecycle_request(
            RequestType::Create,
            "Custom::Funding",
            "http://127.0.0.1:9/respond".to_string(),
            props,
        );
        assert_eq!(
            amount_wei(&request).unwrap(),
            U256::from_str_radix("123456789012345678901234567890", 10).unwrap()
        );
    }

    #[test]
    fn fractional_amounts_are_rejected() {
        let mut props = HashMap::new();
        props.insert("ToWalletAmount".to_string(), PropertyValue::Number(1.5));
        let request = lifecycle_request(
            RequestType::Create,
            "Custom::Funding",
            "http://127.0.0.1:9/respond".to_string(),
            props,
        );
        assert!(matches!(
            amount_wei(&request),
            Err(ProvisionError::MissingOrWrongType { key: "ToWalletAmount", .. })
        ));
    }
}
