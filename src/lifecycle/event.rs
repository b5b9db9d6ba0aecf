// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Wire types for inbound lifecycle requests and outbound responses.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// The three lifecycle phases. One inbound request maps to exactly one
/// outbound response; there is no intermediate or retry state inside a
/// single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// A value in the untyped resource property bag.
///
/// The orchestrator serializes property values as JSON strings, numbers, or
/// arrays; anything typed lives behind the accessors in
/// [`super::properties`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Number(f64),
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Human-readable rendering used in validation error messages.
    pub fn describe(&self) -> String {
        match self {
            PropertyValue::String(s) => s.clone(),
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::Array(_) => "[array]".to_string(),
        }
    }
}

/// One inbound lifecycle event from the orchestrator.
///
/// Unknown top-level fields (e.g. `ServiceToken`) are captured in `extra`
/// so the completion callback can echo the full request back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleRequest {
    pub request_type: RequestType,
    pub request_id: String,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub resource_type: String,
    pub logical_resource_id: String,
    /// Absent on Create; the external identity token on Update/Delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: HashMap<String, PropertyValue>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Terminal outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// The outbound completion payload for one lifecycle request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleResponse {
    pub status: ResponseStatus,
    pub physical_resource_id: String,
    /// Exported resource attributes (Success only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    /// Why the operation failed (Failure only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LifecycleResponse {
    pub fn success(physical_resource_id: String, data: BTreeMap<String, String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            physical_resource_id,
            data: if data.is_empty() { None } else { Some(data) },
            reason: None,
        }
    }

    pub fn failed(physical_resource_id: String, reason: String) -> Self {
        Self {
            status: ResponseStatus::Failed,
            physical_resource_id,
            data: None,
            reason: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "RequestType": "Create",
            "RequestId": "req-1",
            "ResponseURL": "https://callback.example/respond",
            "StackId": "stack-1",
            "ResourceType": "Custom::Wallet",
            "LogicalResourceId": "Wallet",
            "ServiceToken": "arn:service:token",
            "ResourceProperties": {
                "WalletSecretArn": "arn:secret:wallet",
                "ChainID": 1337,
                "ContractConstructorArguments": ["HelloWorld", "HLW"]
            }
        })
    }

    #[test]
    fn request_deserializes_typed_fields() {
        let request: LifecycleRequest = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(request.request_type, RequestType::Create);
        assert_eq!(request.response_url, "https://callback.example/respond");
        assert_eq!(request.physical_resource_id, None);
        assert_eq!(
            request.resource_properties.get("WalletSecretArn"),
            Some(&PropertyValue::String("arn:secret:wallet".to_string()))
        );
        assert_eq!(
            request.resource_properties.get("ChainID"),
            Some(&PropertyValue::Number(1337.0))
        );
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let request: LifecycleRequest = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(
            request.extra.get("ServiceToken"),
            Some(&serde_json::json!("arn:service:token"))
        );

        let back = serde_json::to_value(&request).unwrap();
        assert_eq!(back["ServiceToken"], serde_json::json!("arn:service:token"));
        assert_eq!(back["RequestType"], serde_json::json!("Create"));
    }

    #[test]
    fn success_response_omits_reason_and_empty_data() {
        let response = LifecycleResponse::success("id-1".to_string(), BTreeMap::new());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Status"], serde_json::json!("SUCCESS"));
        assert_eq!(json["PhysicalResourceId"], serde_json::json!("id-1"));
        assert!(json.get("Data").is_none());
        assert!(json.get("Reason").is_none());
    }

    #[test]
    fn failed_response_carries_reason() {
        let response = LifecycleResponse::failed("UNKNOWN".to_string(), "boom".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["Status"], serde_json::json!("FAILED"));
        assert_eq!(json["Reason"], serde_json::json!("boom"));
    }
}
