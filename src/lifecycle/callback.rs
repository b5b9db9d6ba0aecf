// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Completion callback delivery.
//!
//! Every lifecycle request produces exactly one outbound response, sent as a
//! single HTTPS PUT to the request's `ResponseURL`. The payload is the merge
//! of all inbound request fields with the response fields. Delivery resolves
//! once the remote endpoint's response headers arrive; the body is not
//! required and the status code is logged but not interpreted. Failures are
//! never retried here.

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

use super::event::{LifecycleRequest, LifecycleResponse};
use crate::error::ProvisionError;

/// Report the terminal outcome of `request` to its response URL.
pub async fn report_outcome(
    client: &reqwest::Client,
    request: &LifecycleRequest,
    response: &LifecycleResponse,
) -> Result<(), ProvisionError> {
    let payload = merge_payload(request, response)
        .map_err(|e| ProvisionError::CallbackDeliveryFailed(e.to_string()))?;

    tracing::info!(
        request_id = %request.request_id,
        status = ?response.status,
        physical_resource_id = %response.physical_resource_id,
        "delivering completion callback"
    );

    let reply = client
        .put(&request.response_url)
        .header(CONTENT_TYPE, "application/json")
        .header(CONTENT_LENGTH, payload.len())
        .body(payload)
        .send()
        .await
        .map_err(|e| ProvisionError::CallbackDeliveryFailed(e.to_string()))?;

    if !reply.status().is_success() {
        tracing::warn!(
            request_id = %request.request_id,
            status = %reply.status(),
            "callback endpoint returned a non-success status"
        );
    }

    Ok(())
}

/// Serialize the request and response into one JSON object. Response fields
/// win on collision (notably `PhysicalResourceId` on Update/Delete).
fn merge_payload(
    request: &LifecycleRequest,
    response: &LifecycleResponse,
) -> Result<Vec<u8>, serde_json::Error> {
    let mut merged = match serde_json::to_value(request)? {
        serde_json::Value::Object(map) => map,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("Request".to_string(), other);
            map
        }
    };

    if let serde_json::Value::Object(fields) = serde_json::to_value(response)? {
        merged.extend(fields);
    }

    serde_json::to_vec(&serde_json::Value::Object(merged))
}
