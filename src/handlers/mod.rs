// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Lifecycle dispatch and the HTTP surface.
//!
//! The orchestrator POSTs one lifecycle event per resource per
//! reconciliation step to `/v1/resources/{kind}`. The dispatcher routes it
//! to the kind's [`ResourceHandler`], converts the outcome into a completion
//! callback, and delivers that callback exactly once. Domain errors never
//! escape the dispatcher; they become FAILED callbacks. Only a callback
//! delivery failure surfaces to the HTTP caller, as `502 Bad Gateway`.

pub mod compile_api;
pub mod contract;
pub mod funding;
pub mod wallet;

use std::collections::BTreeMap;

use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::error::ProvisionError;
use crate::lifecycle::{callback, LifecycleRequest, LifecycleResponse, RequestType, UNKNOWN_PHYSICAL_ID};
use crate::state::AppState;

/// Successful outcome of one lifecycle phase.
#[derive(Debug, Clone)]
pub struct Provisioned {
    /// External identity of the resource, echoed on later Update/Delete.
    pub physical_id: String,
    /// Exported resource attributes.
    pub data: BTreeMap<String, String>,
}

impl Provisioned {
    /// Outcome that leaves the resource untouched, echoing its prior
    /// physical id.
    pub fn unchanged(request: &LifecycleRequest) -> Self {
        Self {
            physical_id: request
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| UNKNOWN_PHYSICAL_ID.to_string()),
            data: BTreeMap::new(),
        }
    }
}

/// One resource kind's lifecycle semantics.
///
/// Update and Delete default to no-ops that echo the prior physical id:
/// wallets and deployed contracts are immutable once created, and on-chain
/// artifacts cannot be deleted.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Kind label used in logs.
    fn kind(&self) -> &'static str;

    async fn create(
        &self,
        state: &AppState,
        request: &LifecycleRequest,
    ) -> Result<Provisioned, ProvisionError>;

    async fn update(
        &self,
        _state: &AppState,
        request: &LifecycleRequest,
    ) -> Result<Provisioned, ProvisionError> {
        Ok(Provisioned::unchanged(request))
    }

    async fn delete(
        &self,
        _state: &AppState,
        request: &LifecycleRequest,
    ) -> Result<Provisioned, ProvisionError> {
        Ok(Provisioned::unchanged(request))
    }
}

/// Run one lifecycle request to completion: dispatch to the handler, then
/// deliver exactly one completion callback.
///
/// Every domain error is absorbed into a FAILED callback. The physical id on
/// failure is the request's prior id, or the fixed `UNKNOWN` sentinel for a
/// Create that never produced one, so the orchestrator can still dispatch
/// the follow-up Delete.
pub async fn run_lifecycle(
    state: &AppState,
    handler: &dyn ResourceHandler,
    request: &LifecycleRequest,
) -> Result<(), ProvisionError> {
    tracing::info!(
        kind = handler.kind(),
        request_type = ?request.request_type,
        request_id = %request.request_id,
        logical_resource_id = %request.logical_resource_id,
        "dispatching lifecycle request"
    );

    let outcome = match request.request_type {
        RequestType::Create => handler.create(state, request).await,
        RequestType::Update => handler.update(state, request).await,
        RequestType::Delete => handler.delete(state, request).await,
    };

    let response = match outcome {
        Ok(provisioned) => {
            LifecycleResponse::success(provisioned.physical_id, provisioned.data)
        }
        Err(error) => {
            tracing::error!(
                kind = handler.kind(),
                request_id = %request.request_id,
                %error,
                "lifecycle request failed"
            );
            let physical_id = request
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| UNKNOWN_PHYSICAL_ID.to_string());
            LifecycleResponse::failed(physical_id, error.to_string())
        }
    };

    callback::report_outcome(&state.http, request, &response).await
}

/// Callback delivery failure surfaced to the HTTP caller.
struct DeliveryFailure(ProvisionError);

impl IntoResponse for DeliveryFailure {
    fn into_response(self) -> Response {
        (StatusCode::BAD_GATEWAY, self.0.to_string()).into_response()
    }
}

async fn wallet_resource(
    State(state): State<AppState>,
    Json(request): Json<LifecycleRequest>,
) -> Result<StatusCode, DeliveryFailure> {
    run_lifecycle(&state, &wallet::WalletHandler, &request)
        .await
        .map_err(DeliveryFailure)?;
    Ok(StatusCode::ACCEPTED)
}

async fn contract_resource(
    State(state): State<AppState>,
    Json(request): Json<LifecycleRequest>,
) -> Result<StatusCode, DeliveryFailure> {
    run_lifecycle(&state, &contract::ContractHandler, &request)
        .await
        .map_err(DeliveryFailure)?;
    Ok(StatusCode::ACCEPTED)
}

async fn funding_resource(
    State(state): State<AppState>,
    Json(request): Json<LifecycleRequest>,
) -> Result<StatusCode, DeliveryFailure> {
    run_lifecycle(&state, &funding::FundingHandler, &request)
        .await
        .map_err(DeliveryFailure)?;
    Ok(StatusCode::ACCEPTED)
}

async fn health() -> &'static str {
    "ok"
}

/// Assemble the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/resources/wallet", post(wallet_resource))
        .route("/v1/resources/contract", post(contract_resource))
        .route("/v1/resources/funding", post(funding_resource))
        .route("/v1/compile", post(compile_api::compile_and_publish))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}


#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;
    use crate::lifecycle::PropertyKey;
    use std::collections::HashMap;

    struct FixedHandler;

    #[async_trait]
    impl ResourceHandler for FixedHandler {
        fn kind(&self) -> &'static str {
            "fixed"
        }

        async fn create(
            &self,
            _state: &AppState,
            request: &LifecycleRequest,
        ) -> Result<Provisioned, ProvisionError> {
            let name = request.get_string(PropertyKey::WalletName)?;
            let mut data = BTreeMap::new();
            data.insert("Name".to_string(), name.clone());
            Ok(Provisioned {
                physical_id: name,
                data,
            })
        }
    }

    #[tokio::test]
    async fn successful_create_reports_success_with_data() {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        let mut props = HashMap::new();
        props.insert(
            "WalletName".to_string(),
            crate::lifecycle::PropertyValue::String("primary".to_string()),
        );
        let request = lifecycle_request(RequestType::Create, "Custom::Fixed", url, props);

        run_lifecycle(&state, &FixedHandler, &request).await.unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["Status"], serde_json::json!("SUCCESS"));
        assert_eq!(body["PhysicalResourceId"], serde_json::json!("primary"));
        assert_eq!(body["Data"]["Name"], serde_json::json!("primary"));
    }

    #[tokio::test]
    async fn failed_create_reports_the_unknown_sentinel() {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        // No WalletName property: create fails validation.
        let request =
            lifecycle_request(RequestType::Create, "Custom::Fixed", url, HashMap::new());

        run_lifecycle(&state, &FixedHandler, &request).await.unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["Status"], serde_json::json!("FAILED"));
        assert_eq!(body["PhysicalResourceId"], serde_json::json!("UNKNOWN"));
        assert_eq!(
            body["Reason"],
            serde_json::json!(
                "expected a string resource property, 'WalletName', but got 'undefined'"
            )
        );
    }

    #[tokio::test]
    async fn failed_delete_echoes_the_prior_physical_id() {
        struct FailingDelete;

        #[async_trait]
        impl ResourceHandler for FailingDelete {
            fn kind(&self) -> &'static str {
                "failing"
            }

            async fn create(
                &self,
                _state: &AppState,
                _request: &LifecycleRequest,
            ) -> Result<Provisioned, ProvisionError> {
                unreachable!()
            }

            async fn delete(
                &self,
                _state: &AppState,
                _request: &LifecycleRequest,
            ) -> Result<Provisioned, ProvisionError> {
                Err(ProvisionError::Other("cannot delete".to_string()))
            }
        }

        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        let mut request =
            lifecycle_request(RequestType::Delete, "Custom::Fixed", url, HashMap::new());
        request.physical_resource_id = Some("prior-id".to_string());

        run_lifecycle(&state, &FailingDelete, &request).await.unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["Status"], serde_json::json!("FAILED"));
        assert_eq!(body["PhysicalResourceId"], serde_json::json!("prior-id"));
    }

    #[tokio::test]
    async fn unreachable_callback_is_a_delivery_failure() {
        let (_dir, state) = test_state();
        let mut props = HashMap::new();
        props.insert(
            "WalletName".to_string(),
            crate::lifecycle::PropertyValue::String("primary".to_string()),
        );
        let request = lifecycle_request(
            RequestType::Create,
            "Custom::Fixed",
            "http://127.0.0.1:9/respond".to_string(),
            props,
        );

        let err = run_lifecycle(&state, &FixedHandler, &request)
            .await
            .unwrap_err();
        assert!(matches!(err, ProvisionError::CallbackDeliveryFailed(_)));
    }

    #[tokio::test]
    async fn default_update_and_delete_echo_without_side_effects() {
        let (_dir, state) = test_state();
        let (url, mut rx) = callback_sink().await;

        let mut request =
            lifecycle_request(RequestType::Update, "Custom::Fixed", url, HashMap::new());
        request.physical_resource_id = Some("existing".to_string());
        run_lifecycle(&state, &FixedHandler, &request).await.unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(body["Status"], serde_json::json!("SUCCESS"));
        assert_eq!(body["PhysicalResourceId"], serde_json::json!("existing"));
        assert!(body.get("Data").is_none());
    }
}
