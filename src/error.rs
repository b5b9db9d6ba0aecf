// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Error taxonomy for lifecycle request processing.
//!
//! Every error raised inside a handler's domain logic is caught at the
//! handler boundary (`handlers::run_lifecycle`) and converted into a FAILED
//! completion callback carrying the error's display string as the reason.
//! The single exception is [`ProvisionError::CallbackDeliveryFailed`]: there
//! is no further channel to report a failure to report failure, so it
//! propagates to the invocation's caller.

use crate::blockchain::ChainError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// A resource property is absent or carries the wrong type.
    #[error("expected a {expected} resource property, '{key}', but got '{actual}'")]
    MissingOrWrongType {
        key: &'static str,
        expected: &'static str,
        actual: String,
    },

    /// Neither an RPC URL nor a complete (name, id) chain description was supplied.
    #[error("you must provide either the 'RpcUrl' or both the 'ChainID' and 'ChainName' properties")]
    AmbiguousChainTarget,

    /// `ContractConstructorArguments` was present but not an array.
    #[error("expected an array for property 'ContractConstructorArguments'")]
    InvalidConstructorArguments,

    /// `FromWalletId` does not index into the test account pool.
    #[error("the property 'FromWalletId' must be between 0 and {pool_size}, got {index}")]
    InvalidWalletIndex { index: i64, pool_size: usize },

    /// The secret store has no keystore at the requested handle.
    #[error("failed to load wallet from '{0}'")]
    WalletNotFound(String),

    /// Compilation failed; carries the compiler's diagnostic list.
    #[error("contract compilation failed:\n{}", .0.join("\n"))]
    CompilationFailed(Vec<String>),

    /// The completion callback could not be serialized or delivered.
    #[error("failed to deliver completion callback: {0}")]
    CallbackDeliveryFailed(String),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for lower-level failures with no structured variant.
    #[error("{0}")]
    Other(String),
}

impl ProvisionError {
    /// Shorthand for the property-validation failure.
    pub fn missing_or_wrong_type(
        key: &'static str,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        Self::MissingOrWrongType {
            key,
            expected,
            actual: actual.into(),
        }
    }
}
