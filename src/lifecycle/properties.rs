// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Typed access to the untyped resource property bag.
//!
//! Property names are a closed set: every key a handler may read or emit is
//! a [`PropertyKey`] variant, so key strings are never duplicated at call
//! sites and unknown keys are rejected at the boundary by construction.

use std::fmt;

use super::event::{LifecycleRequest, PropertyValue};
use crate::error::ProvisionError;

/// The recognized resource property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey {
    Address,
    ResolvedAddress,
    ChecksumAddress,
    PublicKey,
    Hash,
    WalletName,
    WalletSecretArn,
    ContractBucketName,
    ContractObjectKey,
    ContractConstructorArguments,
    ChainId,
    ChainName,
    RpcUrl,
    FromWalletId,
    ToWalletAddress,
    ToWalletAmount,
}

impl PropertyKey {
    /// The wire name of this property.
    pub const fn as_str(self) -> &'static str {
        match self {
            PropertyKey::Address => "Address",
            PropertyKey::ResolvedAddress => "ResolvedAddress",
            PropertyKey::ChecksumAddress => "ChecksumAddress",
            PropertyKey::PublicKey => "PublicKey",
            PropertyKey::Hash => "Hash",
            PropertyKey::WalletName => "WalletName",
            PropertyKey::WalletSecretArn => "WalletSecretArn",
            PropertyKey::ContractBucketName => "ContractBucketName",
            PropertyKey::ContractObjectKey => "ContractObjectKey",
            PropertyKey::ContractConstructorArguments => "ContractConstructorArguments",
            PropertyKey::ChainId => "ChainID",
            PropertyKey::ChainName => "ChainName",
            PropertyKey::RpcUrl => "RpcUrl",
            PropertyKey::FromWalletId => "FromWalletId",
            PropertyKey::ToWalletAddress => "ToWalletAddress",
            PropertyKey::ToWalletAmount => "ToWalletAmount",
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LifecycleRequest {
    /// Get a string property, failing if it is absent or not a string.
    pub fn get_string(&self, key: PropertyKey) -> Result<String, ProvisionError> {
        self.get_string_opt(key)?.ok_or_else(|| {
            ProvisionError::missing_or_wrong_type(key.as_str(), "string", "undefined")
        })
    }

    /// Get a string property, returning `None` if absent but still failing
    /// if present with the wrong type.
    pub fn get_string_opt(&self, key: PropertyKey) -> Result<Option<String>, ProvisionError> {
        match self.resource_properties.get(key.as_str()) {
            None => Ok(None),
            Some(PropertyValue::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ProvisionError::missing_or_wrong_type(
                key.as_str(),
                "string",
                other.describe(),
            )),
        }
    }

    /// Get a numeric property, failing if it is absent or not numeric.
    ///
    /// Numeric strings are accepted: parsed as an integer first, then as a
    /// float.
    pub fn get_number(&self, key: PropertyKey) -> Result<f64, ProvisionError> {
        match self.resource_properties.get(key.as_str()) {
            Some(PropertyValue::Number(n)) => Ok(*n),
            Some(PropertyValue::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(|n| n as f64)
                .or_else(|_| s.trim().parse::<f64>())
                .map_err(|_| {
                    ProvisionError::missing_or_wrong_type(key.as_str(), "number", s.clone())
                }),
            Some(other) => Err(ProvisionError::missing_or_wrong_type(
                key.as_str(),
                "number",
                other.describe(),
            )),
            None => Err(ProvisionError::missing_or_wrong_type(
                key.as_str(),
                "number",
                "undefined",
            )),
        }
    }

    /// Get a numeric property, returning `None` if the key is absent.
    pub fn get_number_opt(&self, key: PropertyKey) -> Result<Option<f64>, ProvisionError> {
        if self.resource_properties.contains_key(key.as_str()) {
            self.get_number(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Get an array property, returning `None` if absent but failing if
    /// present with the wrong type.
    pub fn get_array_opt(
        &self,
        key: PropertyKey,
    ) -> Result<Option<Vec<PropertyValue>>, ProvisionError> {
        match self.resource_properties.get(key.as_str()) {
            None => Ok(None),
            Some(PropertyValue::Array(items)) => Ok(Some(items.clone())),
            Some(other) => Err(ProvisionError::missing_or_wrong_type(
                key.as_str(),
                "array",
                other.describe(),
            )),
        }
    }
}
