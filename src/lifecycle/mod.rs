// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Lifecycle request protocol layer.
//!
//! The orchestrator dispatches one Create/Update/Delete event per resource
//! per reconciliation step. This module owns the wire types for those
//! events, the typed property codec over the untyped property bag, and the
//! completion callback that reports the terminal outcome.

pub mod callback;
pub mod event;
pub mod properties;

pub use event::{
    LifecycleRequest, LifecycleResponse, PropertyValue, RequestType, ResponseStatus,
};
pub use properties::PropertyKey;

/// Physical id reported when a Create fails before a real identity exists.
///
/// The protocol requires a physical id even on failure so the orchestrator
/// can dispatch the follow-up Delete.
pub const UNKNOWN_PHYSICAL_ID: &str = "UNKNOWN";
