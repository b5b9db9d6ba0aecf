// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Chain Provisioner - Lifecycle handlers for blockchain resources
//!
//! This crate provisions blockchain-adjacent resources (wallets, compiled
//! smart contracts, funded test accounts) on behalf of a declarative
//! infrastructure orchestrator. The orchestrator delivers one lifecycle
//! request (Create/Update/Delete) per event; each handler performs its
//! domain work and reports exactly one Success/Failure outcome back to the
//! request's response URL.
//!
//! ## Modules
//!
//! - `lifecycle` - request/response wire types, property codec, completion callback
//! - `handlers` - per-resource-type lifecycle handlers (Axum)
//! - `compile` - Solidity source resolution and compilation
//! - `blockchain` - key generation, keystores, deployment, transfers
//! - `storage` - secret store and blob store seams (file-backed)

pub mod blockchain;
pub mod chain;
pub mod compile;
pub mod config;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod state;
pub mod storage;
