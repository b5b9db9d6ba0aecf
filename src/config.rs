// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the secret and blob stores | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SOLC_BIN` | Path to the `solc` compiler binary | `solc` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Environment variable name for the store data directory path.
///
/// The secret store keeps encrypted wallet keystores under
/// `<DATA_DIR>/secrets`; the blob store keeps compiled contract artifacts
/// under `<DATA_DIR>/blobs`.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Default store data directory.
pub const DEFAULT_DATA_DIR: &str = "/data";

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the `solc` binary invoked by the compile
/// pipeline. May be an absolute path.
pub const SOLC_BIN_ENV: &str = "SOLC_BIN";

/// Default `solc` binary name (resolved through `PATH`).
pub const DEFAULT_SOLC_BIN: &str = "solc";

/// Environment variable name selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
