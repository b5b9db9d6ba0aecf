// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use chain_provisioner::config;
use chain_provisioner::handlers::router;
use chain_provisioner::state::AppState;
use chain_provisioner::storage::{FsBlobStore, FsSecretStore, StoragePaths};

#[tokio::main]
async fn main() {
    init_tracing();

    let data_dir = env::var(config::DATA_DIR_ENV)
        .unwrap_or_else(|_| config::DEFAULT_DATA_DIR.to_string());
    let paths = StoragePaths::new(&data_dir);

    let secrets = Arc::new(
        FsSecretStore::new(paths.clone()).expect("Failed to initialize the secret store"),
    );
    let blobs =
        Arc::new(FsBlobStore::new(paths).expect("Failed to initialize the blob store"));

    let state = AppState::new(secrets, blobs);
    let app = router(state);

    let host = env::var(config::HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var(config::PORT_ENV)
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, data_dir = %data_dir, "chain provisioner listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server failed");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = env::var(config::LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
