// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use analyze_relay::{api::start_server, cli::RelayArgs, config::RelayConfig, version};
use anyhow::Result;
use clap::Parser;
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Variables from .env are visible to the argument parser below
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = RelayArgs::parse();
    let config = RelayConfig::try_from(args)?;

    info!("Starting {}", version::get_version_string());
    info!("Build info: {}", version::get_version_info());
    info!("Configuration: {:?}", config);

    start_server(config).await
}
