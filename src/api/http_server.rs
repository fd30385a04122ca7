// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::{analyze_handler, health_handler};
use crate::config::RelayConfig;
use crate::vision::{GeminiClient, GeminiError};

/// Shared, read-only state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub gemini: Arc<GeminiClient>,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, GeminiError> {
        let gemini = GeminiClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            gemini: Arc::new(gemini),
        })
    }
}

/// Build the router with CORS and request tracing.
///
/// Request bodies are not size-limited; image size is not validated.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &RelayConfig) -> CorsLayer {
    // Origins are validated at startup; an invalid list here allows nothing.
    let origins = config.cors_origin_headers().unwrap_or_else(|e| {
        warn!("CORS disabled for all origins: {}", e);
        Vec::new()
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::GET])
        .allow_headers([header::CONTENT_TYPE])
}

/// Bind the configured address and serve until Ctrl-C
pub async fn start_server(config: RelayConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let state = AppState::new(config)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Analyze relay listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Analyze relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
