// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint handler

use axum::{body::Bytes, extract::State, Json};
use tracing::{debug, error, info, warn};

use super::request::AnalyzeRequest;
use super::response::AnalyzeResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /analyze - Forward an image to Gemini and return its answer
///
/// # Request
/// - `imageData`: data URL of the image, `data:<mime>;base64,<payload>`
///
/// # Response
/// - `result`: text of the first part of the first Gemini candidate
///
/// # Errors
/// - 400 Bad Request: body is not valid JSON, lacks `imageData`, or
///   `imageData` has no comma
/// - 500 Internal Server Error: the Gemini call failed or returned no text
///
/// The body is taken as raw bytes so that malformed JSON surfaces as this
/// endpoint's own `{"error": ...}` document regardless of content type.
pub async fn analyze_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    info!("Analyze request received ({} bytes)", body.len());

    analyze_image(&state, &body)
        .await
        .map(Json)
        .inspect_err(|e| {
            if e.is_client_error() {
                warn!("Analyze request rejected: {}", e);
            } else {
                error!("Analyze request failed: {}", e);
            }
        })
}

async fn analyze_image(state: &AppState, body: &[u8]) -> Result<AnalyzeResponse, ApiError> {
    let request = AnalyzeRequest::from_slice(body)?;
    let payload = request.payload()?;

    debug!(
        "Image payload: {} base64 chars, declared type {:?}",
        payload.len(),
        request.declared_media_type()
    );

    let analysis = state.gemini.analyze(payload).await?;

    info!(
        "Analysis complete: {} chars, {}ms (model: {})",
        analysis.text.len(),
        analysis.processing_time_ms,
        analysis.model
    );

    Ok(AnalyzeResponse::new(analysis.text))
}
