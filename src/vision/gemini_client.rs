// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini client for single-image analysis via `generateContent`

use reqwest::{header::CONTENT_TYPE, Client};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::gemini_types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::RelayConfig;

/// Instruction sent ahead of every image
pub const ANALYZE_PROMPT: &str = "Analyze this image. If it contains mathematical expressions, solve them. If it contains text, interpret it.";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro-vision";

/// Failures of one analyze round trip, in the order they can occur.
///
/// Transport errors are stored without their URL because the URL carries the
/// API key as a query parameter.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to contact Gemini API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response: {0}")]
    Read(#[source] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no results from Gemini")]
    NoResults,
}

/// Result of a successful analysis
#[derive(Debug, Clone)]
pub struct GeminiAnalysis {
    pub text: String,
    pub model: String,
    pub processing_time_ms: u64,
}

/// Client for the Gemini generative language API
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    prompt: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    /// Create a client from relay configuration.
    ///
    /// No timeout is applied unless `request_timeout` is set.
    pub fn new(config: &RelayConfig) -> Result<Self, GeminiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(GeminiError::ClientBuild)?;

        let base_url = config.gemini_base_url.trim_end_matches('/').to_string();
        info!(
            "Gemini client configured: base_url={}, model={}, timeout={:?}",
            base_url, config.model, config.request_timeout
        );

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            prompt: config.prompt.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// `generateContent` URL without the key parameter
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    pub fn build_request(&self, base64_payload: &str) -> GenerateContentRequest {
        GenerateContentRequest::image_analysis(&self.prompt, base64_payload)
    }

    /// Send one image upstream and return the first text answer.
    ///
    /// Exactly one HTTP request is made per call; nothing is retried or cached.
    pub async fn analyze(&self, base64_payload: &str) -> Result<GeminiAnalysis, GeminiError> {
        let start = std::time::Instant::now();

        let body = serde_json::to_vec(&self.build_request(base64_payload))
            .map_err(GeminiError::Serialize)?;

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| GeminiError::Transport(e.without_url()))?;

        // The body is parsed regardless of status; error documents carry no candidates.
        let status = response.status();
        if status.is_success() {
            debug!("Gemini responded with {}", status);
        } else {
            warn!("Gemini responded with non-success status {}", status);
        }

        // The configured timeout spans the body too; expiry counts as transport.
        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                GeminiError::Transport(e.without_url())
            } else {
                GeminiError::Read(e.without_url())
            }
        })?;

        let parsed: GenerateContentResponse =
            serde_json::from_slice(&bytes).map_err(GeminiError::Parse)?;

        let text = parsed.first_text().ok_or(GeminiError::NoResults)?;

        Ok(GeminiAnalysis {
            text: text.to_string(),
            model: self.model.clone(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
