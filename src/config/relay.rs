// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay configuration, loaded once at startup and shared read-only

use axum::http::HeaderValue;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::cli::RelayArgs;
use crate::vision::{ANALYZE_PROMPT, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_KEY not set in environment")]
    MissingApiKey,

    #[error("invalid listen address '{addr}': {source}")]
    InvalidListenAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid Gemini base URL '{0}': must be an http(s) URL")]
    InvalidBaseUrl(String),

    #[error("Gemini model name must not be empty")]
    EmptyModel,

    #[error("analyze prompt must not be empty")]
    EmptyPrompt,

    #[error("at least one CORS origin is required")]
    NoCorsOrigins,

    #[error("invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Everything the relay needs at runtime
#[derive(Clone)]
pub struct RelayConfig {
    /// Address the HTTP server binds to
    pub listen_addr: String,
    /// Gemini API credential, sent as the `key` query parameter
    pub api_key: String,
    /// Scheme and host of the Gemini API
    pub gemini_base_url: String,
    /// Model identifier used in the `generateContent` path
    pub model: String,
    /// Instruction sent ahead of the image
    pub prompt: String,
    /// Origins allowed by CORS
    pub cors_allowed_origins: Vec<String>,
    /// Upstream request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("listen_addr", &self.listen_addr)
            .field("api_key", &"<redacted>")
            .field("gemini_base_url", &self.gemini_base_url)
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl RelayConfig {
    /// Default configuration around the given credential
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            api_key: api_key.into(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            prompt: ANALYZE_PROMPT.to_string(),
            cors_allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            request_timeout: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        self.socket_addr()?;

        match url::Url::parse(&self.gemini_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            _ => return Err(ConfigError::InvalidBaseUrl(self.gemini_base_url.clone())),
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if self.prompt.trim().is_empty() {
            return Err(ConfigError::EmptyPrompt);
        }

        self.cors_origin_headers()?;

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_addr
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                addr: self.listen_addr.clone(),
                source,
            })
    }

    /// Allowed origins as header values, in configured order
    pub fn cors_origin_headers(&self) -> Result<Vec<HeaderValue>, ConfigError> {
        let origins = self
            .cors_allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if origins.is_empty() {
            return Err(ConfigError::NoCorsOrigins);
        }
        Ok(origins)
    }
}

impl TryFrom<RelayArgs> for RelayConfig {
    type Error = ConfigError;

    fn try_from(args: RelayArgs) -> Result<Self, Self::Error> {
        let config = Self {
            listen_addr: args.listen_addr,
            api_key: args.api_key,
            gemini_base_url: args.gemini_base_url,
            model: args.model,
            prompt: args.prompt,
            cors_allowed_origins: args.cors_allowed_origins,
            request_timeout: args.request_timeout_secs.map(Duration::from_secs),
        };
        config.validate()?;
        Ok(config)
    }
}
