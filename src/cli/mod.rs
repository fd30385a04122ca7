// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;

use crate::config::{DEFAULT_CORS_ORIGIN, DEFAULT_LISTEN_ADDR};
use crate::vision::{ANALYZE_PROMPT, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Analyze Relay: forwards drawn images to Gemini and returns its answer
#[derive(Parser, Debug, Clone)]
#[command(name = "analyze-relay")]
#[command(version)]
#[command(about = "HTTP relay between a drawing client and the Gemini API", long_about = None)]
pub struct RelayArgs {
    /// Gemini API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Address to listen on
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    /// Gemini model identifier
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub model: String,

    /// Instruction sent with every image
    #[arg(long, env = "ANALYZE_PROMPT", default_value = ANALYZE_PROMPT)]
    pub prompt: String,

    /// Comma-separated list of allowed CORS origins
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_CORS_ORIGIN
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Upstream request timeout in seconds (no timeout when unset)
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}
