// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vision::{GeminiError, ImageError};

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Body is not valid JSON or does not match the request shape
    InvalidRequest(String),
    /// `imageData` has no comma separating header and payload
    MalformedImageData,
    /// Upstream request could not be built or serialized
    RequestConstruction,
    /// Upstream could not be reached
    UpstreamUnreachable,
    /// Upstream response body could not be read
    UpstreamRead,
    /// Upstream response body is not a `generateContent` document
    UpstreamParse,
    /// Upstream answered without any candidate text
    NoResults,
}

impl ApiError {
    /// Client-facing message
    pub fn message(&self) -> String {
        match self {
            ApiError::InvalidRequest(msg) => msg.clone(),
            ApiError::MalformedImageData => "malformed imageData".to_string(),
            ApiError::RequestConstruction => "Failed to create request".to_string(),
            ApiError::UpstreamUnreachable => "Failed to contact Gemini API".to_string(),
            ApiError::UpstreamRead => "Failed to read response".to_string(),
            ApiError::UpstreamParse => "Failed to parse response".to_string(),
            ApiError::NoResults => "No results from Gemini".to_string(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.message(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) | ApiError::MalformedImageData => 400,
            ApiError::RequestConstruction
            | ApiError::UpstreamUnreachable
            | ApiError::UpstreamRead
            | ApiError::UpstreamParse
            | ApiError::NoResults => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::MissingSeparator => ApiError::MalformedImageData,
        }
    }
}

impl From<GeminiError> for ApiError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::ClientBuild(_) | GeminiError::Serialize(_) => {
                ApiError::RequestConstruction
            }
            GeminiError::Transport(_) => ApiError::UpstreamUnreachable,
            GeminiError::Read(_) => ApiError::UpstreamRead,
            GeminiError::Parse(_) => ApiError::UpstreamParse,
            GeminiError::NoResults => ApiError::NoResults,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
