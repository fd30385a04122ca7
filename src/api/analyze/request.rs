// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze request types and parsing

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::vision::{extract_base64_payload, DataUrl};

/// Request for image analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Image as a data URL: `data:<mime>;base64,<payload>`
    pub image_data: String,
}

impl AnalyzeRequest {
    /// Parse a raw request body.
    ///
    /// The content type is not inspected; any body that decodes into this shape
    /// is accepted.
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }

    /// Base64 payload after the first comma of `imageData`
    pub fn payload(&self) -> Result<&str, ApiError> {
        Ok(extract_base64_payload(&self.image_data)?)
    }

    /// MIME type declared by the client, for logging only
    pub fn declared_media_type(&self) -> Option<&str> {
        DataUrl::parse(&self.image_data).ok()?.media_type()
    }
}
