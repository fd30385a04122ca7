// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire types for the Gemini `generateContent` API

use serde::{Deserialize, Serialize};

/// MIME type attached to every inline image sent upstream
pub const INLINE_IMAGE_MIME_TYPE: &str = "image/png";

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// One conversational turn made of ordered parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// A request part: either an instruction or inline binary data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentRequest {
    /// Single-turn request: the instruction text followed by one PNG image
    pub fn image_analysis(prompt: &str, base64_payload: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: INLINE_IMAGE_MIME_TYPE.to_string(),
                            data: base64_payload.to_string(),
                        },
                    },
                ],
            }],
        }
    }
}

/// Response body of `generateContent`.
///
/// Absent fields decode as empty so that an upstream error document still
/// parses and is reported as "no results".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: CandidateContent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    ///
    /// Returns `None` only when there is no candidate or it has no parts; a
    /// part without a text field yields an empty string.
    pub fn first_text(&self) -> Option<&str> {
        let part = self.candidates.first()?.content.parts.first()?;
        Some(part.text.as_deref().unwrap_or_default())
    }
}
