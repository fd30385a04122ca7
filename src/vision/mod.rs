// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image analysis through a remote multimodal model
//!
//! This module provides:
//! - Data URL splitting for client-supplied images
//! - The Gemini `generateContent` wire types and client

pub mod gemini_client;
pub mod gemini_types;
pub mod image_utils;

pub use gemini_client::{
    GeminiAnalysis, GeminiClient, GeminiError, ANALYZE_PROMPT, DEFAULT_GEMINI_BASE_URL,
    DEFAULT_GEMINI_MODEL,
};
pub use gemini_types::{GenerateContentRequest, GenerateContentResponse, INLINE_IMAGE_MIME_TYPE};
pub use image_utils::{extract_base64_payload, DataUrl, ImageError};
