// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Data URL handling for client-supplied images

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImageError {
    #[error("malformed imageData")]
    MissingSeparator,
}

/// A `data:<mime>;base64,<payload>` string split into its two halves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataUrl<'a> {
    /// Everything before the first comma, e.g. `data:image/png;base64`
    pub header: &'a str,
    /// Everything after the first comma
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split at the first comma. The header is not validated.
    pub fn parse(data_url: &'a str) -> Result<Self, ImageError> {
        let (header, payload) = data_url
            .split_once(',')
            .ok_or(ImageError::MissingSeparator)?;
        Ok(Self { header, payload })
    }

    /// MIME type declared in the header, if it looks like `data:<mime>[;...]`
    pub fn media_type(&self) -> Option<&'a str> {
        let rest = self.header.strip_prefix("data:")?;
        let media_type = rest.split(';').next().unwrap_or_default();
        (!media_type.is_empty()).then_some(media_type)
    }
}

/// Raw base64 payload of a data URL
///
/// # Example
/// ```
/// use analyze_relay::vision::extract_base64_payload;
///
/// assert_eq!(extract_base64_payload("data:image/png;base64,AAAA").unwrap(), "AAAA");
/// assert!(extract_base64_payload("AAAA").is_err());
/// ```
pub fn extract_base64_payload(data_url: &str) -> Result<&str, ImageError> {
    DataUrl::parse(data_url).map(|url| url.payload)
}
