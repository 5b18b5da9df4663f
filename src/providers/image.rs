//! Image attachments for vision requests.
//!
//! The chat widget sends images as data URLs
//! (`data:image/png;base64,iVBOR...`). Providers need the MIME type and
//! the base64 payload separately, so [`ImagePayload::from_data_url`] splits
//! and validates them. A bare base64 string is accepted as `image/jpeg`.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

use vriksha_core::provider::ProviderError;

const DEFAULT_MIME: &str = "image/jpeg";

/// A decoded-and-validated image attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64 (standard alphabet) without whitespace.
    pub data: String,
}

impl ImagePayload {
    pub fn from_data_url(input: &str) -> Result<Self, ProviderError> {
        let input = input.trim();
        let (mime_type, payload) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| ProviderError::InvalidImage("data URL has no payload".into()))?;
                let mime = header.strip_suffix(";base64").ok_or_else(|| {
                    ProviderError::InvalidImage("only base64 data URLs are supported".into())
                })?;
                if !mime.starts_with("image/") {
                    return Err(ProviderError::InvalidImage(format!(
                        "unsupported media type: {}",
                        mime
                    )));
                }
                (mime.to_string(), payload)
            }
            None => (DEFAULT_MIME.to_string(), input),
        };

        let data: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if data.is_empty() {
            return Err(ProviderError::InvalidImage("empty image payload".into()));
        }
        STANDARD
            .decode(&data)
            .map_err(|e| ProviderError::InvalidImage(format!("bad base64: {}", e)))?;

        Ok(Self { mime_type, data })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Read an image file and encode it as a data URL.
pub fn encode_file(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read image: {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => DEFAULT_MIME,
    };
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}
