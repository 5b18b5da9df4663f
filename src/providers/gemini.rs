//! Google Gemini provider.
//!
//! Calls `POST {base_url}/v1beta/models/{model}:generateContent` with the
//! key in the `x-goog-api-key` header. Images travel as `inline_data`
//! parts next to the text part.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use vriksha_core::prompt::ProviderRequest;
use vriksha_core::provider::{ChatProvider, ProviderError};

use super::image::ImagePayload;
use super::{http_client, non_empty, send_json};
use crate::config::GeminiConfig;

pub struct GeminiProvider {
    model: String,
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: &GeminiConfig, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
            client: http_client(timeout_secs)?,
        })
    }
}

fn build_body(request: &ProviderRequest) -> Result<Value, ProviderError> {
    let mut parts = vec![json!({ "text": request.user_prompt })];
    if let Some(image) = &request.image {
        let image = ImagePayload::from_data_url(image)?;
        parts.push(json!({
            "inline_data": {
                "mime_type": image.mime_type,
                "data": image.data,
            }
        }));
    }

    Ok(json!({
        "systemInstruction": { "parts": [{ "text": request.system_prompt }] },
        "contents": [{ "role": "user", "parts": parts }],
        "generationConfig": {
            "maxOutputTokens": request.max_tokens,
            "temperature": request.temperature,
        },
    }))
}

/// Concatenate the text parts of the first candidate.
fn parse_response(json: &Value) -> Result<String, ProviderError> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .ok_or_else(|| {
            ProviderError::MalformedResponse("missing candidates[0].content.parts".into())
        })?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    non_empty(text)
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model_label(&self, _has_image: bool) -> String {
        "Google Gemini Vision".to_string()
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;
        let body = build_body(request)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let json = send_json(
            self.client
                .post(url)
                .header("x-goog-api-key", api_key)
                .json(&body),
        )
        .await?;

        parse_response(&json)
    }
}
