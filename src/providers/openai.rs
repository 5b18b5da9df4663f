//! OpenAI chat-completions provider.
//!
//! Text-only requests use `text_model`; requests with an image switch to
//! `vision_model` and send the data URL as an `image_url` content part.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use vriksha_core::prompt::ProviderRequest;
use vriksha_core::provider::{ChatProvider, ProviderError};

use super::image::ImagePayload;
use super::{http_client, non_empty, send_json};
use crate::config::OpenAiConfig;

pub struct OpenAiProvider {
    text_model: String,
    vision_model: String,
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: &OpenAiConfig, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
            client: http_client(timeout_secs)?,
        })
    }

    fn model_for(&self, has_image: bool) -> &str {
        if has_image {
            &self.vision_model
        } else {
            &self.text_model
        }
    }
}

fn build_body(model: &str, request: &ProviderRequest) -> Result<Value, ProviderError> {
    let user_content = match &request.image {
        Some(image) => {
            let image = ImagePayload::from_data_url(image)?;
            json!([
                { "type": "text", "text": request.user_prompt },
                { "type": "image_url", "image_url": { "url": image.to_data_url() } },
            ])
        }
        None => json!(request.user_prompt),
    };

    Ok(json!({
        "model": model,
        "messages": [
            { "role": "system", "content": request.system_prompt },
            { "role": "user", "content": user_content },
        ],
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
    }))
}

fn parse_response(json: &Value) -> Result<String, ProviderError> {
    let content = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            ProviderError::MalformedResponse("missing choices[0].message.content".into())
        })?;

    non_empty(content.to_string())
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model_label(&self, has_image: bool) -> String {
        match self.model_for(has_image) {
            "gpt-3.5-turbo" => "OpenAI GPT-3.5".to_string(),
            "gpt-4o" => "OpenAI GPT-4 Vision".to_string(),
            other => format!("OpenAI {}", other),
        }
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;
        let body = build_body(self.model_for(request.has_image()), request)?;

        let json = send_json(
            self.client
                .post(format!("{}/v1/chat/completions", self.base_url))
                .bearer_auth(api_key)
                .json(&body),
        )
        .await?;

        parse_response(&json)
    }
}
