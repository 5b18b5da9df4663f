//! Remote text/vision providers.
//!
//! Concrete [`ChatProvider`] implementations:
//! - **[`GeminiProvider`]**: Google Gemini `generateContent` (primary).
//! - **[`OpenAiProvider`]**: OpenAI chat completions (secondary).
//!
//! # Provider Selection
//!
//! [`create_providers`] returns the enabled providers in fallback order.
//! A provider without an API key is still returned; it reports
//! `is_configured() == false` and the resolver skips it.
//!
//! # Failure Handling
//!
//! Each call is a single attempt. Transport errors, non-2xx responses,
//! and unparsable bodies all become a [`ProviderError`]; nothing is
//! retried here.

mod gemini;
pub mod image;
mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

use anyhow::Result;
use std::time::Duration;

use vriksha_core::provider::{ChatProvider, ProviderError};

use crate::config::AssistantConfig;

/// Longest upstream error body kept in a [`ProviderError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Build the enabled providers in fallback order (Gemini, then OpenAI).
pub fn create_providers(config: &AssistantConfig) -> Result<Vec<Box<dyn ChatProvider>>> {
    let mut providers: Vec<Box<dyn ChatProvider>> = Vec::new();

    if config.gemini.enabled {
        providers.push(Box::new(GeminiProvider::new(
            &config.gemini,
            config.timeout_secs,
        )?));
    }
    if config.openai.enabled {
        providers.push(Box::new(OpenAiProvider::new(
            &config.openai,
            config.timeout_secs,
        )?));
    }

    Ok(providers)
}

fn http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Send a request and decode a successful JSON body.
async fn send_json(request: reqwest::RequestBuilder) -> Result<serde_json::Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body: String = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}

/// Reject blank generations.
fn non_empty(text: String) -> Result<String, ProviderError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(trimmed.to_string())
    }
}
