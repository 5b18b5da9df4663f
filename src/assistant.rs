//! Assistant response resolver.
//!
//! Every chat request walks a fixed chain of states and stops at the
//! first one that yields text:
//!
//! ```text
//! primary provider ──fail──▶ secondary provider ──fail──▶ rule-based
//!                                                          (canned reply)
//! unreadable request body ─────────────────────────────▶ error fallback
//! ```
//!
//! Providers are held as an ordered `Vec<Box<dyn ChatProvider>>`; the
//! first entry is reported as the primary source, every later entry as
//! the secondary. Each attempt is bounded by a timeout and made once.
//! Failures are logged and never surface to the caller: [`Assistant::resolve`]
//! always returns a non-empty [`AssistantReply`].

use anyhow::Result;
use std::time::Duration;

use vriksha_core::chat::IMAGE_ONLY_PROMPT;
use vriksha_core::models::{AssistantReply, SourceTag};
use vriksha_core::prompt::{build_request, GenerationSettings, ProviderRequest};
use vriksha_core::provider::{ChatProvider, ProviderError};
use vriksha_core::responder::{
    canned_reply, image_fallback_reply, EXPERT_MODEL_LABEL, GENERIC_FALLBACK,
};

use crate::config::AssistantConfig;
use crate::providers::create_providers;

pub struct Assistant {
    providers: Vec<Box<dyn ChatProvider>>,
    settings: GenerationSettings,
    timeout: Duration,
}

impl Assistant {
    pub fn new(
        providers: Vec<Box<dyn ChatProvider>>,
        settings: GenerationSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            providers,
            settings,
            timeout,
        }
    }

    /// Build the resolver with the providers enabled in `config`.
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        Ok(Self::new(
            create_providers(config)?,
            config.generation(),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// Assistant with no remote providers; always answers from the rules.
    pub fn rule_based() -> Self {
        Self::new(
            Vec::new(),
            GenerationSettings::default(),
            Duration::from_secs(1),
        )
    }

    /// Number of providers that have credentials.
    pub fn configured_providers(&self) -> usize {
        self.providers.iter().filter(|p| p.is_configured()).count()
    }

    /// Produce a reply for `text` and an optional data-URL `image`.
    pub async fn resolve(&self, text: &str, image: Option<&str>) -> AssistantReply {
        let image = image.map(str::trim).filter(|i| !i.is_empty());
        // The rules classify the text as typed; providers get it trimmed.
        let typed = text;
        let text = text.trim();

        if text.is_empty() && image.is_none() {
            return rule_based_reply(typed, None, SourceTag::RuleBased);
        }
        let text = if text.is_empty() { IMAGE_ONLY_PROMPT } else { text };

        let request = build_request(text, image, &self.settings);
        let has_image = request.has_image();

        for (index, provider) in self.providers.iter().enumerate() {
            if !provider.is_configured() {
                tracing::debug!(provider = provider.name(), "provider not configured, skipping");
                continue;
            }

            match self.attempt(provider.as_ref(), &request).await {
                Ok(message) => {
                    tracing::info!(provider = provider.name(), has_image, "provider answered");
                    return AssistantReply {
                        message,
                        source: if index == 0 {
                            SourceTag::ProviderPrimary
                        } else {
                            SourceTag::ProviderSecondary
                        },
                        used_image: has_image,
                        model: provider.model_label(has_image),
                    };
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "provider attempt failed");
                }
            }
        }

        rule_based_reply(typed, image, SourceTag::RuleBased)
    }

    async fn attempt(
        &self,
        provider: &dyn ChatProvider,
        request: &ProviderRequest,
    ) -> Result<String, ProviderError> {
        let text = tokio::time::timeout(self.timeout, provider.generate(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout.as_secs()))??;

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }

    /// Reply for a request body that could not be decoded as a chat request.
    ///
    /// Pulls `message`/`image` out of whatever JSON is there and answers
    /// from the rules; with nothing usable, returns the generic message.
    pub fn resolve_malformed(&self, raw: &[u8]) -> AssistantReply {
        let value: Option<serde_json::Value> = serde_json::from_slice(raw).ok();
        let field = |name: &str| {
            value
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        let text = field("message");
        let image = field("image").map(|i| i.trim().to_string());

        tracing::warn!(
            bytes = raw.len(),
            recovered_text = text.is_some(),
            recovered_image = image.is_some(),
            "unreadable chat request"
        );

        if text.is_none() && image.is_none() {
            return AssistantReply {
                message: GENERIC_FALLBACK.to_string(),
                source: SourceTag::ErrorFallback,
                used_image: false,
                model: EXPERT_MODEL_LABEL.to_string(),
            };
        }

        rule_based_reply(
            text.as_deref().unwrap_or(""),
            image.as_deref(),
            SourceTag::ErrorFallback,
        )
    }
}

fn rule_based_reply(text: &str, image: Option<&str>, source: SourceTag) -> AssistantReply {
    let message = match image {
        Some(_) => image_fallback_reply(),
        None => canned_reply(text),
    };
    AssistantReply {
        message: message.to_string(),
        source,
        used_image: image.is_some(),
        model: EXPERT_MODEL_LABEL.to_string(),
    }
}
