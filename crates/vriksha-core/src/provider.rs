//! Provider seam for remote text/vision generation.
//!
//! The assistant resolver in the `vriksha` crate holds an ordered list of
//! [`ChatProvider`]s and tries them one by one. Implementations make a
//! single attempt per call (no retries) and report every kind of failure
//! through [`ProviderError`]; the resolver decides what happens next.

use async_trait::async_trait;
use thiserror::Error;

use crate::prompt::ProviderRequest;

/// Why a provider attempt did not produce text.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider is not configured (missing credentials)")]
    NotConfigured,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("provider returned an empty response")]
    EmptyResponse,
    #[error("provider timed out after {0}s")]
    Timeout(u64),
    #[error("invalid image attachment: {0}")]
    InvalidImage(String),
}

/// A remote text/vision generation backend.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use vriksha_core::prompt::ProviderRequest;
/// use vriksha_core::provider::{ChatProvider, ProviderError};
///
/// struct Echo;
///
/// #[async_trait]
/// impl ChatProvider for Echo {
///     fn name(&self) -> &str { "echo" }
///     fn model_label(&self, _has_image: bool) -> String { "Echo".to_string() }
///     fn is_configured(&self) -> bool { true }
///
///     async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
///         Ok(request.user_prompt.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Short identifier used in logs (e.g. `"gemini"`).
    fn name(&self) -> &str;

    /// Human-readable model label returned to the chat widget.
    fn model_label(&self, has_image: bool) -> String;

    /// Whether credentials are present. Unconfigured providers are skipped
    /// without being called.
    fn is_configured(&self) -> bool;

    /// Make one generation attempt.
    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError>;
}
