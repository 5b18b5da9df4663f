//! Core data models shared by the cart, the assistant, and the auth flow.
//!
//! These types are plain data: the invariants that span several values
//! (one line per product id, non-empty replies) are enforced by the
//! components that own them, [`Cart`](crate::cart::Cart) and the assistant
//! resolver.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable catalog identifier of a product.
pub type ProductId = u32;

/// One distinct product held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Display-only image URL.
    pub image: String,
    /// Always `>= 1` while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price × quantity` for this line.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Product metadata supplied when adding to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLine {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image: String,
}

impl NewLine {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image: image.into(),
        }
    }
}

/// One turn in the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_from_assistant: bool,
    pub timestamp: DateTime<Utc>,
    /// Data-URL encoded image attached by the user, if any.
    pub attached_image: Option<String>,
}

/// Which resolver state produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceTag {
    ProviderPrimary,
    ProviderSecondary,
    RuleBased,
    ErrorFallback,
}

impl SourceTag {
    /// The wire status shown as a badge by the chat widget.
    pub fn status(self) -> ReplyStatus {
        match self {
            SourceTag::ProviderPrimary | SourceTag::ProviderSecondary => ReplyStatus::Ai,
            SourceTag::RuleBased => ReplyStatus::Simulated,
            SourceTag::ErrorFallback => ReplyStatus::ErrorFallback,
        }
    }
}

/// Wire-level reply status (`"ai" | "simulated" | "error_fallback"`).
///
/// Display-only; it carries no control semantics back into the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Ai,
    Simulated,
    ErrorFallback,
}

impl ReplyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyStatus::Ai => "ai",
            ReplyStatus::Simulated => "simulated",
            ReplyStatus::ErrorFallback => "error_fallback",
        }
    }
}

/// The resolver's output for a single chat request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    /// Never empty or whitespace-only.
    pub message: String,
    pub source: SourceTag,
    pub used_image: bool,
    /// Display label of the model that produced the text.
    pub model: String,
}

impl AssistantReply {
    pub fn status(&self) -> ReplyStatus {
        self.source.status()
    }
}

/// How a user account was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Email,
    Google,
}

impl AuthMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthMethod::Email => "email",
            AuthMethod::Google => "google",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(AuthMethod::Email),
            "google" => Some(AuthMethod::Google),
            _ => None,
        }
    }
}

/// A storefront account. Credentials are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub provider: AuthMethod,
    pub google_id: Option<String>,
}
