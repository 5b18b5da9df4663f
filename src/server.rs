//! Storefront HTTP server.
//!
//! Serves the chat widget's backend and the product listing.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/chat` | Resolve a chat message (optional data-URL image) |
//! | `GET`  | `/api/products` | List the catalog |
//! | `POST` | `/api/checkout` | Build the hosted-checkout payload for a cart |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Chat Contract
//!
//! ```json
//! // request
//! { "message": "Why are my leaves yellow?", "image": "data:image/jpeg;base64,..." }
//! // response
//! { "message": "...", "model": "Google Gemini Vision", "status": "ai", "hasImage": true }
//! ```
//!
//! `/api/chat` always answers `200`. A body that does not decode as a chat
//! request is answered with `status: "error_fallback"` instead of a 4xx.
//! Bodies above `[server].max_body_bytes` are refused by the body limit
//! before the handler runs.
//!
//! `/api/checkout` answers `400` with `{ "error": { "code", "message" } }`
//! for an empty cart, an unknown product, or an invalid form. The amount
//! is charged in `[checkout].currency`.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the storefront can
//! be served from a different origin.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use vriksha_core::catalog::{self, Product};
use vriksha_core::models::{AssistantReply, ProductId};
use vriksha_core::session::StorefrontSession;

use crate::assistant::Assistant;
use crate::checkout::{self, CheckoutError, CheckoutForm, CheckoutRequest};
use crate::config::Config;

#[derive(Clone)]
struct AppState {
    assistant: Arc<Assistant>,
    currency: Arc<str>,
}

/// Starts the HTTP server on `[server].bind` and runs until the process
/// is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let assistant = Assistant::from_config(&config.assistant)?;
    tracing::info!(
        configured_providers = assistant.configured_providers(),
        "assistant ready"
    );

    let app = router(Arc::new(assistant), config);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "server listening");
    println!("Vriksha server listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the application router around an existing [`Assistant`].
pub fn router(assistant: Arc<Assistant>, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(handle_chat))
        .route("/api/products", get(handle_products))
        .route("/api/checkout", post(handle_checkout))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(cors)
        .with_state(AppState {
            assistant,
            currency: Arc::from(config.checkout.currency.as_str()),
        })
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/products ============

async fn handle_products() -> Json<Vec<Product>> {
    Json(catalog::products())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(code: &str, message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: code.to_string(),
        message: message.into(),
    }
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        let code = match &e {
            CheckoutError::EmptyCart => "empty_cart",
            CheckoutError::InvalidForm(_) => "invalid_form",
            _ => "bad_request",
        };
        bad_request(code, e.to_string())
    }
}

// ============ POST /api/checkout ============

#[derive(Debug, Deserialize)]
struct CheckoutItem {
    id: ProductId,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
struct CheckoutBody {
    #[serde(default)]
    items: Vec<CheckoutItem>,
    #[serde(flatten)]
    form: CheckoutForm,
}

/// Handler for `POST /api/checkout`.
///
/// Rebuilds the cart from catalog prices and returns the payload the
/// browser opens the hosted widget with.
async fn handle_checkout(
    State(state): State<AppState>,
    Json(body): Json<CheckoutBody>,
) -> Result<Json<CheckoutRequest>, AppError> {
    let mut session = StorefrontSession::new();
    for item in &body.items {
        let product = catalog::find(item.id).ok_or_else(|| {
            bad_request("unknown_product", format!("no product with id {}", item.id))
        })?;
        session.cart.add_product(&product, item.quantity);
    }

    let request = checkout::build_request(&session, &body.form, &state.currency)?;
    tracing::info!(
        amount_minor = request.amount_minor,
        currency = %request.currency,
        "checkout prepared"
    );
    Ok(Json(request))
}

// ============ POST /api/chat ============

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    message: String,
    model: String,
    /// `"ai"`, `"simulated"`, or `"error_fallback"`.
    status: &'static str,
    has_image: bool,
}

impl From<AssistantReply> for ChatResponse {
    fn from(reply: AssistantReply) -> Self {
        Self {
            status: reply.status().as_str(),
            has_image: reply.used_image,
            message: reply.message,
            model: reply.model,
        }
    }
}

/// Handler for `POST /api/chat`.
///
/// Takes the raw body so that decode failures can still be answered by
/// the assistant's error fallback.
async fn handle_chat(State(state): State<AppState>, body: Bytes) -> Json<ChatResponse> {
    let reply = match serde_json::from_slice::<ChatRequest>(&body) {
        Ok(request) => {
            tracing::debug!(
                chars = request.message.chars().count(),
                has_image = request.image.is_some(),
                "chat request"
            );
            state
                .assistant
                .resolve(&request.message, request.image.as_deref())
                .await
        }
        Err(e) => {
            tracing::debug!(error = %e, "chat request did not decode");
            state.assistant.resolve_malformed(&body)
        }
    };

    Json(ChatResponse::from(reply))
}
