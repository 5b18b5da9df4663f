//! End-to-end tests for the HTTP API: a real server on a free port, with
//! stand-in upstream providers served by axum.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

use vriksha::assistant::Assistant;
use vriksha::config::{parse_config, Config};
use vriksha::server::router;

const UNSET_KEY_ENV: &str = "VRIKSHA_TEST_KEY_THAT_IS_NEVER_SET";

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Upstream that fails every request with HTTP 500.
fn broken_upstream() -> Router {
    Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") })
}

/// Upstream that answers like the OpenAI chat-completions API.
fn openai_upstream() -> Router {
    Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<Value>| async move {
            let model = body["model"].as_str().unwrap_or_default().to_string();
            Json(json!({
                "choices": [{
                    "message": { "role": "assistant", "content": format!("Answered by {}", model) }
                }]
            }))
        }),
    )
}

/// Upstream that answers like the Gemini generateContent API.
fn gemini_upstream() -> Router {
    Router::new().fallback(|| async {
        Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Keep the soil lightly moist." }] } }]
        }))
    })
}

fn config(gemini_url: Option<&str>, openai_url: Option<&str>) -> Config {
    config_with(gemini_url, openai_url, "")
}

fn config_with(gemini_url: Option<&str>, openai_url: Option<&str>, extra: &str) -> Config {
    let provider = |name: &str, url: Option<&str>| match url {
        Some(url) => format!(
            "[assistant.{}]\nbase_url = \"{}\"\napi_key = \"test-key\"\napi_key_env = \"{}\"\n",
            name, url, UNSET_KEY_ENV
        ),
        None => format!(
            "[assistant.{}]\napi_key_env = \"{}\"\n",
            name, UNSET_KEY_ENV
        ),
    };
    let toml = format!(
        "{}\n[assistant]\ntimeout_secs = 5\n\n{}\n{}",
        extra,
        provider("gemini", gemini_url),
        provider("openai", openai_url)
    );
    parse_config(&toml).unwrap()
}

async fn start(cfg: &Config) -> String {
    let assistant = Assistant::from_config(&cfg.assistant).unwrap();
    let addr = spawn(router(Arc::new(assistant), cfg)).await;
    format!("http://{}", addr)
}

async fn chat(base: &str, body: String) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}/api/chat", base))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_health() {
    let base = start(&config(None, None)).await;
    let body: Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_products_listing() {
    let base = start(&config(None, None)).await;
    let body: Value = reqwest::get(format!("{}/api/products", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 6);
    assert_eq!(products[2]["name"], "Snake Plant");
    assert_eq!(products[2]["price"], 25.0);
}

#[tokio::test]
async fn test_greeting_without_credentials_is_simulated() {
    let base = start(&config(None, None)).await;
    let (status, body) = chat(&base, json!({ "message": "Hi" }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "simulated");
    assert_eq!(body["hasImage"], false);
    assert!(body["message"].as_str().unwrap().contains("Welcome to Vriksha"));
}

#[tokio::test]
async fn test_upstream_errors_fall_back_to_rules() {
    let upstream = spawn(broken_upstream()).await;
    let url = format!("http://{}", upstream);
    let base = start(&config(Some(&url), Some(&url))).await;

    let (status, body) = chat(
        &base,
        json!({ "message": "How often should I water my fern?" }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "simulated");
    assert_eq!(body["model"], "Vriksha Plant Expert");
    assert!(!body["message"].as_str().unwrap().trim().is_empty());
}

#[tokio::test]
async fn test_secondary_answers_when_primary_is_down() {
    let broken = format!("http://{}", spawn(broken_upstream()).await);
    let openai = format!("http://{}", spawn(openai_upstream()).await);
    let base = start(&config(Some(&broken), Some(&openai))).await;

    let (_, body) = chat(
        &base,
        json!({ "message": "Is a snake plant safe for cats?" }).to_string(),
    )
    .await;

    assert_eq!(body["status"], "ai");
    assert_eq!(body["model"], "OpenAI GPT-3.5");
    assert_eq!(body["message"], "Answered by gpt-3.5-turbo");
}

#[tokio::test]
async fn test_image_goes_to_vision_model() {
    let openai = format!("http://{}", spawn(openai_upstream()).await);
    let base = start(&config(None, Some(&openai))).await;

    let (_, body) = chat(
        &base,
        json!({ "message": "", "image": "data:image/png;base64,iVBORw0KGgo=" }).to_string(),
    )
    .await;

    assert_eq!(body["status"], "ai");
    assert_eq!(body["hasImage"], true);
    assert_eq!(body["model"], "OpenAI GPT-4 Vision");
    assert_eq!(body["message"], "Answered by gpt-4o");
}

#[tokio::test]
async fn test_primary_answers_first() {
    let gemini = format!("http://{}", spawn(gemini_upstream()).await);
    let openai = format!("http://{}", spawn(openai_upstream()).await);
    let base = start(&config(Some(&gemini), Some(&openai))).await;

    let (_, body) = chat(
        &base,
        json!({ "message": "My peace lily is drooping" }).to_string(),
    )
    .await;

    assert_eq!(body["status"], "ai");
    assert_eq!(body["model"], "Google Gemini Vision");
    assert_eq!(body["message"], "Keep the soil lightly moist.");
}

#[tokio::test]
async fn test_image_with_broken_upstream_gets_image_reply() {
    let broken = format!("http://{}", spawn(broken_upstream()).await);
    let base = start(&config(Some(&broken), Some(&broken))).await;

    let (_, body) = chat(
        &base,
        json!({ "message": "What is this?", "image": "data:image/jpeg;base64,/9j/4AAQ" }).to_string(),
    )
    .await;

    assert_eq!(body["status"], "simulated");
    assert_eq!(body["hasImage"], true);
    assert!(body["message"].as_str().unwrap().contains("Describe what you see"));
}

#[tokio::test]
async fn test_malformed_body_is_answered_not_rejected() {
    let base = start(&config(None, None)).await;

    let (status, body) = chat(&base, "{\"message\": ".to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error_fallback");
    assert_eq!(body["hasImage"], false);
    assert!(!body["message"].as_str().unwrap().is_empty());

    let (status, body) = chat(&base, json!({ "message": 42 }).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error_fallback");
}

#[tokio::test]
async fn test_very_long_message_is_answered() {
    let base = start(&config(None, None)).await;
    let message = "my plant looks sad ".repeat(5_300);

    let (status, body) = chat(&base, json!({ "message": message }).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "simulated");
    assert!(!body["message"].as_str().unwrap().trim().is_empty());
}

#[tokio::test]
async fn test_body_over_limit_is_refused() {
    let base = start(&config_with(None, None, "[server]\nmax_body_bytes = 1024\n")).await;
    let message = "x".repeat(4096);

    let resp = reqwest::Client::new()
        .post(format!("{}/api/chat", base))
        .header("content-type", "application/json")
        .body(json!({ "message": message }).to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 413);

    let (status, body) = chat(&base, json!({ "message": "Hi" }).to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "simulated");
}

async fn checkout(base: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}/api/checkout", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_checkout_uses_configured_currency() {
    let base = start(&config_with(None, None, "[checkout]\ncurrency = \"INR\"\n")).await;
    let (status, body) = checkout(
        &base,
        json!({
            "items": [{ "id": 3, "quantity": 3 }, { "id": 6, "quantity": 1 }],
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "+91 90000 00000",
            "address": "12 Garden Lane"
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["amount_minor"], 9500);
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["prefill"]["email"], "asha@example.com");
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart_and_unknown_product() {
    let base = start(&config(None, None)).await;
    let form = json!({ "name": "Asha", "email": "asha@example.com", "address": "12 Garden Lane" });

    let (status, body) = checkout(&base, form.clone()).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "empty_cart");

    let mut unknown = form;
    unknown["items"] = json!([{ "id": 404, "quantity": 1 }]);
    let (status, body) = checkout(&base, unknown).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "unknown_product");
}
