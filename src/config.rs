//! TOML configuration.
//!
//! Every section has defaults, so an empty file (or [`Config::minimal`])
//! is a valid configuration: no remote providers are configured and the
//! assistant answers from its built-in rules.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:3000"
//!
//! [assistant]
//! timeout_secs = 20
//!
//! [assistant.gemini]
//! model = "gemini-1.5-flash"
//! api_key_env = "GOOGLE_GENERATIVE_AI_API_KEY"
//!
//! [assistant.openai]
//! api_key_env = "OPENAI_API_KEY"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use vriksha_core::prompt::GenerationSettings;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Request body limit; data-URL images make chat bodies large.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `compact` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Upper bound for a single provider attempt.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            gemini: GeminiConfig::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

impl AssistantConfig {
    pub fn generation(&self) -> GenerationSettings {
        GenerationSettings {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

fn default_timeout_secs() -> u64 {
    20
}
fn default_max_tokens() -> u32 {
    300
}
fn default_temperature() -> f32 {
    0.7
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_url")]
    pub base_url: String,
    /// Inline key; takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_key_env")]
    pub api_key_env: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_gemini_model(),
            base_url: default_gemini_url(),
            api_key: None,
            api_key_env: default_gemini_key_env(),
        }
    }
}

impl GeminiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

fn default_true() -> bool {
    true
}
fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}
fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_gemini_key_env() -> String {
    "GOOGLE_GENERATIVE_AI_API_KEY".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_openai_text_model")]
    pub text_model: String,
    /// Model used when an image is attached.
    #[serde(default = "default_openai_vision_model")]
    pub vision_model: String,
    #[serde(default = "default_openai_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_openai_key_env")]
    pub api_key_env: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text_model: default_openai_text_model(),
            vision_model: default_openai_vision_model(),
            base_url: default_openai_url(),
            api_key: None,
            api_key_env: default_openai_key_env(),
        }
    }
}

impl OpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_key(self.api_key.as_deref(), &self.api_key_env)
    }
}

fn default_openai_text_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_openai_vision_model() -> String {
    "gpt-4o".to_string()
}
fn default_openai_url() -> String {
    "https://api.openai.com".to_string()
}
fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// Inline key if set, else the named environment variable. Blank values
/// count as absent.
fn resolve_key(inline: Option<&str>, env_name: &str) -> Option<String> {
    inline
        .map(str::to_string)
        .or_else(|| std::env::var(env_name).ok())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/vriksha.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// The single password accepted by the mocked sign-in.
    #[serde(default = "default_demo_password")]
    pub demo_password: String,
    #[serde(default)]
    pub google_client_id: Option<String>,
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            demo_password: default_demo_password(),
            google_client_id: None,
            session_path: default_session_path(),
        }
    }
}

fn default_demo_password() -> String {
    "password123".to_string()
}
fn default_session_path() -> PathBuf {
    PathBuf::from("./data/session.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckoutConfig {
    /// ISO 4217 code passed to the hosted checkout widget.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Config {
    /// All defaults. Used when no config file is available.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

fn validate(config: &Config) -> Result<()> {
    if config.server.max_body_bytes == 0 {
        anyhow::bail!("server.max_body_bytes must be > 0");
    }

    match config.logging.format.as_str() {
        "compact" | "json" => {}
        other => anyhow::bail!(
            "Unknown logging.format: '{}'. Must be compact or json.",
            other
        ),
    }

    // Validate assistant
    if config.assistant.timeout_secs == 0 {
        anyhow::bail!("assistant.timeout_secs must be > 0");
    }
    if config.assistant.max_tokens == 0 {
        anyhow::bail!("assistant.max_tokens must be > 0");
    }
    if !(0.0..=2.0).contains(&config.assistant.temperature) {
        anyhow::bail!("assistant.temperature must be in [0.0, 2.0]");
    }

    let currency = &config.checkout.currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        anyhow::bail!(
            "checkout.currency must be a three-letter ISO code, got '{}'",
            currency
        );
    }

    Ok(())
}
