//! Mocked storefront authentication.
//!
//! Accounts live behind a [`UserRepository`]; the signed-in user is kept
//! in a [`SessionStore`]. Passwords are never stored: e-mail sign-in
//! accepts exactly the configured demo password.
//!
//! Google sign-in is modelled as an explicit async operation. The
//! browser popup sits behind [`IdentityProvider`], which reports what the
//! user did as an [`OAuthOutcome`]; [`AuthService::sign_in_with_google`]
//! turns that into a [`SignInOutcome`]. The ID token's payload is decoded
//! without verifying its signature.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use vriksha_core::models::{AuthMethod, User};
use vriksha_core::session::SessionStore;
use vriksha_core::users::{normalize_email, RepositoryError, UserRepository};

use crate::config::AuthConfig;

/// Value shipped in sample configs in place of a real client id.
const PLACEHOLDER_CLIENT_ID: &str = "your-google-client-id-here";
const MIN_CLIENT_ID_CHARS: usize = 20;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no account found for {0}")]
    UserNotFound(String),
    #[error("invalid password")]
    InvalidPassword,
    #[error("an account already exists for {0}")]
    AlreadyExists(String),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("Google sign-in is not configured")]
    GoogleNotConfigured,
    #[error("invalid Google credential: {0}")]
    InvalidCredential(String),
    #[error("identity provider error: {0}")]
    Provider(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("session store error: {0}")]
    Session(#[from] anyhow::Error),
}

/// What the identity popup reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthOutcome {
    /// A signed ID token (JWT).
    Credential(String),
    /// The popup is waiting on the user (e.g. blocked or still open).
    PendingUserAction,
    Cancelled,
    Failed(String),
}

/// Result of a Google sign-in attempt.
#[derive(Debug)]
pub enum SignInOutcome {
    SignedIn(User),
    Failed(AuthError),
    PendingUserAction,
    Cancelled,
}

/// The external Google identity popup.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn request_credential(&self) -> OAuthOutcome;
}

/// Whether `client_id` looks like a real Google OAuth client id.
pub fn google_client_configured(client_id: Option<&str>) -> bool {
    match client_id.map(str::trim) {
        None | Some("") => false,
        Some(PLACEHOLDER_CLIENT_ID) => false,
        Some(id) => id.chars().count() >= MIN_CLIENT_ID_CHARS,
    }
}

/// Claims read from a Google ID token.
#[derive(Debug, Deserialize)]
struct GoogleClaims {
    sub: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

fn decode_id_token(token: &str) -> Result<GoogleClaims, AuthError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthError::InvalidCredential("not a JWT".into()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::InvalidCredential(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidCredential(e.to_string()))
}

pub struct AuthService<R, S> {
    users: R,
    session: S,
    demo_password: String,
    google_client_id: Option<String>,
}

impl<R: UserRepository, S: SessionStore> AuthService<R, S> {
    pub fn new(users: R, session: S, config: &AuthConfig) -> Self {
        Self {
            users,
            session,
            demo_password: config.demo_password.clone(),
            google_client_id: config.google_client_id.clone(),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(email.clone()))?;

        if password != self.demo_password {
            tracing::info!(email = %email, "sign-in rejected: wrong password");
            return Err(AuthError::InvalidPassword);
        }

        self.session.save(&user)?;
        tracing::info!(email = %email, "signed in");
        Ok(user)
    }

    /// Create an e-mail account and sign it in. The password is only
    /// checked for presence.
    pub async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        if !email.contains('@') {
            return Err(AuthError::InvalidInput("email must contain '@'"));
        }
        if password.trim().is_empty() {
            return Err(AuthError::InvalidInput("password must not be empty"));
        }
        if name.trim().is_empty() {
            return Err(AuthError::InvalidInput("name must not be empty"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::AlreadyExists(email));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.clone(),
            name: name.trim().to_string(),
            avatar: None,
            created_at: Utc::now(),
            provider: AuthMethod::Email,
            google_id: None,
        };
        self.users.insert(&user).await.map_err(|e| match e {
            RepositoryError::Duplicate(email) => AuthError::AlreadyExists(email),
            other => AuthError::Repository(other),
        })?;

        self.session.save(&user)?;
        tracing::info!(email = %email, "account created");
        Ok(user)
    }

    /// Run the Google popup flow through `idp`.
    pub async fn sign_in_with_google(&self, idp: &dyn IdentityProvider) -> SignInOutcome {
        if !google_client_configured(self.google_client_id.as_deref()) {
            return SignInOutcome::Failed(AuthError::GoogleNotConfigured);
        }

        match idp.request_credential().await {
            OAuthOutcome::Credential(token) => match self.complete_google(&token).await {
                Ok(user) => SignInOutcome::SignedIn(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Google sign-in failed");
                    SignInOutcome::Failed(e)
                }
            },
            OAuthOutcome::PendingUserAction => SignInOutcome::PendingUserAction,
            OAuthOutcome::Cancelled => SignInOutcome::Cancelled,
            OAuthOutcome::Failed(msg) => SignInOutcome::Failed(AuthError::Provider(msg)),
        }
    }

    async fn complete_google(&self, token: &str) -> Result<User, AuthError> {
        let claims = decode_id_token(token)?;
        let email = normalize_email(&claims.email);

        let user = match self.users.find_by_email(&email).await? {
            Some(existing) => existing,
            None => {
                let user = User {
                    id: Uuid::new_v4().to_string(),
                    name: claims
                        .name
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string()),
                    email,
                    avatar: claims.picture,
                    created_at: Utc::now(),
                    provider: AuthMethod::Google,
                    google_id: Some(claims.sub),
                };
                self.users.insert(&user).await?;
                user
            }
        };

        self.session.save(&user)?;
        Ok(user)
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.session.load()?)
    }
}
