//! User repository abstraction.
//!
//! The [`UserRepository`] trait is the only way the auth flow reaches
//! account data, so the in-memory demo store and the SQLite store in the
//! `vriksha` crate are interchangeable.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.
//! E-mail addresses are compared exactly; callers normalize them with
//! [`normalize_email`] first.

pub mod memory;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use thiserror::Error;

use crate::models::{AuthMethod, User};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("a user with email {0} already exists")]
    Duplicate(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Account lookup and creation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the account registered under `email`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Store a new account. Fails with [`RepositoryError::Duplicate`] if the
    /// e-mail is already registered.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;
}

/// Trim and lower-case an e-mail address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// The account every fresh store is seeded with.
pub fn demo_user() -> User {
    User {
        id: "1".to_string(),
        email: "demo@vriksha.com".to_string(),
        name: "Demo User".to_string(),
        avatar: Some("/placeholder.svg?height=40&width=40".to_string()),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
        provider: AuthMethod::Email,
        google_id: None,
    }
}
