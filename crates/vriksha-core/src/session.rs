//! Storefront session state and the signed-in-user store.
//!
//! [`StorefrontSession`] owns everything that belongs to one shopper: the
//! cart, the chat conversation, and the signed-in user. Components receive
//! it by `&mut` instead of looking it up from ambient global state.
//!
//! [`SessionStore`] persists the single signed-in user record between
//! runs; the `vriksha` crate provides a JSON file implementation.

use std::sync::Mutex;

use anyhow::{anyhow, Result};

use crate::cart::Cart;
use crate::chat::Conversation;
use crate::models::User;

/// Persistence for the one signed-in user record.
pub trait SessionStore: Send + Sync {
    /// The stored user, or `None` when signed out. Unreadable records are
    /// discarded and reported as `None`.
    fn load(&self) -> Result<Option<User>>;

    fn save(&self, user: &User) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Process-local [`SessionStore`].
#[derive(Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<User>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>> {
        let guard = self
            .user
            .lock()
            .map_err(|_| anyhow!("session lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, user: &User) -> Result<()> {
        let mut guard = self
            .user
            .lock()
            .map_err(|_| anyhow!("session lock poisoned"))?;
        *guard = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .user
            .lock()
            .map_err(|_| anyhow!("session lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

/// Per-shopper state handed to the cart, chat, and checkout flows.
#[derive(Debug, Clone, Default)]
pub struct StorefrontSession {
    pub cart: Cart,
    pub conversation: Conversation,
    pub user: Option<User>,
}

impl StorefrontSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for a user restored from a [`SessionStore`].
    pub fn restore(store: &dyn SessionStore) -> Result<Self> {
        Ok(Self {
            user: store.load()?,
            ..Self::default()
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
