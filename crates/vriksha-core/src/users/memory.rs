//! In-memory [`UserRepository`] for tests and demo mode.
//!
//! Uses a `Vec` behind `std::sync::RwLock`. Data lives as long as the
//! repository value.

use std::sync::RwLock;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::models::User;

use super::{demo_user, RepositoryError, UserRepository};

/// In-memory user store.
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// A repository holding only the demo account.
    pub fn with_demo_user() -> Self {
        Self {
            users: RwLock::new(vec![demo_user()]),
        }
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self
            .users
            .read()
            .map_err(|_| anyhow!("user store lock poisoned"))?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| anyhow!("user store lock poisoned"))?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Duplicate(user.email.clone()));
        }
        users.push(user.clone());
        Ok(())
    }
}
