//! SQLite-backed [`UserRepository`].

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use vriksha_core::models::{AuthMethod, User};
use vriksha_core::users::{RepositoryError, UserRepository};

/// Wraps a [`SqlitePool`] over the `users` table created by
/// [`migrate_pool`](crate::migrate::migrate_pool).
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(backend)
    }
}

fn backend(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Backend(e.into())
}

fn row_to_user(row: &SqliteRow) -> Result<User, RepositoryError> {
    let provider: String = row.get("provider");
    let created_at: i64 = row.get("created_at");

    Ok(User {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        avatar: row.get("avatar"),
        created_at: DateTime::from_timestamp(created_at, 0).unwrap_or_default(),
        provider: AuthMethod::parse(&provider)
            .ok_or_else(|| anyhow!("unknown auth provider in users table: {}", provider))?,
        google_id: row.get("google_id"),
    })
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, email, name, avatar, created_at, provider, google_id FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, name, avatar, created_at, provider, google_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.avatar)
        .bind(user.created_at.timestamp())
        .bind(user.provider.as_str())
        .bind(&user.google_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RepositoryError::Duplicate(user.email.clone()))
            }
            Err(e) => Err(backend(e)),
        }
    }
}
