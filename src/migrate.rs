//! Schema setup for the account database.
//!
//! Idempotent: safe to run on every `vriksha init`. The demo account is
//! seeded with `INSERT OR IGNORE`, so an existing row is left alone.

use anyhow::Result;
use sqlx::SqlitePool;

use vriksha_core::users::demo_user;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    migrate_pool(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Create tables and seed the demo account on an open pool.
pub async fn migrate_pool(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            avatar TEXT,
            created_at INTEGER NOT NULL,
            provider TEXT NOT NULL DEFAULT 'email',
            google_id TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_google_id ON users(google_id)")
        .execute(pool)
        .await?;

    let demo = demo_user();
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (id, email, name, avatar, created_at, provider, google_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&demo.id)
    .bind(&demo.email)
    .bind(&demo.name)
    .bind(&demo.avatar)
    .bind(demo.created_at.timestamp())
    .bind(demo.provider.as_str())
    .bind(&demo.google_id)
    .execute(pool)
    .await?;

    Ok(())
}
