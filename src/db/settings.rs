//! Persisted application flags.

use sqlx::SqlitePool;
use tracing::debug;

pub const ONBOARDING_KEY: &str = "hasCompletedOnboarding";

async fn get_flag(pool: &SqlitePool, key: &str) -> Result<Option<bool>, sqlx::Error> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(value.map(|v| v == "true"))
}

async fn set_flag(pool: &SqlitePool, key: &str, value: bool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value,
         updated_at = strftime('%s', 'now')",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(pool)
    .await?;

    debug!("Stored setting {} = {}", key, value);
    Ok(())
}

/// `false` until onboarding has been completed once.
pub async fn has_completed_onboarding(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    Ok(get_flag(pool, ONBOARDING_KEY).await?.unwrap_or(false))
}

pub async fn set_onboarding_completed(pool: &SqlitePool, completed: bool) -> Result<(), sqlx::Error> {
    set_flag(pool, ONBOARDING_KEY, completed).await
}
