//! Database schema management for the weather station service.
//!
//! Ensures the readings table and its indexes exist before serving requests.
//! Applied once on startup from `main.rs`.

use anyhow::{Context, Result};
use sqlx::PgPool;

// ---

/// Create the `weather_data` table and indexes if absent (idempotent).
///
/// Safe to call on every startup. Errors are propagated if any statement
/// fails; nothing is committed in that case.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS weather_data (
            id          SERIAL      PRIMARY KEY,
            device_id   UUID        NOT NULL,
            temperature FLOAT8      NOT NULL,
            pressure    FLOAT8      NOT NULL,
            timestamp   TIMESTAMPTZ NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await
    .context("failed to create weather_data table")?;

    // Window queries filter on timestamp
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weather_data_timestamp
            ON weather_data (timestamp);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Device id allocation checks existence by device_id
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_weather_data_device_id
            ON weather_data (device_id);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
