use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::ReadingStore;
use crate::{NewReading, Reading};

// ---

/// [`ReadingStore`] backed by the `weather_data` table.
#[derive(Debug, Clone)]
pub struct PgReadingStore {
    pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    // ---
    async fn latest(&self) -> Result<Option<Reading>, sqlx::Error> {
        // ---
        sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, device_id, temperature, pressure, timestamp
            FROM weather_data
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
    }

    async fn since(&self, start: DateTime<Utc>) -> Result<Vec<Reading>, sqlx::Error> {
        // ---
        sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, device_id, temperature, pressure, timestamp
            FROM weather_data
            WHERE timestamp >= $1
            ORDER BY id ASC
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await
    }

    async fn insert(&self, reading: &NewReading) -> Result<Reading, sqlx::Error> {
        // ---
        sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO weather_data (device_id, temperature, pressure, timestamp)
            VALUES ($1, $2, $3, $4)
            RETURNING id, device_id, temperature, pressure, timestamp
            "#,
        )
        .bind(reading.device_id)
        .bind(reading.temperature)
        .bind(reading.pressure)
        .bind(reading.timestamp)
        .fetch_one(&self.pool)
        .await
    }

    async fn device_id_exists(&self, device_id: Uuid) -> Result<bool, sqlx::Error> {
        // ---
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM weather_data WHERE device_id = $1)",
        )
        .bind(device_id)
        .fetch_one(&self.pool)
        .await
    }
}
