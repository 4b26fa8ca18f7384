//! Persistence gateway for readings.
//!
//! Handlers and services only see [`ReadingStore`]; `main.rs` injects the
//! PostgreSQL implementation and tests inject [`memory::MemoryStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{NewReading, Reading};

mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgReadingStore;

// ---

/// Insert/query operations the service needs from the relational store.
///
/// Every call is a single auto-committed statement; there are no
/// transactions spanning calls.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    // ---
    /// The most recently inserted reading, if any.
    async fn latest(&self) -> Result<Option<Reading>, sqlx::Error>;

    /// All readings with `timestamp >= start`, oldest first.
    async fn since(&self, start: DateTime<Utc>) -> Result<Vec<Reading>, sqlx::Error>;

    /// Persist a reading and return it with its store-assigned id.
    async fn insert(&self, reading: &NewReading) -> Result<Reading, sqlx::Error>;

    /// Whether any reading already carries `device_id`.
    async fn device_id_exists(&self, device_id: Uuid) -> Result<bool, sqlx::Error>;
}
