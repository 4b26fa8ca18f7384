//! In-memory [`ReadingStore`] used as a test double.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ReadingStore;
use crate::{NewReading, Reading};

// ---

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Reading>>,
    fail_queries: AtomicBool,
    fail_exists_checks: AtomicBool,
    exists_checks: AtomicUsize,
    stall: Option<Duration>,
}

impl MemoryStore {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail as if the database were unreachable.
    pub fn fail_queries(self) -> Self {
        self.fail_queries.store(true, Ordering::SeqCst);
        self
    }

    /// Make only `device_id_exists` fail.
    pub fn fail_exists_checks(self) -> Self {
        self.fail_exists_checks.store(true, Ordering::SeqCst);
        self
    }

    /// Delay every operation by `delay`, as a hung connection would.
    pub fn stall_queries(mut self, delay: Duration) -> Self {
        self.stall = Some(delay);
        self
    }

    /// Number of `device_id_exists` calls seen so far.
    pub fn exists_checks(&self) -> usize {
        self.exists_checks.load(Ordering::SeqCst)
    }

    /// Insert rows directly, bypassing the service (timestamps kept as given).
    pub fn seed(&self, readings: impl IntoIterator<Item = NewReading>) -> Vec<Reading> {
        // ---
        let mut rows = self.rows.lock().unwrap();
        readings
            .into_iter()
            .map(|r| push_row(&mut rows, &r))
            .collect()
    }

    pub fn rows(&self) -> Vec<Reading> {
        self.rows.lock().unwrap().clone()
    }

    async fn check_available(&self) -> Result<(), sqlx::Error> {
        // ---
        if let Some(delay) = self.stall {
            tokio::time::sleep(delay).await;
        }
        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

fn push_row(rows: &mut Vec<Reading>, reading: &NewReading) -> Reading {
    // ---
    let row = Reading {
        id: rows.len() as i32 + 1,
        device_id: reading.device_id,
        temperature: reading.temperature,
        pressure: reading.pressure,
        timestamp: reading.timestamp,
    };
    rows.push(row.clone());
    row
}

#[async_trait]
impl ReadingStore for MemoryStore {
    // ---
    async fn latest(&self) -> Result<Option<Reading>, sqlx::Error> {
        self.check_available().await?;
        Ok(self.rows.lock().unwrap().last().cloned())
    }

    async fn since(&self, start: DateTime<Utc>) -> Result<Vec<Reading>, sqlx::Error> {
        // ---
        self.check_available().await?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.timestamp >= start)
            .cloned()
            .collect())
    }

    async fn insert(&self, reading: &NewReading) -> Result<Reading, sqlx::Error> {
        self.check_available().await?;
        Ok(push_row(&mut self.rows.lock().unwrap(), reading))
    }

    async fn device_id_exists(&self, device_id: Uuid) -> Result<bool, sqlx::Error> {
        // ---
        self.exists_checks.fetch_add(1, Ordering::SeqCst);
        self.check_available().await?;
        if self.fail_exists_checks.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("exists check failed".into()));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.device_id == device_id))
    }
}
