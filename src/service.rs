//! Retrieval and ingestion orchestration.
//!
//! Handlers stay thin: they parse query/body tokens and delegate here. The
//! store handle is injected so the same service runs against PostgreSQL in
//! production and [`crate::store::memory::MemoryStore`] in tests.
//!
//! Every store call is bounded by the service's store timeout. A call that
//! overruns surfaces as [`AppError::StoreTimeout`] (500, logged), not as a
//! silently dropped request.

use std::{future::Future, sync::Arc, time};

use chrono::{Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    downsample::downsample, identity, store::ReadingStore, AppError, DataResponse, IngestRequest,
    Reading,
};

// ---

/// Result of a successful ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    /// The client supplied its device id.
    Stored(Reading),
    /// The server allocated a device id; the client must keep it.
    Assigned(Reading),
}

impl IngestOutcome {
    pub fn reading(&self) -> &Reading {
        match self {
            IngestOutcome::Stored(r) | IngestOutcome::Assigned(r) => r,
        }
    }
}

#[derive(Clone)]
pub struct ReadingService {
    store: Arc<dyn ReadingStore>,
    store_timeout: time::Duration,
}

impl ReadingService {
    // ---
    pub fn new(store: Arc<dyn ReadingStore>, store_timeout: time::Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    /// Run one store call under the store timeout.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        // ---
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AppError::StoreTimeout {
                operation,
                after: self.store_timeout,
            }),
        }
    }

    /// Latest reading plus the downsampled history of the last `window`.
    ///
    /// Missing data is not an error here: an empty store yields
    /// `latest: None` and an empty history.
    pub async fn snapshot(&self, window: Duration, limit: usize) -> Result<DataResponse, AppError> {
        // ---
        let latest = match self.latest().await {
            Ok(reading) => Some(reading),
            Err(AppError::NoData) => None,
            Err(e) => return Err(e),
        };

        let historical = match self.historical(window, limit).await {
            Ok(readings) => readings,
            Err(AppError::NoHistoricalData) => Vec::new(),
            Err(e) => return Err(e),
        };

        Ok(DataResponse { latest, historical })
    }

    /// The most recently inserted reading.
    pub async fn latest(&self) -> Result<Reading, AppError> {
        self.bounded("latest", self.store.latest())
            .await?
            .ok_or(AppError::NoData)
    }

    /// Readings from the last `window`, oldest first, reduced to `limit` points.
    pub async fn historical(&self, window: Duration, limit: usize) -> Result<Vec<Reading>, AppError> {
        // ---
        let start = Utc::now() - window;
        let rows = self.bounded("since", self.store.since(start)).await?;
        if rows.is_empty() {
            return Err(AppError::NoHistoricalData);
        }

        let total = rows.len();
        let sampled = downsample(rows, limit);
        debug!(
            "Historical window since {}: {} rows, returning {}",
            start,
            total,
            sampled.len()
        );
        Ok(sampled)
    }

    /// Parse, stamp, identify and persist one reading.
    ///
    /// The server clock always wins: any client timestamp is dropped so that
    /// sensors without a reliable RTC still produce a consistent series.
    pub async fn ingest(&self, body: &[u8]) -> Result<IngestOutcome, AppError> {
        // ---
        let request = IngestRequest::from_slice(body)?;
        let supplied = request.device_id()?;

        if let Some(ts) = request.timestamp {
            debug!("Discarding client timestamp {}", ts);
        }
        let now = Utc::now();

        let (device_id, assigned) = match supplied {
            Some(id) => (id, false),
            None => (self.allocate_device_id().await?, true),
        };

        let new_reading = request.into_new_reading(device_id, now);
        let reading = self
            .bounded("insert", self.store.insert(&new_reading))
            .await?;
        info!(
            "Stored reading {} from device {}: temperature={} pressure={}",
            reading.id, reading.device_id, reading.temperature, reading.pressure
        );

        Ok(if assigned {
            IngestOutcome::Assigned(reading)
        } else {
            IngestOutcome::Stored(reading)
        })
    }

    async fn allocate_device_id(&self) -> Result<Uuid, AppError> {
        // ---
        let id = identity::allocate_device_id(self.store.as_ref(), self.store_timeout).await?;
        info!("Assigned new device id {}", id);
        Ok(id)
    }
}
