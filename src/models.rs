//! Data models for the weather station service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppError;

// ---

/// A persisted sensor reading as stored in `weather_data` and served by `GET /data`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Reading {
    // ---
    pub id: i32,
    #[serde(rename = "uuid")]
    pub device_id: Uuid,
    pub temperature: f64,
    pub pressure: f64,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /data`.
///
/// The device identifier is optional; an empty string counts as absent.
/// `temperature` and `pressure` are required: a body missing either is
/// rejected instead of being stored as zero.
/// A client `timestamp` is accepted so that existing firmware keeps working,
/// but it is never stored.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    // ---
    #[serde(default, rename = "uuid", alias = "device_id")]
    pub device_id: Option<String>,
    pub temperature: f64,
    pub pressure: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A reading ready for insertion: identity resolved, timestamp set by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    // ---
    pub device_id: Uuid,
    pub temperature: f64,
    pub pressure: f64,
    pub timestamp: DateTime<Utc>,
}

/// Response body of `GET /data`.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    // ---
    #[serde(rename = "LatestData")]
    pub latest: Option<Reading>,
    #[serde(rename = "HistoricalData")]
    pub historical: Vec<Reading>,
}

/// Response body of `POST /data` when the server assigned the device id.
#[derive(Debug, Serialize)]
pub struct DeviceIdResponse {
    pub id: Uuid,
}

impl IngestRequest {
    // ---
    /// Parse a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, AppError> {
        // ---
        serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))
    }

    /// The client supplied device id, if any.
    ///
    /// `Ok(None)` means the caller must allocate one.
    pub fn device_id(&self) -> Result<Option<Uuid>, AppError> {
        // ---
        match self.device_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Uuid::parse_str(raw)
                .map(Some)
                .map_err(|_| AppError::InvalidDeviceId(raw.to_string())),
        }
    }

    /// Bind the measurements to a resolved device id and the server clock.
    pub fn into_new_reading(self, device_id: Uuid, now: DateTime<Utc>) -> NewReading {
        // ---
        NewReading {
            device_id,
            temperature: self.temperature,
            pressure: self.pressure,
            timestamp: now,
        }
    }
}
