//! `/data` endpoints: windowed history retrieval and reading ingestion.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    params::{parse_duration, parse_limit},
    AppError, DataResponse, DeviceIdResponse, IngestOutcome, ReadingService,
};

// ---

pub fn router() -> Router<ReadingService> {
    // ---
    Router::new().route("/data", get(get_data).post(post_data))
}

/// Raw query tokens; validated by [`crate::params`] rather than by serde so
/// that bad values map to our own 400 responses. A query string serde cannot
/// read at all (e.g. a repeated key) becomes [`AppError::InvalidQuery`].
#[derive(Debug, Deserialize)]
pub struct DataQuery {
    duration: Option<String>,
    limit: Option<String>,
}

/// Handle `GET /data?duration=<token>&limit=<int>`.
async fn get_data(
    query: Result<Query<DataQuery>, QueryRejection>,
    State(service): State<ReadingService>,
) -> Result<Json<DataResponse>, AppError> {
    // ---
    let Query(params) = query.map_err(|e| AppError::InvalidQuery(e.body_text()))?;
    debug!("GET /data {:?}", params);

    let window = parse_duration(params.duration.as_deref())?;
    let limit = parse_limit(params.limit.as_deref())?;

    let response = service.snapshot(window, limit).await?;
    info!(
        "GET /data - window {}h, returning {} historical readings",
        window.num_hours(),
        response.historical.len()
    );
    Ok(Json(response))
}

/// Handle `POST /data`.
///
/// Responds `201 Created` in both cases; the body carries the device id only
/// when the server assigned it.
async fn post_data(
    State(service): State<ReadingService>,
    body: Bytes,
) -> Result<Response, AppError> {
    // ---
    let outcome = service.ingest(&body).await?;
    debug!("POST /data - stored reading {}", outcome.reading().id);

    let response = match outcome {
        IngestOutcome::Assigned(reading) => (
            StatusCode::CREATED,
            Json(DeviceIdResponse {
                id: reading.device_id,
            }),
        )
            .into_response(),
        IngestOutcome::Stored(_) => StatusCode::CREATED.into_response(),
    };
    Ok(response)
}
