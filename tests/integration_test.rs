//! End-to-end checks against a running server (`BASE_URL`, default
//! `http://localhost:8080`) backed by a real database.
//!
//! Run with `cargo test -- --ignored` once the service is up.

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Reading {
    id: i64,
    uuid: String,
    temperature: f64,
    pressure: f64,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct DataResponse {
    #[serde(rename = "LatestData")]
    latest: Option<Reading>,
    #[serde(rename = "HistoricalData")]
    historical: Vec<Reading>,
}

#[derive(Debug, Deserialize)]
struct DeviceIdResponse {
    id: String,
}

fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into())
}

#[tokio::test]
#[ignore = "requires a running server at BASE_URL"]
async fn first_contact_reading_is_served_back() -> Result<()> {
    // ---
    let base = base_url();
    let client = Client::new();

    let response = client
        .post(format!("{}/data", base))
        .json(&serde_json::json!({ "temperature": 21.5, "pressure": 1012.3 }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let assigned: DeviceIdResponse = response.json().await?;
    assert_eq!(assigned.id.len(), 36, "device id should be a UUID");

    let data: DataResponse = client
        .get(format!("{}/data?duration=1h&limit=10", base))
        .send()
        .await?
        .json()
        .await?;

    let latest = data.latest.expect("LatestData should be present");
    assert_eq!(latest.uuid, assigned.id);
    assert_eq!(latest.temperature, 21.5);
    assert_eq!(latest.pressure, 1012.3);
    assert!(latest.timestamp > Utc::now() - chrono::Duration::minutes(5));

    assert!(data.historical.len() <= 10);
    // Downsampling always keeps the newest point
    let newest = data.historical.last().expect("HistoricalData should not be empty");
    assert_eq!(newest.id, latest.id);

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running server at BASE_URL"]
async fn known_device_and_bad_parameters() -> Result<()> {
    // ---
    let base = base_url();
    let client = Client::new();
    let device = uuid::Uuid::new_v4().to_string();

    let response = client
        .post(format!("{}/data", base))
        .json(&serde_json::json!({ "uuid": device, "temperature": 18.0, "pressure": 990.0 }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.text().await?.is_empty());

    for query in ["duration=5", "duration=200", "limit=abc", "limit=0"] {
        let response = client.get(format!("{}/data?{}", base, query)).send().await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*",
            "{query}"
        );
    }

    Ok(())
}
