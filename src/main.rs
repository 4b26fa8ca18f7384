//! Application entry point for the `weatherflow-station` backend service.
//!
//! This binary orchestrates the full startup sequence for the weather
//! station API:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Establishing a PostgreSQL connection pool
//! - Creating the database schema if it does not exist
//! - Injecting the store into the reading service and mounting all routes
//!   via the `routes` gateway
//! - Binding the Axum HTTP server on port 8080 and serving requests
//!
//! # Environment Variables
//! - `DATABASE_URL` or `POSTGRES_PASSWORD` (**one required**) – see [`config`]
//! - `DB_POOL_MAX` (optional) – maximum number of DB connections (default: 5)
//! - `STORE_TIMEOUT_SECS` (optional) – bound on each store call (default: 10)
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, io::IsTerminal, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;

mod config;
mod downsample;
mod error;
mod identity;
mod models;
mod params;
mod routes;
mod schema;
mod service;
mod store;

pub use error::AppError;
pub use service::{IngestOutcome, ReadingService};

// Re-exported so that routes/*.rs, service.rs and store/*.rs depend on the
// crate root rather than on each other's module paths.
pub use models::{DataResponse, DeviceIdResponse, IngestRequest, NewReading, Reading};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    tracing::info!("Attempting to connect to database: {}", cfg.masked_db_url());

    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_pool_max)
        .acquire_timeout(Duration::from_secs(cfg.db_acquire_timeout_secs.into()))
        .connect(&cfg.db_url)
        .await
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to connect to database '{}': {}",
                cfg.masked_db_url(),
                e
            )
        })?;

    tracing::info!("Successfully connected to database");

    schema::create_schema(&pool).await?;

    let service = ReadingService::new(
        Arc::new(store::PgReadingStore::new(pool)),
        Duration::from_secs(cfg.store_timeout_secs.into()),
    );
    let app: Router = routes::router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// - Color output follows `FORCE_COLOR` (`1|true|yes` on, `0|false|no` off),
///   otherwise TTY detection
/// - Span events follow `AXUM_SPAN_EVENTS`: `"full"`, `"enter_exit"`, or
///   CLOSE only by default
/// - Level comes from `RUST_LOG` when set, else `AXUM_LOG_LEVEL` (default
///   `debug`), with sqlx statement logging kept at `warn`
///
/// Call once at startup before any logging macros are invoked.
fn init_tracing() {
    // ---
    let span_events = match env::var("AXUM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("AXUM_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},sqlx::query=warn,tower_http=info"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
