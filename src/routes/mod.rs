use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::ReadingService;

mod cors;
mod data;
mod health;
mod landing;

// ---

pub fn router(service: ReadingService) -> Router {
    // ---
    Router::new()
        .merge(landing::router())
        .merge(data::router())
        .merge(health::router())
        .with_state(service)
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
}
