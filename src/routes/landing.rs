//! Static landing page served at `/`.

use axum::{response::Html, routing::get, Router};

// ---

const HOME_PAGE: &str = include_str!("../../templates/home.html");

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}
