//! HTTP boundary: `GET /api/news`.
//!
//! Query parameters mirror [`ExtractionRequest`]:
//!
//! | Param | Meaning |
//! |-------|---------|
//! | `url` | Target homepage; empty or absent means the fixed sites |
//! | `keyword` | Case-insensitive filter on title, author, source |
//! | `sortBy` | `default`, `date` or `relevance`; anything else is `default` |
//!
//! Responses are a JSON array of articles. An invalid `url` is a `400` before
//! any fetch happens; running past the request budget is a `500`.

use crate::config::ScraperConfig;
use crate::fetcher::Fetch;
use crate::models::{ExtractionRequest, SortBy};
use crate::pipeline::scrape_news;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub struct AppState<F> {
    pub fetcher: F,
    pub config: ScraperConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    url: Option<String>,
    keyword: Option<String>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
}

pub fn router<F: Fetch + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/api/news", get(news_handler::<F>))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

async fn news_handler<F: Fetch + 'static>(
    State(state): State<Arc<AppState<F>>>,
    Query(params): Query<NewsQuery>,
) -> Response {
    let sort_by = params
        .sort_by
        .as_deref()
        .map(SortBy::from_param)
        .unwrap_or_default();
    let request = match ExtractionRequest::new(params.url.as_deref(), params.keyword.as_deref(), sort_by)
    {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejected news request");
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
                .into_response();
        }
    };

    let budget = state.config.request_timeout();
    match tokio::time::timeout(budget, scrape_news(&state.fetcher, &state.config, &request)).await {
        Ok(articles) => Json(articles).into_response(),
        Err(_) => {
            error!(budget_ms = budget.as_millis() as u64, "News request exceeded its budget");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to scrape news in time" })),
            )
                .into_response()
        }
    }
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve<F: Fetch + 'static>(addr: &str, state: Arc<AppState<F>>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "News API listening");
    axum::serve(listener, router(state)).await
}
