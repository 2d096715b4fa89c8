use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use fallacy_common::EmbedConfig;
use fallacy_scout::Corpus;

pub mod rest;

pub struct AppState {
    pub corpus: Arc<Corpus>,
    /// Cadence of scheduled runs, used to project the next update.
    pub run_interval: Duration,
    pub embed: EmbedConfig,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/api/fallacy-examples", get(rest::api_fallacy_examples))
        .route("/api/status", get(rest::api_status))
        .route("/api/embed-config", get(rest::api_embed_config))
        .with_state(state)
        // CORS: the quiz widget is embedded on other origins
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
