use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use tracing::debug;

use crate::AppState;

// --- Handlers ---

/// Current corpus, newest first.
pub async fn api_fallacy_examples(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.corpus.snapshot();
    debug!(count = snapshot.items.len(), "Serving examples");
    Json(snapshot.items.to_vec())
}

pub async fn api_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.corpus.status(state.run_interval))
}

pub async fn api_embed_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.embed.clone())
}
