//! Browser entry point and client bootstrap data.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Publishable key response.
#[derive(Debug, Serialize)]
pub struct PublicKeyResponse {
    /// Stripe publishable key used by the browser to tokenize cards.
    #[serde(rename = "publicKey")]
    pub public_key: Option<String>,
}

/// Serve `index.html` from the static directory.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let path = state.config.static_dir.join("index.html");

    let page = tokio::fs::read_to_string(&path).await.map_err(|e| {
        ApiError::Internal(format!("failed to read {}: {e}", path.display()))
    })?;

    Ok(Html(page))
}

/// Return the publishable key for client-side initialization.
pub async fn public_key(State(state): State<Arc<AppState>>) -> Json<PublicKeyResponse> {
    Json(PublicKeyResponse {
        public_key: state.config.stripe_publishable_key.clone(),
    })
}
