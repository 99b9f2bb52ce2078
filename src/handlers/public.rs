// handlers/public.rs - unauthenticated service endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service information
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Roster API (Rust)",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "profile": "/profile/favorites, /profile/:id (token)",
            "contact": "/contact/contacts[/:id|/reorder], /contact/admin-emails (token; mutations admin only)",
            "health": "/health (public)",
        }
    }))
}

/// GET /health - liveness plus store connectivity
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "database": "unavailable" })),
            )
        }
    }
}
