//! # HTTP Routes
//!
//! ```text
//! GET  /        liveness, static text
//! GET  /health  readiness, pings the database
//! POST /api     { "operation": ..., "input": ... } → { "data": ... }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::api::{self, Operation};
use crate::error::ApiError;
use crate::state::AppState;

/// Text served at `/`.
pub const ROOT_MESSAGE: &str = "Stock Management App";

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api", post(operation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    ROOT_MESSAGE
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        )
    } else {
        tracing::warn!("Health check failed: database unavailable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "database": "unreachable" })),
        )
    }
}

async fn operation(
    State(state): State<AppState>,
    payload: Result<Json<Operation>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(operation) = payload?;
    let data = api::execute(&state.db, operation).await?;
    Ok(Json(json!({ "data": data })))
}
