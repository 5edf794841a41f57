use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;
use crate::util::version;

/// GET /health - store ping plus the running release version.
///
/// Mounted outside the green gate so load balancers can probe it.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "version": version::release_version(),
            })),
        ),
        Err(error) => {
            tracing::error!("health check failed: {}", error);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "version": version::release_version(),
                })),
            )
        }
    }
}
