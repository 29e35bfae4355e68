use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthData {
    status: u16,
    store: &'static str,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthData>) {
    let (code, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    let health_data = HealthData { status: code.as_u16(), store };
    (code, Json(health_data))
}
