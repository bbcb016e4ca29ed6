//! 健康检查

use axum::{extract::State, response::Json};
use tracing::warn;

use super::AppState;
use crate::core::response::HealthResponse;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match state.executor() {
        Ok(executor) => match executor.fetch("SELECT 1 AS ok", &[]).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Database probe failed: {}", e);
                false
            }
        },
        Err(_) => false,
    };

    Json(HealthResponse::new(connected))
}
