use axum::{Json, extract::State, http::StatusCode};

use crate::AppState;
use crate::models::HealthStatus;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let status = state.report_service.health_check().await;

    let code = if status.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(status))
}
