use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use serde::Deserialize;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, ReportResult};

const DEFAULT_GENERATED_BY: &str = "system";

#[derive(Debug, Default, Deserialize)]
pub struct GenerateReportBody {
    pub generated_by: Option<String>,
}

impl GenerateReportBody {
    /// An empty body is allowed and means "generated by the system".
    fn parse(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("invalid request body: {e}")))
    }

    fn generated_by(&self) -> &str {
        self.generated_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_GENERATED_BY)
    }
}

pub async fn generate_report(
    State(state): State<AppState>,
    student_id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<ApiResponse<ReportResult>>)> {
    let Path(student_id) = student_id.map_err(|rejection| {
        AppError::Validation(format!("invalid student ID: {}", rejection.body_text()))
    })?;
    let body = GenerateReportBody::parse(&body)?;

    let report = state
        .report_service
        .generate_student_report(student_id, body.generated_by())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(report, "Report generated successfully")),
    ))
}

pub async fn cleanup_reports(State(state): State<AppState>) -> AppResult<Json<ApiResponse<()>>> {
    state.report_service.cleanup_old_reports().await?;

    Ok(Json(ApiResponse {
        success: true,
        data: None,
        message: "Old reports cleaned up".to_string(),
    }))
}
