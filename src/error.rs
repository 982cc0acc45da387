use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opentelemetry::trace::TraceContextExt;
use serde_json::json;
use thiserror::Error;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Failures of the report pipeline, one variant per stage.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid student ID: {0}")]
    InvalidArgument(i64),

    #[error("failed to fetch student data: {0}")]
    DataFetch(#[source] anyhow::Error),

    #[error("student with ID {0} not found")]
    NotFound(i64),

    #[error("failed to generate PDF report: {0}")]
    Render(#[source] anyhow::Error),

    #[error("failed to clean up old reports: {0}")]
    Cleanup(#[source] anyhow::Error),
}

impl ReportError {
    /// Stage label used for logs and failure metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            ReportError::InvalidArgument(_) => "validate",
            ReportError::DataFetch(_) => "fetch",
            ReportError::NotFound(_) => "fetch",
            ReportError::Render(_) => "render",
            ReportError::Cleanup(_) => "cleanup",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Validation error: {0}")]
    Validation(String),
}

fn get_trace_id() -> Option<String> {
    let span = Span::current();
    let context = span.context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    if span_context.is_valid() {
        Some(span_context.trace_id().to_string())
    } else {
        None
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Report(ReportError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            AppError::Report(ReportError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Report(ReportError::DataFetch(_)) => StatusCode::BAD_GATEWAY,
            AppError::Report(ReportError::Render(_) | ReportError::Cleanup(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Report(err) => {
                if status.is_server_error() {
                    tracing::error!(error = ?err, stage = err.stage(), "Report request failed");
                }
                err.to_string()
            }
        };

        let mut body = json!({
            "success": false,
            "message": message,
            "error": status.canonical_reason().unwrap_or("Error"),
        });
        if let Some(trace_id) = get_trace_id() {
            body["trace_id"] = json!(trace_id);
        }

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
