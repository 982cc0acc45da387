use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ApiResponse, StudentListItem};

pub async fn list_students(
    State(state): State<AppState>,
    Query(filters): Query<HashMap<String, String>>,
) -> AppResult<Json<ApiResponse<Vec<StudentListItem>>>> {
    let students = state.report_service.list_students(&filters).await?;

    Ok(Json(ApiResponse::ok(
        students,
        "Students retrieved successfully",
    )))
}
