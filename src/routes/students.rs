use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::student_dto::{BulkImportPayload, CreateStudentPayload, StudentListQuery},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentPayload,
    responses(
        (status = 201, description = "Student registered"),
        (status = 409, description = "Roll number already registered"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<CreateStudentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let student = state.student_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[axum::debug_handler]
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> Result<impl IntoResponse> {
    let students = state.student_service.list(query.search).await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/students/bulk",
    request_body = BulkImportPayload,
    responses(
        (status = 201, description = "Import summary with added/skipped counts"),
        (status = 400, description = "Empty batch")
    )
)]
#[axum::debug_handler]
pub async fn bulk_import_students(
    State(state): State<AppState>,
    Json(payload): Json<BulkImportPayload>,
) -> Result<impl IntoResponse> {
    let summary = state.student_service.bulk_import(payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

#[axum::debug_handler]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(roll_no): Path<String>,
) -> Result<impl IntoResponse> {
    state.student_service.delete(&roll_no).await?;
    Ok(Json(json!({ "message": "Student deleted" })))
}
