use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::str::FromStr;

use crate::{
    dto::attendance_dto::{AttendanceListResponse, OverridePayload, OverrideResponse},
    error::{Error, Result},
    models::attendance_log::AttendanceStatus,
    AppState,
};

#[axum::debug_handler]
pub async fn list_event_attendance(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let event = state.event_service.get_by_id(event_id).await?;
    let attendance = state.attendance_service.list_for_event(event_id).await?;
    Ok(Json(AttendanceListResponse { event, attendance }))
}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}/override",
    request_body = OverridePayload,
    responses(
        (status = 200, description = "Status overridden"),
        (status = 400, description = "Status outside PRESENT/ABSENT/PENDING"),
        (status = 404, description = "Attendance record not found")
    )
)]
#[axum::debug_handler]
pub async fn override_status(
    State(state): State<AppState>,
    Path(log_id): Path<i64>,
    Json(payload): Json<OverridePayload>,
) -> Result<impl IntoResponse> {
    let status = AttendanceStatus::from_str(&payload.status).map_err(Error::BadRequest)?;
    let attendance = state
        .attendance_service
        .override_status(log_id, status)
        .await?;
    Ok(Json(OverrideResponse {
        message: "Status overridden".to_string(),
        attendance,
    }))
}

#[utoipa::path(
    get,
    path = "/api/attendance/event/{id}/export",
    responses(
        (status = 200, description = "CSV report", content_type = "text/csv"),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn export_event_attendance(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Response> {
    let event = state.event_service.get_by_id(event_id).await?;
    let export = state.export_service.export_event_csv(&event).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.data,
    )
        .into_response())
}
