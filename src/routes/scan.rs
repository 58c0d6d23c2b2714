use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::{dto::scan_dto::ScanRequest, error::Result, services::scan_service::ScanOutcome, AppState};

#[utoipa::path(
    post,
    path = "/api/scan",
    request_body = ScanRequest,
    responses(
        (status = 201, description = "First scan: checked in"),
        (status = 200, description = "Second scan: checked out, presence resolved"),
        (status = 409, description = "Already checked in and out; nothing mutated"),
        (status = 404, description = "Unknown event or student"),
        (status = 400, description = "Missing fields or inactive event")
    )
)]
#[axum::debug_handler]
pub async fn process_scan(
    State(state): State<AppState>,
    Json(payload): Json<ScanRequest>,
) -> Result<Response> {
    let outcome = state
        .scan_service
        .process_scan(&payload.roll_no, payload.event_id)
        .await?;

    Ok(match outcome {
        ScanOutcome::CheckIn(body) => (StatusCode::CREATED, Json(body)).into_response(),
        ScanOutcome::CheckOut(body) => (StatusCode::OK, Json(body)).into_response(),
        ScanOutcome::DuplicateBlocked(body) => (StatusCode::CONFLICT, Json(body)).into_response(),
    })
}
