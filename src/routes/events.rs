use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::event_dto::{CreateEventPayload, FinalizeResponse, UpdateEventPayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventPayload,
    responses(
        (status = 201, description = "Event created"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let event = state.event_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[axum::debug_handler]
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let events = state.event_service.list().await?;
    Ok(Json(events))
}

#[axum::debug_handler]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let event = state.event_service.get_by_id(id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    request_body = UpdateEventPayload,
    responses(
        (status = 200, description = "Event updated"),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateEventPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let event = state.event_service.update(id, payload).await?;
    Ok(Json(event))
}

#[axum::debug_handler]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.event_service.delete(id).await?;
    Ok(Json(json!({ "message": "Event deleted" })))
}

#[axum::debug_handler]
pub async fn event_stats(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let stats = state.event_service.stats(id).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    post,
    path = "/api/events/{id}/finalize",
    responses(
        (status = 200, description = "PENDING entries resolved to ABSENT, event deactivated"),
        (status = 404, description = "Event not found")
    )
)]
#[axum::debug_handler]
pub async fn finalize_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let finalized_count = state.event_service.finalize(id).await?;
    Ok(Json(FinalizeResponse {
        message: format!("Finalized. {} records marked as ABSENT.", finalized_count),
        finalized_count,
    }))
}
