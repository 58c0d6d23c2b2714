use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use validator::Validate;

use crate::{dto::auth_dto::LoginPayload, error::Result, middleware::auth::Claims, AppState};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token issued"),
        (status = 401, description = "Invalid credentials")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn me(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(json!({
        "admin": { "id": claims.admin_id, "username": claims.sub }
    }))
}
