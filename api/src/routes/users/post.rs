use super::common::{PermissionsResponse, ensure_user_exists, parse_codename};
use crate::response::ApiResponse;
use crate::routes::common::db_failure;
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use db::models::user_permission::Model as UserPermission;
use serde::Deserialize;
use util::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GrantRequest {
    pub codename: String,
}

/// POST /users/{user_id}/permissions
///
/// Grants a permission. Granting one the user already holds changes nothing.
///
/// ### Request Body
/// ```json
/// { "codename": "change_course" }
/// ```
///
/// ### Responses
/// - `200 OK` with the user's permissions after the grant
/// - `400 Bad Request` for an unknown codename
/// - `404 Not Found` for an unknown user
pub async fn grant_permission(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<GrantRequest>,
) -> Response {
    let codename = match parse_codename(&req.codename) {
        Ok(codename) => codename,
        Err(response) => return response,
    };

    let db = app_state.db();

    if let Err(response) = ensure_user_exists(db, user_id).await {
        return response;
    }

    if let Err(e) = UserPermission::grant(db, user_id, codename).await {
        return db_failure("Failed to grant permission", e);
    }
    tracing::info!(user_id, %codename, "Granted permission");

    match PermissionsResponse::load(db, user_id).await {
        Ok(body) => Json(ApiResponse::success(body, "Permission granted")).into_response(),
        Err(response) => response,
    }
}
