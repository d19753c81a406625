use super::common::{PermissionsResponse, ensure_user_exists, parse_codename};
use crate::response::ApiResponse;
use crate::routes::common::{db_failure, not_found};
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use db::models::user_permission::Model as UserPermission;
use util::state::AppState;

/// DELETE /users/{user_id}/permissions/{codename}
///
/// ### Responses
/// - `200 OK` with the user's remaining permissions
/// - `400 Bad Request` for an unknown codename
/// - `404 Not Found` for an unknown user, or a permission the user does not hold
pub async fn revoke_permission(
    State(app_state): State<AppState>,
    Path((user_id, codename)): Path<(i64, String)>,
) -> Response {
    let codename = match parse_codename(&codename) {
        Ok(codename) => codename,
        Err(response) => return response,
    };

    let db = app_state.db();

    if let Err(response) = ensure_user_exists(db, user_id).await {
        return response;
    }

    match UserPermission::revoke(db, user_id, codename).await {
        Ok(true) => tracing::info!(user_id, %codename, "Revoked permission"),
        Ok(false) => return not_found("Permission not granted"),
        Err(e) => return db_failure("Failed to revoke permission", e),
    }

    match PermissionsResponse::load(db, user_id).await {
        Ok(body) => Json(ApiResponse::success(body, "Permission revoked")).into_response(),
        Err(response) => response,
    }
}
