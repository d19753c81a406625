use super::common::{PermissionsResponse, ensure_user_exists};
use crate::response::ApiResponse;
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use util::state::AppState;

/// GET /users/{user_id}/permissions
///
/// Lists the permission codenames granted to a user.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "user_id": 4, "permissions": ["add_course"] },
///   "message": "Permissions retrieved successfully"
/// }
/// ```
/// - `404 Not Found` for an unknown user
pub async fn list_permissions(
    State(app_state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Response {
    let db = app_state.db();

    if let Err(response) = ensure_user_exists(db, user_id).await {
        return response;
    }

    match PermissionsResponse::load(db, user_id).await {
        Ok(body) => {
            Json(ApiResponse::success(body, "Permissions retrieved successfully")).into_response()
        }
        Err(response) => response,
    }
}
