use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_failure, not_found};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use db::models::user::Model as User;
use db::models::user_permission::{Model as UserPermission, Permission};
use serde::Serialize;
use util::state::AppState;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub username: String,
    pub is_superuser: bool,
    pub permissions: Vec<Permission>,
    pub created_at: String,
}

/// GET /api/auth/me
///
/// Returns the authenticated user with the permission codenames granted to them.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 3,
///     "username": "editor",
///     "is_superuser": false,
///     "permissions": ["add_course", "change_course"],
///     "created_at": "2026-10-01T08:00:00+00:00"
///   },
///   "message": "User data retrieved successfully"
/// }
/// ```
///
/// ### Errors
/// - `401 Unauthorized` without a valid token
/// - `404 Not Found` when the token's user no longer exists
pub async fn get_me(State(app_state): State<AppState>, AuthUser(claims): AuthUser) -> Response {
    let db = app_state.db();

    let user = match User::find_by_id(db, claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return not_found("User not found"),
        Err(e) => return db_failure("Failed to load user", e),
    };

    let permissions = match UserPermission::for_user(db, user.id).await {
        Ok(permissions) => permissions,
        Err(e) => return db_failure("Failed to load permissions", e),
    };

    let body = MeResponse {
        id: user.id,
        username: user.username,
        is_superuser: user.is_superuser,
        permissions,
        created_at: user.created_at.to_rfc3339(),
    };

    Json(ApiResponse::success(body, "User data retrieved successfully")).into_response()
}
