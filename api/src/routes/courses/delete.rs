use crate::response::{ApiResponse, Empty};
use crate::routes::common::{db_failure, not_found};
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use db::models::course::Model as Course;
use util::state::AppState;

/// DELETE /courses/{course_id}
///
/// Deletes a course together with its reviews. On `/v2` only superusers reach
/// this handler.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// { "success": true, "data": null, "message": "Course deleted successfully" }
/// ```
/// - `404 Not Found`
pub async fn delete_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response {
    match Course::delete(app_state.db(), course_id).await {
        Ok(true) => {
            tracing::info!(course_id, "Deleted course");
            Json(ApiResponse::success(Empty, "Course deleted successfully")).into_response()
        }
        Ok(false) => not_found("Course not found"),
        Err(e) => db_failure("Failed to delete course", e),
    }
}
