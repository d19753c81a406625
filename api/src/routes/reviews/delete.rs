use super::common::{find_course_review, remove_review};
use axum::{
    extract::{Path, State},
    response::Response,
};
use util::state::AppState;

/// DELETE /v1/courses/{course_id}/reviews/{review_id}
///
/// ### Responses
/// - `200 OK`
/// ```json
/// { "success": true, "data": null, "message": "Review deleted successfully" }
/// ```
/// - `404 Not Found` when the review does not exist or belongs to another course
pub async fn delete_course_review(
    State(app_state): State<AppState>,
    Path((course_id, review_id)): Path<(i64, i64)>,
) -> Response {
    let db = app_state.db();

    if let Err(response) = find_course_review(db, course_id, review_id).await {
        return response;
    }

    remove_review(db, review_id).await
}

/// DELETE /v2/reviews/{review_id}
pub async fn delete_review(
    State(app_state): State<AppState>,
    Path(review_id): Path<i64>,
) -> Response {
    remove_review(app_state.db(), review_id).await
}
