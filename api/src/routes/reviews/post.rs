use super::common::{ReviewRequest, ensure_course_field, insert_review};
use crate::routes::common::{db_failure, field_error, not_found, validation_failed};
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use db::models::course::Model as Course;
use util::state::AppState;

/// POST /v1/courses/{course_id}/reviews
///
/// Creates a review for the course in the path. A `course` field in the body is
/// ignored, whatever its shape. The body is validated before the course is
/// looked up.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Ann",
///   "email": "ann@example.com",
///   "comment": "Clear and well paced",
///   "rating": 5
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the review
/// - `400 Bad Request` with per-field messages
/// - `404 Not Found` when the body is valid but the course does not exist
/// - `409 Conflict` when this e-mail already reviewed the course
pub async fn create_course_review(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Response {
    let review = match req.into_valid(false) {
        Ok(review) => review,
        Err(errors) => return validation_failed(errors),
    };

    let db = app_state.db();
    match Course::find_by_id(db, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Course not found"),
        Err(e) => return db_failure("Failed to load course", e),
    }

    insert_review(db, course_id, review).await
}

/// POST /v2/reviews
///
/// Creates a review; `course` is required and must name an existing course.
///
/// ### Responses
/// - `201 Created` with the review
/// - `400 Bad Request` with per-field messages, including an unknown `course`
/// - `409 Conflict` when this e-mail already reviewed the course
pub async fn create_review(
    State(app_state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> Response {
    let review = match req.into_valid(true) {
        Ok(review) => review,
        Err(errors) => return validation_failed(errors),
    };
    let Some(course_id) = review.course else {
        return field_error("course", "This field is required");
    };

    let db = app_state.db();
    if let Err(response) = ensure_course_field(db, course_id).await {
        return response;
    }

    insert_review(db, course_id, review).await
}
