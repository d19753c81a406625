use super::common::{
    ReviewPatch, ReviewRequest, apply_changes, ensure_course_field, find_course_review,
    find_review,
};
use crate::routes::common::validation_failed;
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use util::state::AppState;

/// PUT /v1/courses/{course_id}/reviews/{review_id}
///
/// Replaces the review's fields. The review stays attached to its course.
///
/// ### Responses
/// - `200 OK` with the updated review
/// - `400 Bad Request` with per-field messages
/// - `404 Not Found` when the review does not exist or belongs to another course
/// - `409 Conflict` when the new e-mail already reviewed the course
pub async fn update_course_review(
    State(app_state): State<AppState>,
    Path((course_id, review_id)): Path<(i64, i64)>,
    Json(req): Json<ReviewRequest>,
) -> Response {
    let db = app_state.db();

    if let Err(response) = find_course_review(db, course_id, review_id).await {
        return response;
    }

    match req.into_valid(false) {
        Ok(review) => apply_changes(db, review_id, review.into_changes(None)).await,
        Err(errors) => validation_failed(errors),
    }
}

/// PATCH /v1/courses/{course_id}/reviews/{review_id}
///
/// Updates only the provided fields. A `course` field is ignored, whatever its
/// shape.
pub async fn patch_course_review(
    State(app_state): State<AppState>,
    Path((course_id, review_id)): Path<(i64, i64)>,
    Json(req): Json<ReviewPatch>,
) -> Response {
    let db = app_state.db();

    if let Err(response) = find_course_review(db, course_id, review_id).await {
        return response;
    }

    if let Err(errors) = req.check(false) {
        return validation_failed(errors);
    }

    apply_changes(db, review_id, req.into_changes(None)).await
}

/// PUT /v2/reviews/{review_id}
///
/// Replaces the review's fields; `course` is required and may move the review
/// to another existing course.
pub async fn update_review(
    State(app_state): State<AppState>,
    Path(review_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Response {
    let db = app_state.db();

    if let Err(response) = find_review(db, review_id).await {
        return response;
    }

    let review = match req.into_valid(true) {
        Ok(review) => review,
        Err(errors) => return validation_failed(errors),
    };

    if let Some(course_id) = review.course {
        if let Err(response) = ensure_course_field(db, course_id).await {
            return response;
        }
    }

    let course_id = review.course;
    apply_changes(db, review_id, review.into_changes(course_id)).await
}

/// PATCH /v2/reviews/{review_id}
pub async fn patch_review(
    State(app_state): State<AppState>,
    Path(review_id): Path<i64>,
    Json(req): Json<ReviewPatch>,
) -> Response {
    let db = app_state.db();

    if let Err(response) = find_review(db, review_id).await {
        return response;
    }

    let course_id = match req.check(true) {
        Ok(course_id) => course_id,
        Err(errors) => return validation_failed(errors),
    };

    if let Some(course_id) = course_id {
        if let Err(response) = ensure_course_field(db, course_id).await {
            return response;
        }
    }

    apply_changes(db, review_id, req.into_changes(course_id)).await
}
