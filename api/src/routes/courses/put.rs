use super::common::{CoursePatch, CourseRequest, CourseResponse, DUPLICATE_URL};
use crate::response::ApiResponse;
use crate::routes::common::{
    conflict, db_failure, error_response, field_errors, not_found, validation_failed,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::is_unique_violation;
use db::models::course::Model as Course;
use sea_orm::DatabaseConnection;
use util::state::AppState;
use validator::Validate;

async fn save(
    db: &DatabaseConnection,
    course_id: i64,
    title: Option<&str>,
    url: Option<&str>,
) -> Response {
    match Course::find_by_id(db, course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found("Course not found"),
        Err(e) => return db_failure("Failed to load course", e),
    }

    let course = match Course::update(db, course_id, title, url).await {
        Ok(course) => course,
        Err(e) if is_unique_violation(&e) => return conflict(DUPLICATE_URL),
        Err(e) => return db_failure("Failed to update course", e),
    };

    match CourseResponse::load(db, course).await {
        Ok(body) => Json(ApiResponse::success(body, "Course updated successfully")).into_response(),
        Err(e) => db_failure("Failed to load course reviews", e),
    }
}

/// PUT /courses/{course_id}
///
/// Replaces the title and url of a course.
///
/// ### Responses
/// - `200 OK` with the updated course
/// - `400 Bad Request` with per-field messages
/// - `404 Not Found`
/// - `409 Conflict` when another course has the same url
pub async fn update_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<CourseRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_failed(field_errors(&e));
    }
    let (Some(title), Some(url)) = (req.title.as_deref(), req.url.as_deref()) else {
        return error_response(StatusCode::BAD_REQUEST, "Title and URL are required");
    };

    save(app_state.db(), course_id, Some(title), Some(url)).await
}

/// PATCH /courses/{course_id}
///
/// Updates only the provided fields.
pub async fn patch_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<CoursePatch>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_failed(field_errors(&e));
    }

    save(
        app_state.db(),
        course_id,
        req.title.as_deref(),
        req.url.as_deref(),
    )
    .await
}
