use super::common::{CourseRequest, CourseResponse, DUPLICATE_URL};
use crate::response::ApiResponse;
use crate::routes::common::{
    conflict, db_failure, error_response, field_errors, validation_failed,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::is_unique_violation;
use db::models::course::Model as Course;
use util::state::AppState;
use validator::Validate;

/// POST /courses
///
/// ### Request Body
/// ```json
/// { "title": "Python Collections", "url": "https://example.com/python-collections" }
/// ```
///
/// ### Responses
/// - `201 Created` with the course (`reviews` empty, `average_rating` null)
/// - `400 Bad Request` with per-field messages
/// ```json
/// {
///   "success": false,
///   "data": { "url": ["Enter a valid URL"] },
///   "message": "Enter a valid URL"
/// }
/// ```
/// - `409 Conflict` when another course has the same url
pub async fn create_course(
    State(app_state): State<AppState>,
    Json(req): Json<CourseRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return validation_failed(field_errors(&e));
    }
    let (Some(title), Some(url)) = (req.title, req.url) else {
        return error_response(StatusCode::BAD_REQUEST, "Title and URL are required");
    };

    match Course::create(app_state.db(), &title, &url).await {
        Ok(course) => {
            tracing::info!(course_id = course.id, "Created course");
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    CourseResponse::new(course, &[]),
                    "Course created successfully",
                )),
            )
                .into_response()
        }
        Err(e) if is_unique_violation(&e) => conflict(DUPLICATE_URL),
        Err(e) => db_failure("Failed to create course", e),
    }
}
