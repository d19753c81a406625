use super::common::CourseResponse;
use crate::pagination::{self, Listing, PageQuery};
use crate::response::ApiResponse;
use crate::routes::common::{db_failure, not_found, page_failure};
use crate::routes::reviews::common::ReviewResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use db::models::course::Model as Course;
use db::models::review::Model as Review;
use util::state::AppState;

/// Page size of `GET /courses/{course_id}/reviews`: one review per page.
pub const COURSE_REVIEWS_PAGE_SIZE: u64 = 1;

/// GET /courses
///
/// Lists all courses in creation order, paginated with the global page size.
///
/// ### Query Parameters
/// - `page`: 1-based page number or `last`
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "results": [
///       {
///         "id": 1,
///         "title": "Python Collections",
///         "url": "https://example.com/python-collections",
///         "created_at": "2026-10-01T08:00:00+00:00",
///         "updated_at": "2026-10-01T08:00:00+00:00",
///         "reviews": [1, 2],
///         "average_rating": 4.5
///       }
///     ],
///     "page": 1,
///     "per_page": 10,
///     "total": 1,
///     "total_pages": 1
///   },
///   "message": "Courses retrieved successfully"
/// }
/// ```
/// - `404 Not Found` with `"Invalid page"` for a page out of range
pub async fn list_courses(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let db = app_state.db();

    let listing = match pagination::list(
        db,
        Course::ordered(),
        app_state.page_size(),
        query.requested(),
    )
    .await
    {
        Ok(listing) => listing,
        Err(e) => return page_failure("Failed to list courses", e),
    };

    let (courses, meta) = listing.into_parts();
    let results = match CourseResponse::load_all(db, courses).await {
        Ok(results) => results,
        Err(e) => return db_failure("Failed to load course reviews", e),
    };

    Json(ApiResponse::success(
        Listing::from_parts(results, meta),
        "Courses retrieved successfully",
    ))
    .into_response()
}

/// GET /courses/{course_id}
///
/// ### Responses
/// - `200 OK` with the course, its review ids and average rating
/// - `404 Not Found`
pub async fn get_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response {
    let db = app_state.db();

    let course = match Course::find_by_id(db, course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => return not_found("Course not found"),
        Err(e) => return db_failure("Failed to load course", e),
    };

    match CourseResponse::load(db, course).await {
        Ok(body) => {
            Json(ApiResponse::success(body, "Course retrieved successfully")).into_response()
        }
        Err(e) => db_failure("Failed to load course reviews", e),
    }
}

/// GET /courses/{course_id}/reviews
///
/// Pages through the reviews of one course, one review per page. When
/// pagination is disabled globally, every review is returned as a plain array.
///
/// ### Query Parameters
/// - `page`: 1-based page number or `last`
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "results": [
///       { "id": 11, "course": 5, "name": "Ann", "comment": "", "rating": 4,
///         "created_at": "...", "updated_at": "..." }
///     ],
///     "page": 2,
///     "per_page": 1,
///     "total": 3,
///     "total_pages": 3
///   },
///   "message": "Reviews retrieved successfully"
/// }
/// ```
/// - `404 Not Found` with `"Invalid page"` for a page out of range
pub async fn get_course_reviews(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Response {
    let page_size = app_state.page_size().map(|_| COURSE_REVIEWS_PAGE_SIZE);

    let listing = match pagination::list(
        app_state.db(),
        Review::for_course(course_id),
        page_size,
        query.requested(),
    )
    .await
    {
        Ok(listing) => listing,
        Err(e) => return page_failure("Failed to list course reviews", e),
    };

    let (reviews, meta) = listing.into_parts();
    let results: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();

    Json(ApiResponse::success(
        Listing::from_parts(results, meta),
        "Reviews retrieved successfully",
    ))
    .into_response()
}
