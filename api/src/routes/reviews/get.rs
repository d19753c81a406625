use super::common::{ReviewResponse, find_course_review, find_review};
use crate::pagination::{self, Listing, PageQuery};
use crate::response::ApiResponse;
use crate::routes::common::page_failure;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use db::models::review::Model as Review;
use util::state::AppState;

/// GET /v1/courses/{course_id}/reviews
///
/// Lists the reviews of one course in creation order, paginated with the
/// global page size. An unknown course simply has no reviews.
///
/// ### Query Parameters
/// - `page`: 1-based page number or `last`
///
/// ### Responses
/// - `200 OK` with `{ results, page, per_page, total, total_pages }`, or a plain
///   array when pagination is disabled
/// - `404 Not Found` with `"Invalid page"` for a page out of range
pub async fn list_course_reviews(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Response {
    let listing = match pagination::list(
        app_state.db(),
        Review::for_course(course_id),
        app_state.page_size(),
        query.requested(),
    )
    .await
    {
        Ok(listing) => listing,
        Err(e) => return page_failure("Failed to list reviews", e),
    };

    let (reviews, meta) = listing.into_parts();
    let results: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();

    Json(ApiResponse::success(
        Listing::from_parts(results, meta),
        "Reviews retrieved successfully",
    ))
    .into_response()
}

/// GET /v1/courses/{course_id}/reviews/{review_id}
///
/// ### Responses
/// - `200 OK` with the review
/// - `404 Not Found` when the review does not exist or belongs to another course
pub async fn get_course_review(
    State(app_state): State<AppState>,
    Path((course_id, review_id)): Path<(i64, i64)>,
) -> Response {
    match find_course_review(app_state.db(), course_id, review_id).await {
        Ok(review) => Json(ApiResponse::success(
            ReviewResponse::from(review),
            "Review retrieved successfully",
        ))
        .into_response(),
        Err(response) => response,
    }
}

/// GET /v2/reviews/{review_id}
pub async fn get_review(
    State(app_state): State<AppState>,
    Path(review_id): Path<i64>,
) -> Response {
    match find_review(app_state.db(), review_id).await {
        Ok(review) => Json(ApiResponse::success(
            ReviewResponse::from(review),
            "Review retrieved successfully",
        ))
        .into_response(),
        Err(response) => response,
    }
}
